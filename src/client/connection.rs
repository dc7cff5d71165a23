use serde::Deserialize;

use crate::domain::{ApiKey, Password, PublisherId, SourceTag, Username, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ConnectionConfig")]
/// Merchant credentials shared by every call.
///
/// Immutable once built; clone it freely or share it between clients.
/// `Debug` output redacts the API key and the password.
///
/// Deserializing validates through the same constructors, so a
/// host application can load it from its own configuration:
///
/// ```toml
/// api_key = "..."
/// publisher_id = 1234
/// username = "merchant"
/// password = "..."
/// source = "my-shop"   # optional
/// ```
pub struct Connection {
    api_key: ApiKey,
    publisher_id: PublisherId,
    username: Username,
    password: Password,
    source: Option<SourceTag>,
}

impl Connection {
    pub fn new(
        api_key: impl Into<String>,
        publisher_id: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            publisher_id: PublisherId::new(publisher_id)?,
            username: Username::new(username)?,
            password: Password::new(password)?,
            source: None,
        })
    }

    /// Attach the integration tag sent as `source` on every call.
    pub fn with_source(mut self, source: impl Into<String>) -> Result<Self, ValidationError> {
        self.source = Some(SourceTag::new(source)?);
        Ok(self)
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn publisher_id(&self) -> &PublisherId {
        &self.publisher_id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn source(&self) -> Option<&SourceTag> {
        self.source.as_ref()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Text(String),
    Number(u64),
}

impl From<IdValue> for String {
    fn from(value: IdValue) -> Self {
        match value {
            IdValue::Text(text) => text,
            IdValue::Number(number) => number.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ConnectionConfig {
    api_key: String,
    publisher_id: IdValue,
    username: String,
    password: String,
    #[serde(default)]
    source: Option<String>,
}

impl TryFrom<ConnectionConfig> for Connection {
    type Error = ValidationError;

    fn try_from(config: ConnectionConfig) -> Result<Self, Self::Error> {
        let connection = Connection::new(
            config.api_key,
            String::from(config.publisher_id),
            config.username,
            config.password,
        )?;
        match config.source.filter(|source| !source.trim().is_empty()) {
            Some(source) => connection.with_source(source),
            None => Ok(connection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_validates_every_credential() {
        assert!(Connection::new("key", "1", "user", "pass").is_ok());
        assert_eq!(
            Connection::new("", "1", "user", "pass").unwrap_err(),
            ValidationError::Empty { field: "api_key" }
        );
        assert_eq!(
            Connection::new("key", " ", "user", "pass").unwrap_err(),
            ValidationError::Empty { field: "pub_id" }
        );
        assert_eq!(
            Connection::new("key", "1", "user", "").unwrap_err(),
            ValidationError::Empty { field: "password" }
        );
        assert!(
            Connection::new("key", "1", "user", "pass")
                .unwrap()
                .with_source("  ")
                .is_err()
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let connection = Connection::new("top-secret-key", "1", "user", "hunter2")
            .unwrap()
            .with_source("shop")
            .unwrap();
        let debug = format!("{connection:?}");
        assert!(!debug.contains("top-secret-key"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("shop"));
    }

    #[test]
    fn deserializes_with_numeric_publisher_id() {
        let connection: Connection = serde_json::from_str(
            r#"{"api_key":"k","publisher_id":42,"username":"u","password":"p","source":"shop"}"#,
        )
        .unwrap();
        assert_eq!(connection.publisher_id().as_str(), "42");
        assert_eq!(connection.source().map(SourceTag::as_str), Some("shop"));
    }

    #[test]
    fn deserialize_treats_blank_source_as_absent() {
        let connection: Connection = serde_json::from_str(
            r#"{"api_key":"k","publisher_id":"42","username":"u","password":"p","source":""}"#,
        )
        .unwrap();
        assert_eq!(connection.source(), None);
    }

    #[test]
    fn deserialize_rejects_empty_credentials() {
        let err = serde_json::from_str::<Connection>(
            r#"{"api_key":" ","publisher_id":"42","username":"u","password":"p"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("api_key must not be empty"));
    }
}

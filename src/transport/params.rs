use std::collections::BTreeMap;

use super::signature::{SIGNATURE_FIELD, sign};
use crate::domain::{ActionKind, ApiKey, ParamValue, PublisherId, SourceTag, ValidationError};

/// Named parameters of one outgoing call.
///
/// Seeded with `pub_id`; every value is checked for emptiness as it is added
/// so an incomplete request never reaches the network.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParams {
    args: BTreeMap<String, ParamValue>,
}

impl RequestParams {
    pub fn new(publisher_id: &PublisherId) -> Self {
        let mut args = BTreeMap::new();
        args.insert(
            PublisherId::FIELD.to_owned(),
            ParamValue::from(publisher_id.as_str()),
        );
        Self { args }
    }

    /// Add a parameter, rejecting empty strings.
    ///
    /// `0`, `0.0`, `false` and `"0"` are accepted.
    pub fn set_argument(
        &mut self,
        name: &'static str,
        value: impl Into<ParamValue>,
    ) -> Result<(), ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: name });
        }
        self.args.insert(name.to_owned(), value);
        Ok(())
    }

    /// Add a parameter only when a non-empty value is given.
    pub fn set_optional<V: Into<ParamValue>>(
        &mut self,
        name: &'static str,
        value: Option<V>,
    ) -> Result<(), ValidationError> {
        match value.map(Into::into) {
            Some(value) if !value.is_empty() => self.set_argument(name, value),
            _ => Ok(()),
        }
    }

    pub fn set_action(&mut self, kind: ActionKind) -> Result<(), ValidationError> {
        self.set_argument(ActionKind::FIELD, kind.name())
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.args.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    /// Parameter names in wire order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.args.keys().map(String::as_str)
    }

    /// Produce the final query parameters: `source` when configured, then
    /// `sig` computed over everything else.
    pub fn finalize(
        self,
        api_key: &ApiKey,
        source: Option<&SourceTag>,
    ) -> Result<Vec<(String, String)>, ValidationError> {
        if !self.args.contains_key(ActionKind::FIELD) {
            return Err(ValidationError::MissingAction);
        }

        let mut wire: BTreeMap<String, String> = self
            .args
            .into_iter()
            .map(|(name, value)| (name, value.to_wire()))
            .collect();
        if let Some(source) = source {
            wire.insert(SourceTag::FIELD.to_owned(), source.as_str().to_owned());
        }
        wire.remove(SIGNATURE_FIELD);

        let signature = sign(api_key.as_str(), &wire);
        let mut params: Vec<(String, String)> = wire.into_iter().collect();
        params.push((SIGNATURE_FIELD.to_owned(), signature));
        Ok(params)
    }
}

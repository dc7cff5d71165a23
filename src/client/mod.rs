//! Client layer: signs requests, performs the HTTP call and maps responses.

mod connection;
mod error;

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};
use url::Url;

use crate::transport::{Action, RequestParams, check_response, classify};

pub use connection::Connection;
pub use error::{LIB_ERROR_CONNECTIVITY, LIB_ERROR_INVALID_ARG, LIB_ERROR_UNKNOWN, Text2PayError};

/// Production API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.text2pay.com/v1/";
/// Timeout applied to the whole HTTP round trip unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

#[derive(Clone, Copy)]
struct BasicCredentials<'a> {
    username: &'a str,
    password: &'a str,
}

trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        endpoint: &'a Url,
        params: Vec<(String, String)>,
        credentials: Option<BasicCredentials<'a>>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        endpoint: &'a Url,
        params: Vec<(String, String)>,
        credentials: Option<BasicCredentials<'a>>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut request = self.client.get(query_url(endpoint, &params));
            if let Some(credentials) = credentials {
                request = request.basic_auth(credentials.username, Some(credentials.password));
            }
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

fn query_url(endpoint: &Url, params: &[(String, String)]) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut().extend_pairs(params);
    url
}

fn normalize_line_endings(body: &str) -> String {
    body.replace("\r\n", "\n").replace('\r', "\n")
}

#[derive(Debug, Clone)]
/// Builder for [`Text2PayClient`].
///
/// Use this when you need to customize the endpoint, timeout, user-agent or
/// TLS verification.
pub struct Text2PayClientBuilder {
    connection: Connection,
    endpoint: String,
    timeout: Duration,
    user_agent: Option<String>,
    accept_invalid_certs: bool,
}

impl Text2PayClientBuilder {
    /// Create a builder with the default endpoint and a 30 second timeout.
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            accept_invalid_certs: false,
        }
    }

    /// Override the API endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Skip TLS certificate verification.
    ///
    /// Only meant for test environments with self-signed certificates.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build a [`Text2PayClient`].
    pub fn build(self) -> Result<Text2PayClient, Text2PayError> {
        let endpoint =
            Url::parse(&self.endpoint).map_err(|err| Text2PayError::Transport(Box::new(err)))?;

        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if self.accept_invalid_certs {
            warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|err| Text2PayError::Transport(Box::new(err)))?;

        Ok(Text2PayClient {
            connection: self.connection,
            endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level Text2Pay client.
///
/// Every action goes through [`Text2PayClient::execute`]: the request's
/// parameters are validated, `pub_id`, `source` and `sig` are added, one GET
/// is performed with HTTP Basic credentials, and the body is checked for an
/// error before it is decoded into the action's response type.
///
/// The client holds no mutable state; clones share the HTTP connection pool.
pub struct Text2PayClient {
    connection: Connection,
    endpoint: Url,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for Text2PayClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Text2PayClient")
            .field("connection", &self.connection)
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl Text2PayClient {
    /// Create a client using the default endpoint and timeout.
    ///
    /// For more customization, use [`Text2PayClient::builder`].
    pub fn new(connection: Connection) -> Result<Self, Text2PayError> {
        Text2PayClientBuilder::new(connection).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(connection: Connection) -> Text2PayClientBuilder {
        Text2PayClientBuilder::new(connection)
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Run one action against the API.
    ///
    /// Errors:
    /// - [`Text2PayError::Validation`] when the parameters are incomplete,
    /// - [`Text2PayError::Transport`] / [`Text2PayError::HttpStatus`] when the
    ///   call could not be completed,
    /// - [`Text2PayError::Api`] when the service reports an error,
    /// - [`Text2PayError::Parse`] when the body does not have the expected shape.
    #[instrument(skip_all, fields(action = A::KIND.name()))]
    pub async fn execute<A: Action>(&self, request: A) -> Result<A::Response, Text2PayError> {
        let params = self.signed_params(&request)?;
        debug!(
            endpoint = %self.endpoint,
            params = ?params.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
            "sending request"
        );

        let credentials = BasicCredentials {
            username: self.connection.username().as_str(),
            password: self.connection.password().as_str(),
        };
        let response = self
            .http
            .get(&self.endpoint, params, Some(credentials))
            .await
            .map_err(Text2PayError::Transport)?;

        if response.status != 200 {
            warn!(status = response.status, "unexpected HTTP status");
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(Text2PayError::HttpStatus {
                status: response.status,
                body,
            });
        }

        let body = normalize_line_endings(&response.body);
        debug!(kind = ?classify(&body), bytes = body.len(), "received response");

        let payload = check_response(&body).map_err(|err| {
            let err = Text2PayError::from(err);
            if err.is_api_error() {
                warn!(code = err.code(), "API returned an error");
            }
            err
        })?;

        A::decode(payload).map_err(|err| Text2PayError::Parse(Box::new(err)))
    }

    /// Full URL `execute` would request, signature included.
    ///
    /// Handy for troubleshooting; the Basic credentials are not part of it.
    pub fn request_url<A: Action>(&self, request: &A) -> Result<Url, Text2PayError> {
        let params = self.signed_params(request)?;
        Ok(query_url(&self.endpoint, &params))
    }

    fn signed_params<A: Action>(&self, request: &A) -> Result<Vec<(String, String)>, Text2PayError> {
        let mut params = RequestParams::new(self.connection.publisher_id());
        params.set_action(A::KIND)?;
        request.encode(&mut params)?;
        Ok(params.finalize(self.connection.api_key(), self.connection.source())?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use crate::domain::{
        CheckTransactionStatus, CountryCode, GetHelpLine, GetTransactionHistory, Msisdn,
        TransactionHistoryOptions, ValidateMsisdn,
    };
    use crate::transport::sign;

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_url: Option<String>,
        last_params: Vec<(String, String)>,
        last_credentials: Option<(String, String)>,
        response: Result<HttpResponse, String>,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self::with_response(Ok(HttpResponse {
                status: response_status,
                body: response_body.into(),
            }))
        }

        fn failing(message: &str) -> Self {
            Self::with_response(Err(message.to_owned()))
        }

        fn with_response(response: Result<HttpResponse, String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    last_params: Vec::new(),
                    last_credentials: None,
                    response,
                })),
            }
        }

        fn last_request(&self) -> (Option<String>, Vec<(String, String)>) {
            let state = self.state.lock().unwrap();
            (state.last_url.clone(), state.last_params.clone())
        }

        fn last_credentials(&self) -> Option<(String, String)> {
            self.state.lock().unwrap().last_credentials.clone()
        }
    }

    impl HttpTransport for FakeTransport {
        fn get<'a>(
            &'a self,
            endpoint: &'a Url,
            params: Vec<(String, String)>,
            credentials: Option<BasicCredentials<'a>>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let response = {
                    let mut state = self.state.lock().unwrap();
                    state.last_url = Some(endpoint.to_string());
                    state.last_params = params;
                    state.last_credentials = credentials
                        .map(|c| (c.username.to_owned(), c.password.to_owned()));
                    state.response.clone()
                };
                response.map_err(Into::into)
            })
        }
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn lookup<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn connection() -> Connection {
        Connection::new("secret", "77", "merchant", "pass").unwrap()
    }

    fn make_client(connection: Connection, transport: FakeTransport) -> Text2PayClient {
        Text2PayClient {
            connection,
            endpoint: Url::parse("https://example.invalid/api/").unwrap(),
            http: Arc::new(transport),
        }
    }

    fn help_line() -> GetHelpLine {
        GetHelpLine::new(CountryCode::new("US").unwrap())
    }

    #[tokio::test]
    async fn execute_signs_request_and_decodes_response() {
        let transport = FakeTransport::new(
            200,
            r#"<response><country code="US" helpline="1-800-555-0100"/></response>"#,
        );
        let client = make_client(connection(), transport.clone());

        let response = client.execute(help_line()).await.unwrap();
        assert_eq!(response.help_line, "1-800-555-0100");

        let (url, params) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/api/"));
        assert_param(&params, "action", "getHelpLine");
        assert_param(&params, "country_code", "US");
        assert_param(&params, "pub_id", "77");
        assert_eq!(lookup(&params, "source"), None);
        assert_eq!(params.last().map(|(k, _)| k.as_str()), Some("sig"));

        let unsigned: BTreeMap<String, String> = params
            .iter()
            .filter(|(k, _)| k != "sig")
            .cloned()
            .collect();
        assert_eq!(lookup(&params, "sig"), Some(sign("secret", &unsigned).as_str()));
        assert!(lookup(&params, "secret").is_none());

        assert_eq!(
            transport.last_credentials(),
            Some(("merchant".to_owned(), "pass".to_owned()))
        );
    }

    #[tokio::test]
    async fn execute_includes_source_tag() {
        let transport = FakeTransport::new(
            200,
            r#"<response><country helpline="1"/></response>"#,
        );
        let client = make_client(connection().with_source("shop-7").unwrap(), transport.clone());

        client.execute(help_line()).await.unwrap();

        let (_, params) = transport.last_request();
        assert_param(&params, "source", "shop-7");
    }

    #[tokio::test]
    async fn execute_maps_xml_error_to_api_error() {
        let transport = FakeTransport::new(
            200,
            "<response><error_code>20004</error_code><message>Failed</message></response>",
        );
        let client = make_client(connection(), transport);

        let err = client.execute(help_line()).await.unwrap_err();
        match err {
            Text2PayError::Api { code, message, .. } => {
                assert_eq!(code, 20004);
                assert_eq!(message.as_deref(), Some("Failed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn execute_maps_plain_text_error_to_api_error() {
        let transport = FakeTransport::new(200, "20004,Failed transaction\r\n");
        let client = make_client(connection(), transport);

        let err = client
            .execute(CheckTransactionStatus::for_group(5000).unwrap())
            .await
            .unwrap_err();
        assert!(err.is_api_error());
        assert_eq!(err.code(), 20004);
        assert!(matches!(
            err,
            Text2PayError::Api { message: Some(ref m), .. } if m == "Failed transaction"
        ));
    }

    #[tokio::test]
    async fn execute_maps_non_success_http_status() {
        let transport = FakeTransport::new(500, "oops");
        let client = make_client(connection(), transport);

        let err = client.execute(help_line()).await.unwrap_err();
        assert!(matches!(
            err,
            Text2PayError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));
        assert_eq!(err.code(), LIB_ERROR_CONNECTIVITY);
    }

    #[tokio::test]
    async fn execute_treats_other_2xx_as_failure() {
        let transport = FakeTransport::new(204, "   ");
        let client = make_client(connection(), transport);

        let err = client.execute(help_line()).await.unwrap_err();
        assert!(matches!(
            err,
            Text2PayError::HttpStatus {
                status: 204,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn execute_maps_transport_failure() {
        let client = make_client(connection(), FakeTransport::failing("connection refused"));

        let err = client.execute(help_line()).await.unwrap_err();
        assert!(matches!(err, Text2PayError::Transport(_)));
        assert_eq!(err.code(), LIB_ERROR_CONNECTIVITY);
    }

    #[tokio::test]
    async fn execute_maps_unexpected_shape_to_parse_error() {
        let transport = FakeTransport::new(200, "<response><unrelated/></response>");
        let client = make_client(connection(), transport);

        let err = client.execute(help_line()).await.unwrap_err();
        assert!(matches!(err, Text2PayError::Parse(_)));
        assert_eq!(err.code(), LIB_ERROR_UNKNOWN);
    }

    #[tokio::test]
    async fn execute_parses_csv_history_with_crlf_line_endings() {
        let transport = FakeTransport::new(
            200,
            "transaction_id,status\r\n7001,billed\r\n7002,failed\r\n\r\n",
        );
        let client = make_client(connection(), transport.clone());

        let request = GetTransactionHistory::new(
            3,
            "2024-01-01",
            "2024-01-31",
            TransactionHistoryOptions::default(),
        )
        .unwrap();
        let response = client.execute(request).await.unwrap();
        assert_eq!(response.transactions.len(), 2);
        assert_eq!(response.transactions[0]["status"], "billed");

        let (_, params) = transport.last_request();
        assert_param(&params, "action", "getTransactionHistory");
        assert_param(&params, "from_date", "2024-01-01");
    }

    #[test]
    fn request_url_contains_signed_query() {
        let client = make_client(connection(), FakeTransport::new(200, ""));
        let request = ValidateMsisdn::new(
            CountryCode::new("US").unwrap(),
            Msisdn::new("15551234567").unwrap(),
        );

        let url = client.request_url(&request).unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(url.path(), "/api/");
        assert_param(&pairs, "action", "validateMSISDN");
        assert_param(&pairs, "msisdn", "15551234567");
        assert!(lookup(&pairs, "sig").is_some());
        assert!(!url.as_str().contains("pass"));
    }

    #[test]
    fn line_endings_are_normalized() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn builder_applies_endpoint_and_rejects_invalid_urls() {
        let client = Text2PayClient::builder(connection())
            .endpoint("https://sandbox.example.invalid/v1/")
            .timeout(Duration::from_secs(5))
            .user_agent("text2pay-tests")
            .build()
            .unwrap();
        assert_eq!(client.endpoint().as_str(), "https://sandbox.example.invalid/v1/");

        let err = Text2PayClient::builder(connection())
            .endpoint("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, Text2PayError::Transport(_)));
    }

    #[test]
    fn debug_output_shows_endpoint_without_secrets() {
        let client = Text2PayClient::new(connection()).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains(DEFAULT_ENDPOINT));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret"));
        assert!(!debug.contains("\"pass\""));
    }

    #[test]
    fn default_client_uses_production_endpoint() {
        let client = Text2PayClient::new(connection()).unwrap();
        assert_eq!(client.endpoint().as_str(), DEFAULT_ENDPOINT);
    }
}

/*
[INPUT]:  HTTP configuration (base URL, timeout, credentials)
[OUTPUT]: Configured reqwest client that signs and decodes API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::fmt;
use std::io::Read;
use std::time::Duration;

use chrono::Utc;
use reqwest::header::HeaderValue;
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::http::signature::{AuthHeaders, RequestSigner};
use crate::http::{Result, TradeDeskError};
use crate::types::ErrorBody;

/// Default timeout applied to every request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100);

/// HTTP client configuration
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub key: String,
    /// Base64 encoded API secret
    pub secret: String,
    pub passphrase: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        key: impl Into<String>,
        secret: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            key: key.into(),
            secret: secret.into(),
            passphrase: passphrase.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Credentials for authenticated requests
#[derive(Clone)]
pub struct Credentials {
    key: String,
    passphrase: String,
    signer: RequestSigner,
}

impl Credentials {
    /// Decode the secret once; a malformed secret fails here, not on first use.
    ///
    /// Key and passphrase travel as header values and are checked here too.
    pub fn new(key: impl Into<String>, secret: &str, passphrase: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let passphrase = passphrase.into();
        check_header_value("key", &key)?;
        check_header_value("passphrase", &passphrase)?;

        Ok(Self {
            key,
            passphrase,
            signer: RequestSigner::from_base64(secret)?,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// Sign a request at the current time.
    ///
    /// Returns the headers to attach and, when a body was given, the buffered
    /// copy of it that has to be sent in its place.
    pub fn authenticate<R: Read>(
        &self,
        method: &Method,
        request_path: &str,
        body: Option<R>,
    ) -> Result<(AuthHeaders, Option<Vec<u8>>)> {
        let timestamp = Utc::now().timestamp().to_string();
        let (signature, body) =
            self.signer
                .sign_reader(&timestamp, method.as_str(), request_path, body)?;

        let headers = AuthHeaders {
            key: self.key.clone(),
            passphrase: self.passphrase.clone(),
            timestamp,
            signature,
        };
        Ok((headers, body))
    }
}

fn check_header_value(name: &str, value: &str) -> Result<()> {
    HeaderValue::from_str(value)
        .map(|_| ())
        .map_err(|_| TradeDeskError::Config(format!("API {name} is not a valid header value")))
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

/// Main HTTP client for the exchange REST API
#[derive(Debug, Clone)]
pub struct TradeDeskClient {
    http_client: Client,
    base_url: String,
    credentials: Credentials,
}

impl TradeDeskClient {
    /// Build a client; the secret is decoded and the base URL checked up front.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TradeDeskError::Config(format!("failed to build HTTP client: {e}")))?;
        Self::with_http_client(config, http_client)
    }

    /// Build a client around an existing reqwest client.
    ///
    /// `config.timeout` is ignored; the given client's own settings apply.
    pub fn with_http_client(config: ClientConfig, http_client: Client) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(TradeDeskError::Config(format!(
                "base URL {base_url} cannot carry a request path"
            )));
        }

        let credentials = Credentials::new(config.key, &config.secret, config.passphrase)?;

        Ok(Self {
            http_client,
            base_url,
            credentials,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full URL for an endpoint
    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, endpoint))?)
    }

    /// Sign and send a request, then decode the response.
    ///
    /// The signed path is the URL's full path and query, so a base URL with a
    /// path prefix is covered by the signature too.
    pub(crate) async fn send_signed<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        let url = self.endpoint_url(endpoint)?;
        let request_path = &url[url::Position::BeforePath..];

        let (headers, body) =
            self.credentials
                .authenticate(&method, request_path, body.as_deref())?;

        debug!(method = %method, path = request_path, "sending signed request");

        let mut builder = self.http_client.request(method, url.clone());
        builder = headers.apply(builder);
        if let Some(body) = body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder.send().await?;
        decode_response(response).await
    }
}

/// Statuses up to 299 decode as `T`; anything above becomes an API error.
async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await?;
    debug!(status = status.as_u16(), len = bytes.len(), "received response");

    if status.as_u16() > 299 {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.message);
        return Err(TradeDeskError::api_error(status, message));
    }

    serde_json::from_slice(&bytes).map_err(TradeDeskError::Decode)
}

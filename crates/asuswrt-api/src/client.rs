// AsusWRT HTTP client
//
// Wraps `reqwest::Client` with the firmware's request conventions: a
// fixed device-identifying user-agent, form-encoded bodies, and the two
// fixed endpoints for batched telemetry and actions. Accessor methods
// (system info, clients, etc.) are implemented as inherent methods via
// separate files to keep this module focused on transport mechanics.

use reqwest::Method;
use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::session::Session;
use crate::transport::TransportConfig;

/// User-agent the stock Android management app sends. Some firmware
/// builds gate API responses on it, so it goes out on every request.
const USER_AGENT: &str = "asusrouter-Android-DUTUtil-1.0.0.3.58-163";

/// The firmware expects this content type on every call, including the
/// action endpoint whose body is actually JSON text.
const CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Batched telemetry endpoint: one `hook` form field, JSON out.
const TELEMETRY_PATH: &str = "/appGet.cgi";

/// Action endpoint: JSON body in, JSON out.
const ACTION_PATH: &str = "/applyapp.cgi";

/// Client for one AsusWRT router.
///
/// Construction logs in immediately; the session token then lives in
/// the cookie jar until [`logout`](AsusWrt::logout) replaces the whole
/// session. The client never re-authenticates on its own -- the
/// freshness checks in [`crate::auth`] are advisory, and a caller that
/// wants auto-refresh calls [`refresh_token`](AsusWrt::refresh_token)
/// itself before issuing requests.
///
/// No internal concurrency, retries, or caching: every method is one
/// independent round trip against the router.
pub struct AsusWrt {
    pub(crate) base_url: Url,
    pub(crate) username: String,
    pub(crate) password: SecretString,
    pub(crate) transport: TransportConfig,
    pub(crate) session: Session,
}

impl AsusWrt {
    /// Connect with the default transport (no timeout, TLS verification
    /// off -- the device class serves self-signed certificates).
    ///
    /// Performs an immediate login; transport errors propagate.
    pub async fn connect(
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
    ) -> Result<Self, Error> {
        Self::connect_with(base_url, username, password, TransportConfig::default()).await
    }

    /// Connect with a caller-supplied [`TransportConfig`].
    pub async fn connect_with(
        base_url: Url,
        username: impl Into<String>,
        password: SecretString,
        transport: TransportConfig,
    ) -> Result<Self, Error> {
        let session = Session::new(&transport)?;
        let mut client = Self {
            base_url,
            username: username.into(),
            password,
            transport,
            session,
        };
        client.refresh_token().await?;
        Ok(client)
    }

    /// The router base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Request primitives ───────────────────────────────────────────

    /// The single low-level I/O primitive all higher-level operations
    /// use: attaches the fixed user-agent and content-type headers,
    /// sends `base_url + path`, and returns the raw response for the
    /// caller to decode.
    pub async fn send_request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.base_url.join(path).map_err(Error::InvalidUrl)?;
        debug!("{} {}", method, url);

        let mut request = self
            .session
            .http()
            .request(method, url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE);

        if let Some(body) = body {
            request = request.body(body);
        }

        request.send().await.map_err(Error::Transport)
    }

    /// Query the telemetry endpoint with a combined hook string (see
    /// [`crate::hook::HookQuery`]) and parse the JSON reply.
    ///
    /// The endpoint answers every hook in the string in one round trip;
    /// batching several queries per call is the cheap path and the
    /// accessors use it throughout.
    pub async fn get(&self, hooks: &str) -> Result<Value, Error> {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("hook", hooks)
            .finish();

        let response = self
            .send_request(Method::POST, TELEMETRY_PATH, Some(body))
            .await?;
        Self::parse_json(response).await
    }

    /// Post an action payload to the apply endpoint and parse the JSON
    /// reply.
    ///
    /// The body is JSON text sent under the form content-type -- that
    /// mismatch is what the firmware expects.
    pub async fn apply(&self, payload: &impl Serialize) -> Result<Value, Error> {
        let body = serde_json::to_string(payload).map_err(Error::Serialization)?;

        let response = self
            .send_request(Method::POST, ACTION_PATH, Some(body))
            .await?;
        Self::parse_json(response).await
    }

    /// Parse a response body as JSON, keeping the raw body in the error
    /// when it isn't (the firmware answers some failures with HTML).
    async fn parse_json(response: reqwest::Response) -> Result<Value, Error> {
        let body = response.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

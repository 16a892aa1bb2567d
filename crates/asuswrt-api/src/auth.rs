// Session authentication
//
// Cookie-based login/logout against the firmware's CGI endpoints. The
// login endpoint drops an `asus_token` cookie into the jar; subsequent
// requests send it automatically. Neither login nor logout inspects the
// HTTP status -- the device's status codes are unreliable, so token
// presence is inferred from the jar after the fact.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use reqwest::Method;
use secrecy::ExposeSecret;
use tracing::debug;

use crate::client::AsusWrt;
use crate::error::Error;
use crate::session::Session;

const LOGIN_PATH: &str = "/login.cgi";
const LOGOUT_PATH: &str = "/Logout.asp";

impl AsusWrt {
    /// Whether the session currently holds an `asus_token` cookie.
    pub fn is_token_present(&self) -> bool {
        self.session.token_present(&self.base_url)
    }

    /// Whether a token is present and was issued less than 60 minutes
    /// ago. Advisory only: requests are never gated on it, and a failed
    /// timestamp comparison reports `false` rather than an error.
    pub fn is_token_fresh(&self) -> bool {
        self.is_token_present() && self.session.token_fresh_at(Utc::now())
    }

    /// Run the login flow: base64 `username:password` submitted as the
    /// `login_authorization` form field.
    ///
    /// The response status is deliberately not checked; the issuance
    /// time is stamped on any completed round trip and the token itself
    /// lands in the cookie jar as a side effect. Transport failures
    /// propagate and leave the old stamp in place.
    pub async fn refresh_token(&mut self) -> Result<(), Error> {
        let authorization = STANDARD.encode(format!(
            "{}:{}",
            self.username,
            self.password.expose_secret()
        ));
        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("login_authorization", &authorization)
            .finish();

        debug!("refreshing auth token");
        let _response = self.send_request(Method::POST, LOGIN_PATH, Some(body)).await?;

        self.session.stamp_token();
        Ok(())
    }

    /// Log out, then discard the entire session.
    ///
    /// The replacement is a brand-new unauthenticated session -- fresh
    /// cookie jar, fresh client, no token timestamp -- so any pending
    /// token and cookies are dropped unconditionally.
    pub async fn logout(&mut self) -> Result<(), Error> {
        let _response = self.send_request(Method::GET, LOGOUT_PATH, None).await?;

        self.session = Session::new(&self.transport)?;
        debug!("session discarded");
        Ok(())
    }
}

// Authenticated session state.
//
// The firmware identifies a session by an `asus_token` cookie that the
// login endpoint drops into the jar. A session is an explicit value:
// logout builds a brand-new one instead of clearing fields on the old,
// so a stale handle can never alias half-reset state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::cookie::{CookieStore, Jar};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Cookie name the login endpoint sets on success.
const TOKEN_COOKIE: &str = "asus_token";

/// Tokens are treated as stale 60 minutes after issuance. The firmware
/// does not advertise an expiry; this window matches its observed
/// behavior and is advisory only.
const TOKEN_TTL_SECS: i64 = 60 * 60;

/// One authenticated (or not-yet-authenticated) session against the
/// router: the HTTP client, its cookie jar, and the time the current
/// token was issued.
pub struct Session {
    http: reqwest::Client,
    jar: Arc<Jar>,
    issued_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Build a fresh, unauthenticated session: new jar, new client,
    /// no token timestamp.
    pub(crate) fn new(transport: &TransportConfig) -> Result<Self, Error> {
        let jar = Arc::new(Jar::default());
        let http = transport.build_client(&jar)?;
        Ok(Self {
            http,
            jar,
            issued_at: None,
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Record "now" as the token issuance time. Called after every login
    /// round trip, whatever the response said.
    pub(crate) fn stamp_token(&mut self) {
        self.issued_at = Some(Utc::now());
    }

    /// Whether the jar currently holds an `asus_token` cookie for the
    /// given base URL.
    pub(crate) fn token_present(&self, base_url: &Url) -> bool {
        let Some(header) = self.jar.cookies(base_url) else {
            return false;
        };
        let Ok(cookies) = header.to_str() else {
            return false;
        };
        cookies.split(';').any(|pair| {
            pair.trim_start()
                .strip_prefix(TOKEN_COOKIE)
                .is_some_and(|rest| rest.starts_with('='))
        })
    }

    /// Whether the token timestamp exists and `now` falls inside the
    /// freshness window. Absent timestamp or an out-of-range elapsed
    /// value yields `false`, never an error.
    pub(crate) fn token_fresh_at(&self, now: DateTime<Utc>) -> bool {
        let Some(issued) = self.issued_at else {
            return false;
        };
        let elapsed = now.signed_duration_since(issued).num_seconds();
        (0..TOKEN_TTL_SECS).contains(&elapsed)
    }
}

//! Shared HTTP plumbing for the REST adapters

use reqwest::Url;
use std::time::Duration;

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("nlc-qa/", env!("CARGO_PKG_VERSION"));

/// Basic auth credentials
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: Option<String>,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl BasicAuth {
    /// Credentials from configuration; `None` when no username is set.
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        let username = username.filter(|u| !u.is_empty())?;
        Some(Self {
            username: username.to_string(),
            password: password.map(str::to_string),
        })
    }

    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.basic_auth(&self.username, self.password.as_ref())
    }
}

/// Build the HTTP client used by an adapter.
pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Parse a base URL, moving any `user:password@` userinfo out of it.
///
/// Returns the cleaned URL and the embedded credentials, if any.
pub fn split_credentials(raw: &str) -> Result<(Url, Option<BasicAuth>), String> {
    let mut url = Url::parse(raw).map_err(|e| format!("{}: {}", raw, e))?;

    let auth = if url.username().is_empty() {
        None
    } else {
        let username = decode_userinfo(url.username());
        let password = url.password().map(decode_userinfo);
        Some(BasicAuth { username, password })
    };

    if auth.is_some() {
        // Only fails for cannot-be-a-base URLs, which have no userinfo anyway
        let _ = url.set_username("");
        let _ = url.set_password(None);
    }

    Ok((url, auth))
}

/// Append path segments to `base`, percent-encoding each one.
pub fn join_segments(base: &Url, segments: &[&str]) -> Option<Url> {
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().ok()?;
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    Some(url)
}

/// Decode a percent-encoded userinfo component.
fn decode_userinfo(component: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(component.as_bytes())).into_owned()
}

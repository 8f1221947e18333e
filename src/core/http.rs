use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING};
use reqwest::redirect::Policy;
use reqwest::Client;

pub const DEFAULT_USER_AGENT: &str = "modpack-server/0.1.0";

/// Shared client for mod, modpack and installer downloads.
///
/// Redirects are followed because the mod host answers the generic
/// download endpoint with a redirect to the CDN file.
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));

    Client::builder()
        .user_agent(user_agent)
        .default_headers(default_headers)
        .redirect(Policy::limited(10))
        .connect_timeout(Duration::from_secs(30))
        .build()
}

pub mod api_structs;

use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client, ClientBuilder, Response, StatusCode
};
use tracing::debug;

use crate::{
    api::api_structs::{BanchoUser, RippleUserFull, UserBestScore},
    error::UpstreamError
};

pub const RIPPLE_BASE_URL: &str = "https://ripple.moe/api";
pub const BANCHO_BASE_URL: &str = "https://osu.ppy.sh/api";

fn client() -> Client {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));

    ClientBuilder::new()
        .default_headers(headers)
        .build()
        .expect("Valid client configuration")
}

fn http(provider: &'static str) -> impl Fn(reqwest::Error) -> UpstreamError {
    move |source| UpstreamError::Http { provider, source }
}

async fn check_status(provider: &'static str, response: Response) -> Result<Response, UpstreamError> {
    if !response.status().is_success() {
        return Err(UpstreamError::Status {
            provider,
            status: response.status()
        });
    }

    Ok(response)
}

/// Read-only client for the Ripple score/profile provider. Failures are not
/// retried; a non-success response is fatal for the current command.
pub struct RippleClient {
    client: Client,
    base_url: String
}

impl RippleClient {
    pub fn new(base_url: impl Into<String>) -> RippleClient {
        RippleClient {
            client: client(),
            base_url: base_url.into()
        }
    }

    pub async fn get_user_full(&self, user_id: i32) -> Result<RippleUserFull, UpstreamError> {
        debug!(user_id, "fetching ripple profile");

        let response = self
            .client
            .get(format!("{}/v1/users/full", self.base_url))
            .query(&[("id", user_id)])
            .send()
            .await
            .map_err(http("ripple"))?;

        check_status("ripple", response)
            .await?
            .json()
            .await
            .map_err(http("ripple"))
    }

    pub async fn get_user_best(&self, user_id: i32, limit: usize) -> Result<Vec<UserBestScore>, UpstreamError> {
        debug!(user_id, limit, "fetching ripple top scores");

        let response = self
            .client
            .get(format!("{}/get_user_best", self.base_url))
            .query(&[("u", user_id.to_string()), ("limit", limit.to_string()), ("relax", "0".to_string())])
            .send()
            .await
            .map_err(http("ripple"))?;

        check_status("ripple", response)
            .await?
            .json()
            .await
            .map_err(http("ripple"))
    }
}

/// Read-only client for the Bancho (osu!) v1 api.
pub struct BanchoClient {
    client: Client,
    base_url: String,
    api_key: String
}

impl BanchoClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> BanchoClient {
        BanchoClient {
            client: client(),
            base_url: base_url.into(),
            api_key: api_key.into()
        }
    }

    /// Resolves a profile name or id. Bancho wraps single users in a list;
    /// an empty list is treated as a non-success response.
    pub async fn get_user(&self, profile: &str) -> Result<BanchoUser, UpstreamError> {
        debug!(profile, "fetching bancho profile");

        let response = self
            .client
            .get(format!("{}/get_user", self.base_url))
            .query(&self.params(profile))
            .send()
            .await
            .map_err(http("bancho"))?;

        let users: Vec<BanchoUser> = check_status("bancho", response)
            .await?
            .json()
            .await
            .map_err(http("bancho"))?;

        users.into_iter().next().ok_or(UpstreamError::Status {
            provider: "bancho",
            status: StatusCode::NOT_FOUND
        })
    }

    pub async fn get_user_best(&self, profile: &str) -> Result<Vec<UserBestScore>, UpstreamError> {
        debug!(profile, "fetching bancho top scores");

        let response = self
            .client
            .get(format!("{}/get_user_best", self.base_url))
            .query(&self.params(profile))
            .send()
            .await
            .map_err(http("bancho"))?;

        check_status("bancho", response)
            .await?
            .json()
            .await
            .map_err(http("bancho"))
    }

    fn params(&self, profile: &str) -> Vec<(&'static str, String)> {
        vec![
            ("u", profile.to_string()),
            ("k", self.api_key.clone()),
            ("m", "0".to_string()),
            ("limit", "100".to_string()),
        ]
    }
}

//! The boundary to the remote command-registration API.
//!
//! The registration sync only talks to the remote catalog through the
//! [`CommandsApi`] trait; [`DiscordHttp`] is its production implementation,
//! carrying the OAuth client-credentials token cache and the base URL.

use crate::error::RegisterError;
use crate::option::CommandSpec;
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// The default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://discord.com/api/v10";
/// The OAuth scope required to update the command catalog.
pub const REGISTRATION_SCOPE: &str = "applications.commands.update";

/// Where a command set is registered: the global catalog or one guild's.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandScope {
    Global,
    Guild(String),
}

impl CommandScope {
    fn url(&self, base_url: &str, application_id: &str) -> String {
        match self {
            Self::Global => format!("{}/applications/{}/commands", base_url, application_id),
            Self::Guild(guild_id) => format!(
                "{}/applications/{}/guilds/{}/commands",
                base_url, application_id, guild_id
            ),
        }
    }
}

/// The rate-limit headers carried by a registration response.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateLimit {
    /// Requests remaining in the current window.
    pub remaining: u64,
    /// Unix timestamp at which the window resets.
    pub reset: f64,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        fn parse<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
            headers.get(name)?.to_str().ok()?.parse().ok()
        }

        Some(Self {
            remaining: parse(headers, "X-RateLimit-Remaining")?,
            reset: parse(headers, "X-RateLimit-Reset")?,
        })
    }

    /// How long to wait before the next request, zero unless the window is
    /// exhausted.
    pub fn wait_time(&self) -> Duration {
        if self.remaining > 0 {
            return Duration::ZERO;
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();

        Duration::from_secs_f64((self.reset - now).max(0.0))
    }
}

/// Honors the rate-limit headers of the previous call before the next one.
pub async fn cooldown(rate_limit: Option<RateLimit>) {
    if let Some(rate_limit) = rate_limit {
        let wait = rate_limit.wait_time();
        if !wait.is_zero() {
            warn!("Rate limited, waiting {} seconds", wait.as_secs());
            tokio::time::sleep(wait).await;
        }
    }
}

/// A payload returned by the remote API together with the rate-limit state
/// read from its response headers.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub value: T,
    pub rate_limit: Option<RateLimit>,
}

/// The remote command-catalog operations the registration sync needs.
#[async_trait]
pub trait CommandsApi: Send + Sync {
    /// Lists the commands currently registered at the scope.
    async fn fetch_commands(
        &self,
        scope: &CommandScope,
    ) -> Result<ApiResponse<Vec<CommandSpec>>, RegisterError>;

    /// Creates one command, returning it with its remote id assigned.
    async fn create_command(
        &self,
        scope: &CommandScope,
        command: &CommandSpec,
    ) -> Result<ApiResponse<CommandSpec>, RegisterError>;

    /// Deletes one command by its remote id.
    async fn delete_command(
        &self,
        scope: &CommandScope,
        command_id: &str,
    ) -> Result<ApiResponse<()>, RegisterError>;

    /// Replaces the whole catalog at the scope with the given set.
    async fn overwrite_commands(
        &self,
        scope: &CommandScope,
        commands: &[CommandSpec],
    ) -> Result<ApiResponse<Vec<CommandSpec>>, RegisterError>;
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct BearerToken {
    access_token: String,
    expires_on: SystemTime,
}

/// The reqwest-backed client for the registration API.
pub struct DiscordHttp {
    http: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<BearerToken>>,
}

impl DiscordHttp {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token: Mutex::new(None),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn api_base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a valid bearer token, exchanging the client credentials when
    /// none is cached or the cached one expired.
    pub async fn bearer_token(&self) -> Result<String, RegisterError> {
        {
            let token = self.token.lock();
            if let Some(token) = token.as_ref() {
                if token.expires_on > SystemTime::now() {
                    return Ok(token.access_token.clone());
                }
            }
        }

        debug!("Fetching a new registration bearer token");
        let response = self
            .http
            .post(format!("{}/oauth2/token", self.base_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", REGISTRATION_SCOPE),
            ])
            .send()
            .await?;

        let response = check_status(response, None).await?;
        let token: TokenResponse = response.json().await?;
        let access_token = token.access_token.clone();

        // refresh halfway through the lease so a token never expires mid-sync
        *self.token.lock() = Some(BearerToken {
            access_token: token.access_token,
            expires_on: SystemTime::now() + Duration::from_secs(token.expires_in / 2),
        });

        Ok(access_token)
    }

    async fn authorized(&self, request: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, RegisterError> {
        let token = self.bearer_token().await?;
        Ok(request.bearer_auth(token))
    }
}

async fn check_status(
    response: reqwest::Response,
    command: Option<&str>,
) -> Result<reqwest::Response, RegisterError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(RegisterError::Failed {
        command: command.map(str::to_string),
        status: status.as_u16(),
        body: response.text().await.unwrap_or_default(),
    })
}

#[async_trait]
impl CommandsApi for DiscordHttp {
    async fn fetch_commands(
        &self,
        scope: &CommandScope,
    ) -> Result<ApiResponse<Vec<CommandSpec>>, RegisterError> {
        let url = scope.url(&self.base_url, &self.client_id);
        let request = self.authorized(self.http.get(url)).await?;
        let response = check_status(request.send().await?, None).await?;

        let rate_limit = RateLimit::from_headers(response.headers());
        Ok(ApiResponse {
            value: response.json().await?,
            rate_limit,
        })
    }

    async fn create_command(
        &self,
        scope: &CommandScope,
        command: &CommandSpec,
    ) -> Result<ApiResponse<CommandSpec>, RegisterError> {
        let url = scope.url(&self.base_url, &self.client_id);
        let request = self.authorized(self.http.post(url).json(command)).await?;
        let response = check_status(request.send().await?, Some(&command.name)).await?;

        let rate_limit = RateLimit::from_headers(response.headers());
        Ok(ApiResponse {
            value: response.json().await?,
            rate_limit,
        })
    }

    async fn delete_command(
        &self,
        scope: &CommandScope,
        command_id: &str,
    ) -> Result<ApiResponse<()>, RegisterError> {
        let url = format!("{}/{}", scope.url(&self.base_url, &self.client_id), command_id);
        let request = self.authorized(self.http.delete(url)).await?;
        let response = check_status(request.send().await?, None).await?;

        let rate_limit = RateLimit::from_headers(response.headers());
        Ok(ApiResponse {
            value: (),
            rate_limit,
        })
    }

    async fn overwrite_commands(
        &self,
        scope: &CommandScope,
        commands: &[CommandSpec],
    ) -> Result<ApiResponse<Vec<CommandSpec>>, RegisterError> {
        let url = scope.url(&self.base_url, &self.client_id);
        let request = self.authorized(self.http.put(url).json(&commands)).await?;
        let response = check_status(request.send().await?, None).await?;

        let rate_limit = RateLimit::from_headers(response.headers());
        Ok(ApiResponse {
            value: response.json().await?,
            rate_limit,
        })
    }
}

//! Federated sign-in against Google via the OAuth 2.0 device-authorization
//! flow: no local callback server, the user approves in a browser and the CLI
//! polls for the result.

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use skycast_core::{Account, IdentityGateway};

const DEVICE_CODE_URL: &str = "https://oauth2.googleapis.com/device/code";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";
const SCOPES: &str = "email profile";

const CLIENT_ID_ENV: &str = "SKYCAST_GOOGLE_CLIENT_ID";

#[derive(Debug, Deserialize)]
struct DeviceCodeResponse {
    device_code: String,
    user_code: String,
    verification_url: String,
    expires_in: u64,
    interval: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenPollResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: String,
    name: Option<String>,
}

/// Identity gateway backed by Google's device flow.
#[derive(Debug)]
pub struct GoogleDeviceGateway {
    client_id: String,
    http: reqwest::Client,
}

impl GoogleDeviceGateway {
    pub fn from_env() -> Result<Self> {
        let client_id = std::env::var(CLIENT_ID_ENV).map_err(|_| {
            anyhow!(
                "No OAuth client id found.\n\
                 Hint: set {CLIENT_ID_ENV} to your Google OAuth client id."
            )
        })?;

        Ok(Self {
            client_id,
            http: reqwest::Client::new(),
        })
    }

    async fn request_device_code(&self) -> Result<DeviceCodeResponse> {
        let response = self
            .http
            .post(DEVICE_CODE_URL)
            .form(&[("client_id", self.client_id.as_str()), ("scope", SCOPES)])
            .send()
            .await
            .context("Failed to send device code request")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            bail!("Device code request failed: {error_text}");
        }

        response
            .json::<DeviceCodeResponse>()
            .await
            .context("Failed to parse device code response")
    }

    async fn poll_for_token(&self, device: &DeviceCodeResponse) -> Result<String> {
        let mut interval = Duration::from_secs(device.interval.unwrap_or(5));
        let deadline = tokio::time::Instant::now() + Duration::from_secs(device.expires_in);

        loop {
            if tokio::time::Instant::now() >= deadline {
                bail!("Sign-in timed out before the device code was approved");
            }
            tokio::time::sleep(interval).await;

            let response = self
                .http
                .post(TOKEN_URL)
                .form(&[
                    ("client_id", self.client_id.as_str()),
                    ("device_code", device.device_code.as_str()),
                    ("grant_type", DEVICE_GRANT_TYPE),
                ])
                .send()
                .await
                .context("Failed to poll token endpoint")?;

            let poll: TokenPollResponse = response
                .json()
                .await
                .context("Failed to parse token response")?;

            if let Some(token) = poll.access_token {
                return Ok(token);
            }

            match poll.error.as_deref() {
                Some("authorization_pending") => {}
                Some("slow_down") => interval += Duration::from_secs(5),
                Some(other) => bail!("Sign-in failed: {other}"),
                None => bail!("Token endpoint returned neither a token nor an error"),
            }
        }
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<UserInfo> {
        let response = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(access_token)
            .send()
            .await
            .context("Failed to fetch user info")?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            bail!("User info request failed: {error_text}");
        }

        response
            .json::<UserInfo>()
            .await
            .context("Failed to parse user info")
    }
}

#[async_trait]
impl IdentityGateway for GoogleDeviceGateway {
    async fn sign_in(&self) -> Result<Account> {
        let device = self.request_device_code().await?;

        println!();
        println!("To sign in, open {} in a browser", device.verification_url);
        println!("and enter the code: {}", device.user_code);
        println!();

        let access_token = self.poll_for_token(&device).await?;
        let info = self.fetch_user_info(&access_token).await?;

        tracing::info!(email = %info.email, "federated sign-in completed");
        Ok(Account {
            email: info.email,
            display_name: info.name,
        })
    }

    async fn sign_out(&self) -> Result<()> {
        // No token is kept after sign-in, so there is nothing to revoke on
        // the provider side.
        tracing::info!("federated sign-out completed");
        Ok(())
    }
}

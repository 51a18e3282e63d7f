//! Login validation and the federated sign-in boundary.
//!
//! The email/password rules exist for form feedback only: passing them does
//! not authenticate anything. Only federated sign-in through an
//! [`IdentityGateway`] establishes a session.

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;

use crate::error::ValidationError;
use crate::session::SessionStore;

const MIN_PASSWORD_LEN: usize = 6;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9][A-Za-z0-9.-]*\.[A-Za-z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email_regex().is_match(email)
}

pub fn is_valid_password(password: &str) -> bool {
    !password.is_empty() && password.chars().count() >= MIN_PASSWORD_LEN
}

/// Validate the login form. Pure function of the two strings; reports the
/// first failed rule, email before password.
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if !is_valid_email(email) {
        return Err(ValidationError::Email);
    }
    if !is_valid_password(password) {
        return Err(ValidationError::Password);
    }
    Ok(())
}

/// Account details reported back by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub email: String,
    pub display_name: Option<String>,
}

/// External federated sign-in collaborator (account selection + token
/// exchange). Opaque to this crate.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    async fn sign_in(&self) -> Result<Account>;
    async fn sign_out(&self) -> Result<()>;
}

/// Delegate sign-in to the gateway; on success persist the session flag.
pub async fn sign_in(gateway: &dyn IdentityGateway, store: &dyn SessionStore) -> Result<Account> {
    let account = gateway.sign_in().await?;
    store.set_signed_in(true)?;
    tracing::info!(email = %account.email, "signed in");
    Ok(account)
}

/// Delegate sign-out to the gateway and clear the session flag.
///
/// The flag is cleared even when the gateway reports an error, so a broken
/// provider can never trap the user in a signed-in state.
pub async fn sign_out(gateway: &dyn IdentityGateway, store: &dyn SessionStore) -> Result<()> {
    let result = gateway.sign_out().await;
    store.set_signed_in(false)?;
    tracing::info!("signed out");
    result
}

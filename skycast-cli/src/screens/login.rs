//! Login screen: local form validation for feedback, federated sign-in for
//! the actual session.

use anyhow::Result;
use skycast_core::{IdentityGateway, SessionStore, auth};

pub async fn run(store: &dyn SessionStore, gateway: &dyn IdentityGateway) -> Result<()> {
    // Already authenticated: skip straight to the main screen.
    if store.is_signed_in() {
        println!("Already signed in.");
        return Ok(());
    }

    // Form feedback only. Passing validation does not sign anyone in; the
    // session comes from the federated flow below.
    let email = inquire::Text::new("Email:").prompt()?;
    let password = inquire::Password::new("Password:")
        .without_confirmation()
        .prompt()?;

    match auth::validate_login(&email, &password) {
        Ok(()) => println!("Credentials look valid."),
        Err(e) => println!("{e}"),
    }

    let proceed = inquire::Confirm::new("Continue with Google sign-in?")
        .with_default(true)
        .prompt()?;
    if !proceed {
        return Ok(());
    }

    match auth::sign_in(gateway, store).await {
        Ok(account) => {
            println!("Signed in as {}.", account.email);
            Ok(())
        }
        Err(e) => {
            // Mirror the form: failures are shown, never retried.
            println!("Sign-in failed: {e}");
            Ok(())
        }
    }
}

pub async fn logout(store: &dyn SessionStore, gateway: &dyn IdentityGateway) -> Result<()> {
    if !store.is_signed_in() {
        println!("Not signed in.");
        return Ok(());
    }

    let confirmed = inquire::Confirm::new("Are you sure you want to log out?")
        .with_default(false)
        .prompt()?;
    if !confirmed {
        return Ok(());
    }

    match auth::sign_out(gateway, store).await {
        Ok(()) => println!("Signed out."),
        Err(e) => println!("Signed out locally, but the provider reported: {e}"),
    }
    Ok(())
}

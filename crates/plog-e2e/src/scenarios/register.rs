//! Registration flows.

use super::verify::verify_email_address_for;
use crate::assertion::ensure_eq;
use crate::driver::BrowserDriver;
use crate::fixture::{Registration, SuiteFixture};
use crate::pages::RegisterPage;
use crate::result::E2eResult;
use crate::session::Session;

/// Address that belongs to nobody, used to provoke the duplicate user id error
const UNUSED_EMAIL: &str = "another@mailbot.NET";

async fn register<D: BrowserDriver>(
    session: &Session<D>,
    registration: &Registration,
) -> E2eResult<()> {
    RegisterPage.submit(session, registration).await?;
    session.wait_for_loading().await?;
    let message = RegisterPage.read_message(session).await?;
    ensure_eq(
        message.as_str(),
        RegisterPage::success_message(&registration.email).as_str(),
        "registration message",
    )
}

/// Register user one, verify it, then register user two
pub async fn register_success<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    let user_one = fixture.user_one.clone();
    register(session, &user_one).await?;
    verify_email_address_for(session, fixture, &user_one.email.to_lowercase()).await?;

    let user_two = fixture.user_two.clone();
    register(session, &user_two).await
}

/// Registering user one again trips both uniqueness checks
pub async fn already_registered<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    tracing::info!("case: email address already registered");
    RegisterPage.submit(session, &fixture.user_one).await?;
    session.wait_for_loading().await?;
    let message = session.text(&RegisterPage::email_error()).await?;
    ensure_eq(
        message.as_str(),
        RegisterPage::EMAIL_TAKEN,
        "email address error",
    )?;

    tracing::info!("case: user id already registered");
    let same_user_id = fixture.user_one.clone().with_email(UNUSED_EMAIL);
    RegisterPage.submit(session, &same_user_id).await?;
    session.wait_for_loading().await?;
    let message = session.text(&RegisterPage::user_id_error()).await?;
    ensure_eq(message.as_str(), RegisterPage::USER_ID_TAKEN, "user id error")
}

//! Password reset request flow.

use crate::assertion::ensure_eq;
use crate::driver::BrowserDriver;
use crate::email_link::{EmailLink, LinkKind};
use crate::fixture::SuiteFixture;
use crate::pages::PasswordPage;
use crate::result::E2eResult;
use crate::session::Session;

/// Request a reset for user one and pick up the reset link from the mailbox
pub async fn request<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    let email = fixture.user_one.email.clone();
    let message = PasswordPage.request_reset(session, &email).await?;
    ensure_eq(
        message.as_str(),
        PasswordPage::requested_message(&email).as_str(),
        "reset request message",
    )?;

    let body = session.mailbox().take(&email).await?;
    let link = EmailLink::parse(LinkKind::Reset, &body)?;
    tracing::info!(email = %link.email, "reset link received");
    fixture.last_link = Some(link);
    Ok(())
}

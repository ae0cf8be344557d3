//! Email verification flows.

use crate::assertion::ensure_eq;
use crate::driver::BrowserDriver;
use crate::email_link::{EmailLink, LinkKind};
use crate::fixture::SuiteFixture;
use crate::pages::VerifyPage;
use crate::result::E2eResult;
use crate::session::Session;

/// Read the verification mail for `address`, follow its link and expect success
pub async fn verify_email_address_for<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
    address: &str,
) -> E2eResult<()> {
    let body = session.mailbox().take(address).await?;
    let link = EmailLink::parse(LinkKind::Verify, &body)?;
    ensure_eq(
        link.email.as_str(),
        address,
        "email address in verification link",
    )?;

    let message = VerifyPage::new(&link.email, &link.token)
        .visit(session)
        .await?;
    fixture.last_link = Some(link);
    ensure_eq(message.as_str(), VerifyPage::SUCCESS, "verification message")
}

/// Malformed addresses and tokens are refused with the server's reason
pub async fn bad_address<D: BrowserDriver>(session: &Session<D>) -> E2eResult<()> {
    for (index, case) in SuiteFixture::bad_verify_cases().iter().enumerate() {
        tracing::info!(case = index, email = %case.email, token = %case.token, "verify case");
        let message = VerifyPage::new(&case.email, &case.token)
            .visit(session)
            .await?;
        ensure_eq(
            message.as_str(),
            case.expected_message.as_str(),
            &format!("case {index} verification message"),
        )?;
    }
    Ok(())
}

/// Verify the second registered user
pub async fn second_user<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    let address = fixture.user_two.email.to_lowercase();
    verify_email_address_for(session, fixture, &address).await
}

//! Login table and logout flows, plus the login helpers other flows reuse.

use crate::assertion::{ensure_eq, SoftAssertions};
use crate::driver::BrowserDriver;
use crate::fixture::{Credentials, SuiteFixture, BAD_SESSION_TOKEN, PAGES_NEEDING_LOGIN};
use crate::page_object::PageObject;
use crate::pages::{AlbumPage, LoginPage};
use crate::result::E2eResult;
use crate::session::{Session, TokenState};

/// Fail unless the login form shows up
pub async fn expect_on_login_page<D: BrowserDriver>(session: &Session<D>) -> E2eResult<()> {
    session.expect_page(&LoginPage).await
}

/// Fail unless the session token is in `expected` state
pub async fn expect_token<D: BrowserDriver>(
    session: &Session<D>,
    expected: TokenState,
) -> E2eResult<()> {
    let state = session.session_token().await?;
    ensure_eq(&state, &expected, "session token")
}

/// Open the login page, submit `credentials` and wait for the app to settle
pub async fn login<D: BrowserDriver>(
    session: &Session<D>,
    credentials: &Credentials,
) -> E2eResult<()> {
    LoginPage.open(session).await?;
    expect_on_login_page(session).await?;
    LoginPage.submit(session, credentials).await?;
    session.wait_for_loading().await?;
    Ok(())
}

/// Log out through the album page link
pub async fn logout<D: BrowserDriver>(session: &Session<D>) -> E2eResult<()> {
    expect_token(session, TokenState::Present).await?;
    session.goto(&AlbumPage.route()).await?;
    AlbumPage.logout(session).await?;
    expect_on_login_page(session).await?;
    expect_token(session, TokenState::Absent).await
}

/// Rejected credentials leave no token; the valid pair logs in
pub async fn login_table<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    let cases = fixture.login_cases();
    for case in &cases {
        case.validate()?;
    }

    let mut soft = SoftAssertions::new();
    for (index, case) in cases.iter().enumerate() {
        tracing::info!(
            case = index,
            label = case.label,
            identifier = %case.credentials.identifier,
            "login case"
        );
        login(session, &case.credentials).await?;

        if let Some(expected) = case.expected_message {
            let message = LoginPage.read_message(session).await?;
            soft.assert_eq(
                message.as_str(),
                expected,
                &format!("case {index} ({}) login message", case.label),
            );
        }

        let expected = if case.expect_token {
            TokenState::Present
        } else {
            TokenState::Absent
        };
        expect_token(session, expected).await?;
    }
    soft.into()
}

/// Logout, protected pages while logged out, and automatic login
pub async fn logout_flow<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    tracing::info!("case: happy path logout");
    logout(session).await?;

    let mut soft = SoftAssertions::new();
    for route in PAGES_NEEDING_LOGIN {
        tracing::info!(route, "case: page needing login");
        session.open(route).await?;
        session.expect_route(LoginPage::REDIRECT_ROUTE).await?;

        let message = LoginPage.read_message(session).await?;
        soft.assert_eq(message.as_str(), "", &format!("login message after {route}"));
        let token = session.local_storage_token().await?;
        soft.assert_none(&token, &format!("localStorage SessionToken after {route}"));
    }

    tracing::info!("case: automatic login with a valid token");
    login(session, &fixture.login).await?;
    expect_token(session, TokenState::Present).await?;
    session.open(&AlbumPage.route()).await?;
    session.expect_route(&AlbumPage.route()).await?;

    tracing::info!("case: automatic login with a bad token");
    session.set_session_cookie(BAD_SESSION_TOKEN).await?;
    session.open(&AlbumPage.route()).await?;
    expect_on_login_page(session).await?;
    let message = LoginPage.read_message(session).await?;
    soft.assert_eq(message.as_str(), "", "login message after bad session token");

    soft.into()
}

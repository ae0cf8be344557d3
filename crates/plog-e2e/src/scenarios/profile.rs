//! Profile editing flows.
//!
//! The profile form echoes values exactly as submitted until the page is
//! reloaded; after a reload the server shows the user id and email address
//! lower-cased. The fixture's expectation follows that.

use super::login::{expect_on_login_page, logout};
use super::verify::verify_email_address_for;
use crate::driver::BrowserDriver;
use crate::fixture::{ProfileExpectation, ProfileUpdate, SuiteFixture};
use crate::page_object::PageObject;
use crate::pages::{LoginPage, ProfilePage};
use crate::result::E2eResult;
use crate::session::Session;

const NEW_USER_ID: &str = "Selenium-Changed";
const NEW_FIRST_NAME: &str = "NewFirstName";
const NEW_LAST_NAME: &str = "NewLastName";
const NEW_EMAIL: &str = "bigdeal@little-planet.com";
const NEW_SECRET: &str = "New-Password-1234";

/// Load the profile, submit `update` and check the saved form
async fn change<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
    update: &ProfileUpdate,
) -> E2eResult<()> {
    session.goto_page(&ProfilePage).await?;
    ProfilePage.expect_loaded(session, &fixture.profile).await?;
    ProfilePage.submit(session, update).await?;
    fixture.profile.apply(update);
    ProfilePage.expect_saved(session).await?;
    ProfilePage.expect_loaded(session, &fixture.profile).await
}

/// Open the profile while logged out, log in, land on the profile
async fn login_through_profile<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &SuiteFixture,
) -> E2eResult<()> {
    session.open(&ProfilePage.route()).await?;
    expect_on_login_page(session).await?;
    LoginPage.submit(session, &fixture.login).await?;
    ProfilePage.expect_loaded(session, &fixture.profile).await
}

/// The profile requires a login and shows the registered values
pub async fn needs_login<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    login_through_profile(session, fixture).await
}

/// Change the user id; it becomes the login identifier
pub async fn change_user_id<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    change(session, fixture, &ProfileUpdate::user_id(NEW_USER_ID)).await?;
    fixture.login.identifier = NEW_USER_ID.to_string();
    Ok(())
}

/// Change the first name
pub async fn change_first_name<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    fixture.profile = fixture.profile.clone().normalized();
    change(session, fixture, &ProfileUpdate::first_name(NEW_FIRST_NAME)).await
}

/// Change the last name
pub async fn change_last_name<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    change(session, fixture, &ProfileUpdate::last_name(NEW_LAST_NAME)).await
}

/// Change the email address and verify the new one
pub async fn change_email<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    change(session, fixture, &ProfileUpdate::email(NEW_EMAIL)).await?;
    verify_email_address_for(session, fixture, NEW_EMAIL).await
}

/// Change the password, log out and log back in with it
pub async fn change_password<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    change(session, fixture, &ProfileUpdate::secret(NEW_SECRET)).await?;
    fixture.login.identifier = fixture.profile.user_id.clone();
    fixture.login.secret = NEW_SECRET.to_string();

    logout(session).await?;
    login_through_profile(session, fixture).await
}

/// Restore user one's registration values, re-verify, and log in again
pub async fn change_all_back<D: BrowserDriver>(
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    let original = fixture.user_one.clone();
    let update = ProfileUpdate::from(&original);

    session.goto_page(&ProfilePage).await?;
    ProfilePage.expect_loaded(session, &fixture.profile).await?;
    ProfilePage.submit(session, &update).await?;
    fixture.profile = ProfileExpectation::as_typed(&original);
    ProfilePage.expect_saved(session).await?;
    ProfilePage.expect_loaded(session, &fixture.profile).await?;
    verify_email_address_for(session, fixture, &original.email.to_lowercase()).await?;

    logout(session).await?;
    fixture.login = original.credentials();
    fixture.profile = ProfileExpectation::stored(&original);
    login_through_profile(session, fixture).await
}

use crate::assertion::ensure_eq;
use crate::driver::BrowserDriver;
use crate::fixture::{ProfileExpectation, ProfileUpdate};
use crate::locator::Selector;
use crate::page_object::PageObject;
use crate::result::E2eResult;
use crate::session::Session;

/// Profile editing form; requires a login
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfilePage;

impl ProfilePage {
    /// Message after a successful save
    pub const SAVE_SUCCESS: &'static str = "Save successful";

    const PAGE_ELEMENTS: [&'static str; 9] = [
        "editProfileForm",
        "Message",
        "UserId",
        "FirstName",
        "LastName",
        "EmailAddr",
        "ClearPassword",
        "ConfirmPassword",
        "SaveProfileButton",
    ];

    /// Wait for the page, then compare every field with `expected`
    pub async fn expect_loaded<D: BrowserDriver>(
        &self,
        session: &Session<D>,
        expected: &ProfileExpectation,
    ) -> E2eResult<()> {
        session.wait_for_loading().await?;
        session.require_named(&Self::PAGE_ELEMENTS).await?;
        for (name, value) in expected.fields() {
            let actual = session.field_value(name).await?;
            ensure_eq(actual.as_str(), value, &format!("profile field {name}"))?;
        }
        Ok(())
    }

    /// Fill the non-empty fields of `update` and press save.
    ///
    /// Does not wait after the click.
    pub async fn submit<D: BrowserDriver>(
        &self,
        session: &Session<D>,
        update: &ProfileUpdate,
    ) -> E2eResult<()> {
        session.wait_for_loading().await?;
        session.require_named(&Self::PAGE_ELEMENTS[2..]).await?;
        session.fill_named(&update.fields()).await?;
        session.click(&Selector::name("SaveProfileButton")).await
    }

    /// Wait for the save to finish and check the success message
    pub async fn expect_saved<D: BrowserDriver>(&self, session: &Session<D>) -> E2eResult<()> {
        session.wait_for_loading().await?;
        let message = session.text(&Selector::name("Message")).await?;
        ensure_eq(message.as_str(), Self::SAVE_SUCCESS, "profile save message")
    }
}

impl PageObject for ProfilePage {
    fn route(&self) -> String {
        "/#/profile".to_string()
    }

    fn marker(&self) -> Selector {
        Selector::name("editProfileForm")
    }

    fn page_name(&self) -> &'static str {
        "profile"
    }
}

use crate::driver::BrowserDriver;
use crate::locator::Selector;
use crate::page_object::PageObject;
use crate::result::E2eResult;
use crate::session::Session;

/// Password reset request form
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPage;

impl PasswordPage {
    /// Message after a reset request for `email`
    #[must_use]
    pub fn requested_message(email: &str) -> String {
        format!("Check email ({email}) for a reset token")
    }

    /// Submit a reset request and return the resulting message
    pub async fn request_reset<D: BrowserDriver>(
        &self,
        session: &Session<D>,
        email: &str,
    ) -> E2eResult<String> {
        session.goto(&self.route()).await?;
        session
            .require_named(&["Message", "EmailAddr", "ResetPasswordButton"])
            .await?;
        session.fill(&Selector::name("EmailAddr"), email).await?;
        session.click(&self.marker()).await?;
        session.wait_for_loading().await?;
        session.text(&super::message_selector()).await
    }
}

impl PageObject for PasswordPage {
    fn route(&self) -> String {
        "/#/password".to_string()
    }

    fn marker(&self) -> Selector {
        Selector::name("ResetPasswordButton")
    }

    fn page_name(&self) -> &'static str {
        "password"
    }
}

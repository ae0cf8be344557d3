use crate::driver::BrowserDriver;
use crate::locator::Selector;
use crate::page_object::PageObject;
use crate::result::E2eResult;
use crate::session::Session;

/// Email verification landing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPage {
    email: String,
    token: String,
}

impl VerifyPage {
    /// Message after a successful verification
    pub const SUCCESS: &'static str = "Success! Next step: Login and enjoy";

    /// Page for one email/token pair
    #[must_use]
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
        }
    }

    /// Visit the link and return the resulting message
    pub async fn visit<D: BrowserDriver>(&self, session: &Session<D>) -> E2eResult<String> {
        session.goto(&self.route()).await?;
        session.text(&self.marker()).await
    }
}

impl PageObject for VerifyPage {
    fn route(&self) -> String {
        format!("/#/verify/{}/token/{}", self.email, self.token)
    }

    fn marker(&self) -> Selector {
        super::message_selector()
    }

    fn page_name(&self) -> &'static str {
        "verify"
    }
}

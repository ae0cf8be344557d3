use crate::driver::BrowserDriver;
use crate::fixture::Credentials;
use crate::locator::Selector;
use crate::page_object::PageObject;
use crate::result::E2eResult;
use crate::session::Session;

/// Login form at the application root
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginPage;

impl LoginPage {
    /// Message shown after rejected credentials
    pub const AUTH_FAILED: &'static str = "Authentication failed";

    /// Route the application redirects to when a login is required
    pub const REDIRECT_ROUTE: &'static str = "/#/login";

    /// Login message paragraph
    #[must_use]
    pub fn message() -> Selector {
        Selector::tag_name("p", "LoginMessage")
    }

    /// Open the login page without waiting
    pub async fn open<D: BrowserDriver>(&self, session: &Session<D>) -> E2eResult<()> {
        session.open(&self.route()).await
    }

    /// Fill the form and press the login button; does not wait afterwards
    pub async fn submit<D: BrowserDriver>(
        &self,
        session: &Session<D>,
        credentials: &Credentials,
    ) -> E2eResult<()> {
        session
            .require_named(&["UserIdentifier", "ClearPassword", "LoginButton"])
            .await?;
        session
            .fill_named(&[
                ("UserIdentifier", credentials.identifier.as_str()),
                ("ClearPassword", credentials.secret.as_str()),
            ])
            .await?;
        session.click(&Selector::name("LoginButton")).await
    }

    /// Current login message
    pub async fn read_message<D: BrowserDriver>(&self, session: &Session<D>) -> E2eResult<String> {
        session.text(&Self::message()).await
    }
}

impl PageObject for LoginPage {
    fn route(&self) -> String {
        "/".to_string()
    }

    fn marker(&self) -> Selector {
        Selector::css("form[name=\"loginForm\"]")
    }

    fn page_name(&self) -> &'static str {
        "login"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuiteConfig;
    use crate::driver::{MockDriver, MockElement};

    #[tokio::test]
    async fn test_submit_fills_and_clicks() {
        let session = Session::new(MockDriver::new(), SuiteConfig::default());
        for name in ["UserIdentifier", "ClearPassword", "LoginButton"] {
            session
                .driver()
                .add_element(Selector::name(name).to_string(), MockElement::default());
        }
        LoginPage
            .submit(&session, &Credentials::new("Selenium-One", "sldkfjeowir9"))
            .await
            .unwrap();

        let history = session.driver().history();
        assert!(history.contains(&"send_keys:[name=\"UserIdentifier\"]=Selenium-One".to_string()));
        assert!(history.contains(&"clear:[name=\"ClearPassword\"]".to_string()));
        assert_eq!(history.last().unwrap(), "click:[name=\"LoginButton\"]");
    }

    #[test]
    fn test_selectors() {
        assert_eq!(LoginPage.marker().as_str(), "form[name=\"loginForm\"]");
        assert_eq!(LoginPage::message().as_str(), "p[name='LoginMessage']");
    }
}

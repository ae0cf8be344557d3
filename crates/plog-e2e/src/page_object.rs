//! Page Object Model Support
//!
//! Each application route is described by a page object that owns its
//! selectors and the messages it is expected to display. The concrete pages
//! live in [`crate::pages`].

use crate::driver::BrowserDriver;
use crate::locator::Selector;
use crate::result::E2eResult;
use crate::session::Session;

/// A page or route of the application
pub trait PageObject {
    /// Route relative to the base URL (e.g. `/#/profile`)
    fn route(&self) -> String;

    /// Element whose presence shows the page has rendered
    fn marker(&self) -> Selector;

    /// Page name for logs
    fn page_name(&self) -> &'static str;
}

impl<D: BrowserDriver> Session<D> {
    /// Navigate to a page and wait until its marker is present
    pub async fn goto_page<P: PageObject + Sync>(&self, page: &P) -> E2eResult<()> {
        tracing::debug!(page = page.page_name(), route = %page.route(), "goto page");
        self.goto(&page.route()).await?;
        self.expect_page(page).await
    }

    /// Wait until the page marker is present
    pub async fn expect_page<P: PageObject + Sync>(&self, page: &P) -> E2eResult<()> {
        self.expect_element(&page.marker()).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuiteConfig;
    use crate::driver::{MockDriver, MockElement};
    use crate::result::E2eError;

    struct Gallery;

    impl PageObject for Gallery {
        fn route(&self) -> String {
            "/#/gallery".to_string()
        }

        fn marker(&self) -> Selector {
            Selector::name("Gallery")
        }

        fn page_name(&self) -> &'static str {
            "gallery"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_goto_page_waits_for_marker() {
        let session = Session::new(MockDriver::new(), SuiteConfig::default());
        session
            .driver()
            .add_element("[name=\"Gallery\"]", MockElement::default().appear_after(2));
        session.goto_page(&Gallery).await.unwrap();
        assert!(session
            .driver()
            .was_called("navigate:https://plog.org:8004/#/gallery"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expect_page_missing_marker() {
        let session = Session::new(MockDriver::new(), SuiteConfig::default());
        let err = session.expect_page(&Gallery).await.unwrap_err();
        assert!(matches!(err, E2eError::Timeout { .. }));
    }
}

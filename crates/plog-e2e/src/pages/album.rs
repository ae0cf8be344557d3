use crate::driver::BrowserDriver;
use crate::locator::Selector;
use crate::page_object::PageObject;
use crate::result::E2eResult;
use crate::session::Session;

/// Album index; requires a login and carries the logout link
#[derive(Debug, Clone, Copy, Default)]
pub struct AlbumPage;

impl AlbumPage {
    /// Logout link
    #[must_use]
    pub fn logout_link() -> Selector {
        Selector::name("Logout")
    }

    /// Click the logout link
    pub async fn logout<D: BrowserDriver>(&self, session: &Session<D>) -> E2eResult<()> {
        session.click(&Self::logout_link()).await
    }
}

impl PageObject for AlbumPage {
    fn route(&self) -> String {
        "/#/album".to_string()
    }

    fn marker(&self) -> Selector {
        Self::logout_link()
    }

    fn page_name(&self) -> &'static str {
        "album"
    }
}

//! Session: the scripting layer scenarios use to drive the application.
//!
//! A [`Session`] bundles a [`BrowserDriver`] with the suite configuration,
//! the page [`Waiter`] and the [`Mailbox`]. Routes are given relative to
//! the configured base URL (`/#/profile`).

use crate::config::SuiteConfig;
use crate::driver::BrowserDriver;
use crate::locator::Selector;
use crate::mailbox::Mailbox;
use crate::result::{E2eError, E2eResult};
use crate::wait::{WaitResult, Waiter};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Script checking for a 36 character `SessionToken` in the cookie jar or local storage
const SESSION_TOKEN_SCRIPT: &str = r"
    var match = document.cookie.match(/(?:^|;\s*)SessionToken=([^;]*)/);
    var token = (match && match[1]) ? decodeURIComponent(match[1]) : window.localStorage.getItem('SessionToken');
    if (token && token.length == 36) {
        return 'present';
    }
    return 'absent';
";

/// Whether the browser holds a session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// A well-formed token is stored
    Present,
    /// No token, or a malformed one
    Absent,
}

/// A browser session on the application under test
#[derive(Debug)]
pub struct Session<D: BrowserDriver> {
    driver: D,
    config: SuiteConfig,
    waiter: Waiter,
    mailbox: Mailbox,
    loading: Selector,
}

impl<D: BrowserDriver> Session<D> {
    /// Wrap a driver
    pub fn new(driver: D, config: SuiteConfig) -> Self {
        Self {
            waiter: Waiter::with_options(config.wait_options()),
            mailbox: Mailbox::from_config(&config),
            loading: Selector::css(&config.loading_selector),
            driver,
            config,
        }
    }

    /// Underlying driver
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Suite configuration
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Mailbox of the mail bot
    pub const fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    /// Absolute URL of a route
    pub fn url(&self, route: &str) -> String {
        self.config.url(route)
    }

    /// Navigate to a route without waiting
    pub async fn open(&self, route: &str) -> E2eResult<()> {
        self.driver.navigate(&self.url(route)).await
    }

    /// Navigate to a route and wait for the loading indicator to go away
    pub async fn goto(&self, route: &str) -> E2eResult<()> {
        self.open(route).await?;
        self.wait_for_loading().await?;
        Ok(())
    }

    /// Wait for the loading indicator to vanish.
    ///
    /// A timeout is logged, not raised: the assertions that follow report
    /// what the page actually shows.
    pub async fn wait_for_loading(&self) -> E2eResult<WaitResult> {
        let result = self
            .waiter
            .wait_for_vanish(&self.driver, self.loading.as_str())
            .await?;
        if !result.is_ready() {
            tracing::warn!(
                selector = %self.loading,
                elapsed = ?result.elapsed,
                "loading indicator still present"
            );
        }
        Ok(result)
    }

    /// Wait for an element to appear, failing on timeout
    pub async fn expect_element(&self, selector: &Selector) -> E2eResult<WaitResult> {
        self.waiter
            .wait_for_element(&self.driver, selector.as_str())
            .await?
            .into_result()
    }

    /// Wait for the current URL to be `route`, failing on timeout
    pub async fn expect_route(&self, route: &str) -> E2eResult<WaitResult> {
        self.waiter
            .wait_for_url(&self.driver, &[self.url(route)])
            .await?
            .into_result()
    }

    /// Fail unless every named element is on the page
    pub async fn require_named(&self, names: &[&str]) -> E2eResult<()> {
        for name in names {
            let selector = Selector::name(name);
            if !self.driver.element_exists(selector.as_str()).await? {
                return Err(E2eError::ElementNotFound {
                    selector: selector.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Replace the content of an input
    pub async fn fill(&self, selector: &Selector, text: &str) -> E2eResult<()> {
        self.driver.clear(selector.as_str()).await?;
        self.driver.send_keys(selector.as_str(), text).await
    }

    /// Append text to an input
    pub async fn type_into(&self, selector: &Selector, text: &str) -> E2eResult<()> {
        self.driver.send_keys(selector.as_str(), text).await
    }

    /// Replace the content of each named input
    pub async fn fill_named(&self, fields: &[(&str, &str)]) -> E2eResult<()> {
        for (name, text) in fields {
            self.fill(&Selector::name(name), text).await?;
        }
        Ok(())
    }

    /// Click an element
    pub async fn click(&self, selector: &Selector) -> E2eResult<()> {
        self.driver.click(selector.as_str()).await
    }

    /// Visible text of an element
    pub async fn text(&self, selector: &Selector) -> E2eResult<String> {
        self.driver.text(selector.as_str()).await
    }

    /// `value` of a named form field
    pub async fn field_value(&self, name: &str) -> E2eResult<String> {
        self.driver.value(Selector::name(name).as_str()).await
    }

    /// Document title
    pub async fn title(&self) -> E2eResult<String> {
        self.driver.title().await
    }

    /// Inspect the session token
    pub async fn session_token(&self) -> E2eResult<TokenState> {
        match self.driver.execute_js(SESSION_TOKEN_SCRIPT).await? {
            Value::String(s) if s == "present" => Ok(TokenState::Present),
            Value::String(s) if s == "absent" => Ok(TokenState::Absent),
            other => Err(E2eError::Script {
                message: format!("session token script returned {other}"),
            }),
        }
    }

    /// `SessionToken` entry of local storage
    pub async fn local_storage_token(&self) -> E2eResult<Option<String>> {
        match self
            .driver
            .execute_js("return window.localStorage.getItem('SessionToken');")
            .await?
        {
            Value::Null => Ok(None),
            Value::String(token) => Ok(Some(token)),
            other => Err(E2eError::Script {
                message: format!("localStorage SessionToken is {other}"),
            }),
        }
    }

    /// Overwrite the session cookie
    pub async fn set_session_cookie(&self, token: &str) -> E2eResult<()> {
        let script = format!("document.cookie = 'SessionToken={token}';");
        self.driver.execute_js(&script).await?;
        Ok(())
    }

    /// Capture the page into `path`
    pub async fn screenshot_to_file(&self, path: &Path) -> E2eResult<PathBuf> {
        let shot = self.driver.screenshot().await?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, &shot.data).await?;
        tracing::info!(path = %path.display(), bytes = shot.size_bytes(), "screenshot saved");
        Ok(path.to_path_buf())
    }

    /// End the browser session
    pub async fn quit(&self) -> E2eResult<()> {
        self.driver.quit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, MockElement};
    use serde_json::json;

    fn session() -> Session<MockDriver> {
        Session::new(MockDriver::new(), SuiteConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_goto_joins_base_url_and_waits() {
        let session = session();
        session
            .driver()
            .add_element("div[class='selenium-flag']", MockElement::default().vanish_after(1));
        session.goto("/#/profile").await.unwrap();
        assert!(session
            .driver()
            .was_called("navigate:https://plog.org:8004/#/profile"));
        assert!(!session
            .driver()
            .element_exists("div[class='selenium-flag']")
            .await
            .unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_timeout_is_not_an_error() {
        let session = session();
        session
            .driver()
            .add_element("div[class='selenium-flag']", MockElement::default());
        let result = session.wait_for_loading().await.unwrap();
        assert!(!result.is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expect_element_times_out() {
        let session = session();
        let err = session
            .expect_element(&Selector::css("form[name=\"loginForm\"]"))
            .await
            .unwrap_err();
        assert!(matches!(err, E2eError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_require_named_reports_missing() {
        let session = session();
        session
            .driver()
            .add_element("[name=\"EmailAddr\"]", MockElement::default());
        session.require_named(&["EmailAddr"]).await.unwrap();
        let err = session
            .require_named(&["EmailAddr", "ResetPasswordButton"])
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "No element matches [name=\"ResetPasswordButton\"]"
        );
    }

    #[tokio::test]
    async fn test_fill_named_clears_first() {
        let session = session();
        session
            .driver()
            .add_element("[name=\"LastName\"]", MockElement::default().value("Old"));
        session.fill_named(&[("LastName", "New")]).await.unwrap();
        assert_eq!(session.field_value("LastName").await.unwrap(), "New");
    }

    #[test]
    fn test_empty_session_cookie_falls_back_to_local_storage() {
        assert!(SESSION_TOKEN_SCRIPT
            .contains("(match && match[1]) ? decodeURIComponent(match[1])"));
        assert!(SESSION_TOKEN_SCRIPT.contains("window.localStorage.getItem('SessionToken')"));
    }

    #[tokio::test]
    async fn test_session_token_states() {
        let session = session();
        session.driver().on_script("'present'", json!("present"));
        assert_eq!(session.session_token().await.unwrap(), TokenState::Present);

        session.driver().on_script("'present'", json!("absent"));
        assert_eq!(session.session_token().await.unwrap(), TokenState::Absent);

        session.driver().on_script("'present'", json!(42));
        assert!(matches!(
            session.session_token().await,
            Err(E2eError::Script { .. })
        ));
    }

    #[tokio::test]
    async fn test_local_storage_token() {
        let session = session();
        session.driver().on_script("return window.localStorage", json!(null));
        assert_eq!(session.local_storage_token().await.unwrap(), None);

        session.driver().on_script("return window.localStorage", json!("abc"));
        assert_eq!(
            session.local_storage_token().await.unwrap(),
            Some("abc".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_session_cookie_script() {
        let session = session();
        session.driver().on_script("document.cookie =", json!(null));
        session
            .set_session_cookie("00000000-0000-0000-dead-beef00000000")
            .await
            .unwrap();
        assert!(session.driver().was_called(
            "execute_js:document.cookie = 'SessionToken=00000000-0000-0000-dead-beef00000000';"
        ));
    }

    #[tokio::test]
    async fn test_screenshot_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let session = session();
        session.driver().set_screenshot(vec![0x89, 0x50, 0x4e, 0x47]);
        let path = dir.path().join("shots").join("login.png");
        session.screenshot_to_file(&path).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x89, 0x50, 0x4e, 0x47]);
    }
}

//! Browser control over a remote WebDriver server.
//!
//! [`RemoteBrowser`] is the live [`BrowserDriver`]: it negotiates a session
//! with a Selenium hub or a standalone driver (chromedriver, geckodriver)
//! through `fantoccini` and maps its command errors onto [`E2eError`].

use crate::config::SuiteConfig;
use crate::driver::{BrowserDriver, Screenshot};
use crate::result::{E2eError, E2eResult};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Map, Value};

/// Browser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// WebDriver server URL
    pub webdriver_url: String,
    /// Browser name (`chrome`, `firefox`, ...)
    pub browser: String,
    /// Run in headless mode
    pub headless: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self::from(&SuiteConfig::default())
    }
}

impl From<&SuiteConfig> for BrowserConfig {
    fn from(config: &SuiteConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            browser: config.browser.clone(),
            headless: config.headless,
        }
    }
}

impl BrowserConfig {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set browser name
    #[must_use]
    pub fn with_browser(mut self, browser: impl Into<String>) -> Self {
        self.browser = browser.into();
        self
    }

    /// W3C capabilities requested when the session is created
    #[must_use]
    pub fn capabilities(&self) -> Map<String, Value> {
        let mut caps = Map::new();
        caps.insert("browserName".to_string(), json!(self.browser));
        if self.headless {
            match self.browser.as_str() {
                "chrome" | "chromium" => {
                    caps.insert(
                        "goog:chromeOptions".to_string(),
                        json!({ "args": ["--headless=new", "--disable-gpu"] }),
                    );
                }
                "firefox" => {
                    caps.insert(
                        "moz:firefoxOptions".to_string(),
                        json!({ "args": ["-headless"] }),
                    );
                }
                other => {
                    tracing::warn!(browser = other, "headless mode not supported for browser");
                }
            }
        }
        caps
    }
}

/// A live WebDriver session
pub struct RemoteBrowser {
    client: Client,
    config: BrowserConfig,
}

impl std::fmt::Debug for RemoteBrowser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteBrowser")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RemoteBrowser {
    /// Open a session on the configured WebDriver server
    pub async fn connect(config: BrowserConfig) -> E2eResult<Self> {
        tracing::info!(
            url = %config.webdriver_url,
            browser = %config.browser,
            headless = config.headless,
            "connecting to WebDriver"
        );
        let mut builder = ClientBuilder::native();
        builder.capabilities(config.capabilities());
        let client =
            builder
                .connect(&config.webdriver_url)
                .await
                .map_err(|e| E2eError::ConnectionFailed {
                    url: config.webdriver_url.clone(),
                    message: e.to_string(),
                })?;
        Ok(Self { client, config })
    }

    /// Configuration of this session
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    async fn find(&self, selector: &str) -> E2eResult<Element> {
        self.client
            .find(Locator::Css(selector))
            .await
            .map_err(|e| lookup_error(selector, e))
    }
}

fn lookup_error(selector: &str, err: CmdError) -> E2eError {
    if err.is_no_such_element() {
        E2eError::ElementNotFound {
            selector: selector.to_string(),
        }
    } else {
        E2eError::driver("find", err)
    }
}

#[async_trait]
impl BrowserDriver for RemoteBrowser {
    async fn navigate(&self, url: &str) -> E2eResult<()> {
        tracing::debug!(url, "navigate");
        self.client
            .goto(url)
            .await
            .map_err(|e| E2eError::NavigationError {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    async fn current_url(&self) -> E2eResult<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(|e| E2eError::driver("current_url", e))
    }

    async fn title(&self) -> E2eResult<String> {
        self.client
            .title()
            .await
            .map_err(|e| E2eError::driver("title", e))
    }

    async fn element_exists(&self, selector: &str) -> E2eResult<bool> {
        match self.find(selector).await {
            Ok(_) => Ok(true),
            Err(E2eError::ElementNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn clear(&self, selector: &str) -> E2eResult<()> {
        self.find(selector)
            .await?
            .clear()
            .await
            .map_err(|e| E2eError::driver("clear", e))
    }

    async fn send_keys(&self, selector: &str, text: &str) -> E2eResult<()> {
        self.find(selector)
            .await?
            .send_keys(text)
            .await
            .map_err(|e| E2eError::driver("send_keys", e))
    }

    async fn click(&self, selector: &str) -> E2eResult<()> {
        self.find(selector)
            .await?
            .click()
            .await
            .map_err(|e| E2eError::driver("click", e))
    }

    async fn text(&self, selector: &str) -> E2eResult<String> {
        self.find(selector)
            .await?
            .text()
            .await
            .map_err(|e| E2eError::driver("text", e))
    }

    async fn value(&self, selector: &str) -> E2eResult<String> {
        let value = self
            .find(selector)
            .await?
            .prop("value")
            .await
            .map_err(|e| E2eError::driver("prop", e))?;
        Ok(value.unwrap_or_default())
    }

    async fn execute_js(&self, script: &str) -> E2eResult<Value> {
        self.client
            .execute(script, Vec::new())
            .await
            .map_err(|e| E2eError::Script {
                message: e.to_string(),
            })
    }

    async fn screenshot(&self) -> E2eResult<Screenshot> {
        self.client
            .screenshot()
            .await
            .map(Screenshot::new)
            .map_err(|e| E2eError::driver("screenshot", e))
    }

    async fn quit(&self) -> E2eResult<()> {
        tracing::info!("closing WebDriver session");
        self.client
            .clone()
            .close()
            .await
            .map_err(|e| E2eError::driver("close", e))
    }
}

//! BrowserDriver - abstract browser automation trait
//!
//! Scenarios talk to the browser only through [`BrowserDriver`], so the same
//! scripts run against a live WebDriver session ([`crate::RemoteBrowser`]) or
//! against the scriptable [`MockDriver`] in unit tests.
//!
//! Every element operation is addressed by CSS selector. A selector that
//! matches nothing yields [`E2eError::ElementNotFound`]; [`BrowserDriver::element_exists`]
//! is the one query where a miss is an ordinary `Ok(false)`.

use crate::result::{E2eError, E2eResult};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// PNG screenshot returned by the browser
#[derive(Debug, Clone)]
pub struct Screenshot {
    /// Raw PNG data
    pub data: Vec<u8>,
}

impl Screenshot {
    /// Create a new screenshot
    #[must_use]
    pub const fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Get the size in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

/// Abstract driver trait for browser automation
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Navigate to URL
    async fn navigate(&self, url: &str) -> E2eResult<()>;

    /// Get current URL
    async fn current_url(&self) -> E2eResult<String>;

    /// Get the document title
    async fn title(&self) -> E2eResult<String>;

    /// Whether the selector currently matches an element.
    ///
    /// Returns `Ok(false)` only for a genuine miss; other lookup failures are
    /// errors.
    async fn element_exists(&self, selector: &str) -> E2eResult<bool>;

    /// Clear an input element
    async fn clear(&self, selector: &str) -> E2eResult<()>;

    /// Type text into element
    async fn send_keys(&self, selector: &str, text: &str) -> E2eResult<()>;

    /// Click element
    async fn click(&self, selector: &str) -> E2eResult<()>;

    /// Visible text of an element
    async fn text(&self, selector: &str) -> E2eResult<String>;

    /// Current `value` property of a form control
    async fn value(&self, selector: &str) -> E2eResult<String>;

    /// Execute JavaScript in page context
    async fn execute_js(&self, script: &str) -> E2eResult<serde_json::Value>;

    /// Take screenshot
    async fn screenshot(&self) -> E2eResult<Screenshot>;

    /// End the browser session
    async fn quit(&self) -> E2eResult<()>;
}

/// A scripted element in the [`MockDriver`] page
#[derive(Debug, Clone, Default)]
pub struct MockElement {
    texts: VecDeque<String>,
    value: String,
    remaining_checks: Option<usize>,
    appears_after: usize,
}

impl MockElement {
    /// Element with fixed text
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            texts: VecDeque::from([text.into()]),
            ..Self::default()
        }
    }

    /// Element whose text changes on each read; the last entry sticks
    #[must_use]
    pub fn with_text_sequence<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the value property
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Element stays present for `checks` existence queries, then vanishes
    #[must_use]
    pub const fn vanish_after(mut self, checks: usize) -> Self {
        self.remaining_checks = Some(checks);
        self
    }

    /// Element is absent for the first `checks` existence queries
    #[must_use]
    pub const fn appear_after(mut self, checks: usize) -> Self {
        self.appears_after = checks;
        self
    }

    fn next_text(&mut self) -> String {
        if self.texts.len() > 1 {
            self.texts.pop_front().unwrap_or_default()
        } else {
            self.texts.front().cloned().unwrap_or_default()
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    current_url: String,
    title: String,
    elements: HashMap<String, MockElement>,
    broken_selectors: HashMap<String, String>,
    redirects: HashMap<String, VecDeque<String>>,
    click_effects: HashMap<String, Vec<(String, String)>>,
    script_results: Vec<(String, VecDeque<serde_json::Value>)>,
    screenshot: Option<Vec<u8>>,
    call_history: Vec<String>,
}

/// Mock driver for unit testing
#[derive(Debug, Default)]
pub struct MockDriver {
    state: Mutex<MockState>,
}

impl MockDriver {
    /// Create new mock driver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut state)
    }

    /// Add or replace an element
    pub fn add_element(&self, selector: impl Into<String>, element: MockElement) {
        self.with_state(|s| {
            s.elements.insert(selector.into(), element);
        });
    }

    /// Remove an element
    pub fn remove_element(&self, selector: &str) {
        self.with_state(|s| {
            s.elements.remove(selector);
        });
    }

    /// Make lookups of `selector` fail with a non-miss driver error
    pub fn break_selector(&self, selector: impl Into<String>, message: impl Into<String>) {
        self.with_state(|s| {
            s.broken_selectors.insert(selector.into(), message.into());
        });
    }

    /// Result for any script containing `fragment`; later entries win
    pub fn on_script(&self, fragment: impl Into<String>, result: serde_json::Value) {
        self.on_script_sequence(fragment, [result]);
    }

    /// Results returned one per call for scripts containing `fragment`;
    /// the last entry sticks
    pub fn on_script_sequence<I>(&self, fragment: impl Into<String>, results: I)
    where
        I: IntoIterator<Item = serde_json::Value>,
    {
        let results: VecDeque<_> = results.into_iter().collect();
        self.with_state(|s| s.script_results.push((fragment.into(), results)));
    }

    /// Navigating to `from` lands on `to`
    pub fn redirect(&self, from: impl Into<String>, to: impl Into<String>) {
        self.redirect_sequence(from, [to.into()]);
    }

    /// Each navigation to `from` lands on the next of `targets`; the last
    /// entry sticks
    pub fn redirect_sequence<I, S>(&self, from: impl Into<String>, targets: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets = targets.into_iter().map(Into::into).collect();
        self.with_state(|s| {
            s.redirects.insert(from.into(), targets);
        });
    }

    /// Clicking `selector` sets the value of each listed element, as a
    /// form submit or page reload would
    pub fn set_on_click<I, S, V>(&self, selector: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|(target, value)| (target.into(), value.into()))
            .collect();
        self.with_state(|s| {
            s.click_effects.insert(selector.into(), values);
        });
    }

    /// Set current URL
    pub fn set_url(&self, url: impl Into<String>) {
        self.with_state(|s| s.current_url = url.into());
    }

    /// Set document title
    pub fn set_title(&self, title: impl Into<String>) {
        self.with_state(|s| s.title = title.into());
    }

    /// Set mock screenshot bytes
    pub fn set_screenshot(&self, data: Vec<u8>) {
        self.with_state(|s| s.screenshot = Some(data));
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.with_state(|s| s.call_history.clone())
    }

    /// Check if a call starting with `prefix` was made
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.with_state(|s| s.call_history.iter().any(|c| c.starts_with(prefix)))
    }

    fn record(&self, call: String) {
        self.with_state(|s| s.call_history.push(call));
    }

    fn lookup<R>(
        &self,
        selector: &str,
        f: impl FnOnce(&mut MockElement) -> R,
    ) -> E2eResult<R> {
        self.with_state(|s| {
            if let Some(message) = s.broken_selectors.get(selector) {
                return Err(E2eError::driver("find", message));
            }
            s.elements
                .get_mut(selector)
                .filter(|e| e.appears_after == 0 && e.remaining_checks != Some(0))
                .map(f)
                .ok_or_else(|| E2eError::ElementNotFound {
                    selector: selector.to_string(),
                })
        })
    }
}

#[async_trait]
impl BrowserDriver for MockDriver {
    async fn navigate(&self, url: &str) -> E2eResult<()> {
        self.record(format!("navigate:{url}"));
        self.with_state(|s| {
            let target = s.redirects.get_mut(url).and_then(|targets| {
                if targets.len() > 1 {
                    targets.pop_front()
                } else {
                    targets.front().cloned()
                }
            });
            s.current_url = target.unwrap_or_else(|| url.to_string());
        });
        Ok(())
    }

    async fn current_url(&self) -> E2eResult<String> {
        Ok(self.with_state(|s| s.current_url.clone()))
    }

    async fn title(&self) -> E2eResult<String> {
        Ok(self.with_state(|s| s.title.clone()))
    }

    async fn element_exists(&self, selector: &str) -> E2eResult<bool> {
        self.with_state(|s| {
            if let Some(message) = s.broken_selectors.get(selector) {
                return Err(E2eError::driver("find", message));
            }
            let Some(element) = s.elements.get_mut(selector) else {
                return Ok(false);
            };
            if element.appears_after > 0 {
                element.appears_after -= 1;
                return Ok(false);
            }
            match element.remaining_checks {
                Some(0) => Ok(false),
                Some(ref mut n) => {
                    *n -= 1;
                    Ok(true)
                }
                None => Ok(true),
            }
        })
    }

    async fn clear(&self, selector: &str) -> E2eResult<()> {
        self.lookup(selector, |e| e.value.clear())?;
        self.record(format!("clear:{selector}"));
        Ok(())
    }

    async fn send_keys(&self, selector: &str, text: &str) -> E2eResult<()> {
        self.lookup(selector, |e| e.value.push_str(text))?;
        self.record(format!("send_keys:{selector}={text}"));
        Ok(())
    }

    async fn click(&self, selector: &str) -> E2eResult<()> {
        self.lookup(selector, |_| ())?;
        self.record(format!("click:{selector}"));
        self.with_state(|s| {
            let effects = s.click_effects.get(selector).cloned().unwrap_or_default();
            for (target, value) in effects {
                if let Some(element) = s.elements.get_mut(&target) {
                    element.value = value;
                }
            }
        });
        Ok(())
    }

    async fn text(&self, selector: &str) -> E2eResult<String> {
        self.lookup(selector, MockElement::next_text)
    }

    async fn value(&self, selector: &str) -> E2eResult<String> {
        self.lookup(selector, |e| e.value.clone())
    }

    async fn execute_js(&self, script: &str) -> E2eResult<serde_json::Value> {
        self.record(format!("execute_js:{}", script.trim()));
        self.with_state(|s| {
            s.script_results
                .iter_mut()
                .rev()
                .find(|(fragment, _)| script.contains(fragment.as_str()))
                .and_then(|(_, results)| {
                    if results.len() > 1 {
                        results.pop_front()
                    } else {
                        results.front().cloned()
                    }
                })
                .ok_or_else(|| E2eError::Script {
                    message: "no mock result for script".to_string(),
                })
        })
    }

    async fn screenshot(&self) -> E2eResult<Screenshot> {
        self.with_state(|s| s.screenshot.clone())
            .map(Screenshot::new)
            .ok_or_else(|| E2eError::driver("screenshot", "no mock screenshot set"))
    }

    async fn quit(&self) -> E2eResult<()> {
        self.record("quit".to_string());
        Ok(())
    }
}

//! plog-e2e: browser-driven end-to-end suite for the Plog photo log.
//!
//! Scenarios drive a real browser through a WebDriver server and check
//! what the application shows: registration, email verification, login,
//! profile editing and password reset. Verification and reset links are
//! read from the mail bot's per-address mailbox files.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      plog-e2e Architecture                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Scenarios  │───►│ Session +  │───►│ WebDriver  │            │
//! │   │ + Fixture  │    │ Page objs  │    │ (browser)  │            │
//! │   └────────────┘    └─────┬──────┘    └────────────┘            │
//! │                           │                                     │
//! │                     ┌─────▼──────┐    ┌────────────┐            │
//! │                     │  Waiter    │    │  Mailbox   │            │
//! │                     │ (polling)  │    │  (files)   │            │
//! │                     └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod assertion;
mod browser;
mod config;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod driver;
mod email_link;
mod fixture;
mod harness;
mod locator;
mod mailbox;
#[allow(clippy::missing_errors_doc)]
mod page_object;
/// Page objects for each application route
#[allow(clippy::missing_errors_doc)]
pub mod pages;
mod result;
/// Scenario scripts, grouped by suite
#[allow(clippy::missing_errors_doc)]
pub mod scenarios;
#[allow(clippy::missing_errors_doc)]
mod session;
/// Polling waits for page state
pub mod wait;

pub use assertion::{
    ensure_eq, AssertionFailure, AssertionSummary, SoftAssertionError, SoftAssertions,
};
pub use browser::{BrowserConfig, RemoteBrowser};
pub use config::{
    SuiteConfig, DEFAULT_BASE_URL, DEFAULT_MAILBOX_DIR, DEFAULT_WEBDRIVER_URL, ENV_PREFIX,
};
pub use driver::{BrowserDriver, MockDriver, MockElement, Screenshot};
pub use email_link::{EmailLink, LinkKind};
pub use fixture::{
    Credentials, LoginCase, ProfileExpectation, ProfileUpdate, Registration, SuiteFixture,
    VerifyCase, BAD_SESSION_TOKEN, MIN_SECRET_LEN, PAGES_NEEDING_LOGIN,
};
pub use harness::{ScenarioResult, SuiteResults, SuiteRunner};
pub use locator::Selector;
pub use mailbox::Mailbox;
pub use page_object::PageObject;
pub use result::{E2eError, E2eResult, ErrorCategory};
pub use scenarios::{run_scenario, ScenarioId, Suite};
pub use session::{Session, TokenState};
pub use wait::{WaitOptions, WaitOutcome, WaitResult, Waiter};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::pages::*;
    pub use super::{
        ensure_eq, run_scenario, BrowserDriver, E2eError, E2eResult, MockDriver, MockElement,
        PageObject, RemoteBrowser, ScenarioId, Selector, Session, SoftAssertions, Suite,
        SuiteConfig, SuiteFixture, SuiteRunner, Waiter,
    };
}

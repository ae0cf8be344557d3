//! Suite fixture: the users, credentials and expectations shared by scenarios.
//!
//! Scenarios receive the fixture as `&mut SuiteFixture` and update it as the
//! application state changes (a user id edit changes the login identifier,
//! a password edit changes the secret, and so on).

use crate::email_link::EmailLink;
use crate::result::{E2eError, E2eResult};
use serde::Serialize;

/// Shortest secret the application accepts
pub const MIN_SECRET_LEN: usize = 10;

/// Session token planted by the bad-token login case
pub const BAD_SESSION_TOKEN: &str = "00000000-0000-0000-dead-beef00000000";

/// Routes that redirect to the login page when logged out
pub const PAGES_NEEDING_LOGIN: [&str; 2] = ["/#/album", "/#/album/2013-09%20September"];

/// A login identifier and its clear-text secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// User id or email address
    pub identifier: String,
    /// Clear-text secret
    pub secret: String,
}

impl Credentials {
    /// Create credentials
    #[must_use]
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

/// Everything typed into the registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// User id
    pub user_id: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Clear-text secret
    pub secret: String,
    /// Confirmation of the secret
    pub confirm_secret: String,
}

impl Registration {
    /// Registration whose confirmation matches the secret
    #[must_use]
    pub fn new(
        user_id: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
        secret: &str,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            secret: secret.to_string(),
            confirm_secret: secret.to_string(),
        }
    }

    /// Same registration with another email address
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Credentials to log in with this user id
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.user_id, &self.secret)
    }
}

/// Changes submitted through the profile form; empty fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    /// New user id
    pub user_id: String,
    /// New first name
    pub first_name: String,
    /// New last name
    pub last_name: String,
    /// New email address
    pub email: String,
    /// New secret
    pub secret: String,
    /// Confirmation of the new secret
    pub confirm_secret: String,
}

impl ProfileUpdate {
    /// Change the user id
    #[must_use]
    pub fn user_id(value: &str) -> Self {
        Self {
            user_id: value.to_string(),
            ..Self::default()
        }
    }

    /// Change the first name
    #[must_use]
    pub fn first_name(value: &str) -> Self {
        Self {
            first_name: value.to_string(),
            ..Self::default()
        }
    }

    /// Change the last name
    #[must_use]
    pub fn last_name(value: &str) -> Self {
        Self {
            last_name: value.to_string(),
            ..Self::default()
        }
    }

    /// Change the email address
    #[must_use]
    pub fn email(value: &str) -> Self {
        Self {
            email: value.to_string(),
            ..Self::default()
        }
    }

    /// Change the secret, confirming it
    #[must_use]
    pub fn secret(value: &str) -> Self {
        Self {
            secret: value.to_string(),
            confirm_secret: value.to_string(),
            ..Self::default()
        }
    }

    /// Form fields to fill, by element name, skipping empty values
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("UserId", self.user_id.as_str()),
            ("FirstName", self.first_name.as_str()),
            ("LastName", self.last_name.as_str()),
            ("EmailAddr", self.email.as_str()),
            ("ClearPassword", self.secret.as_str()),
            ("ConfirmPassword", self.confirm_secret.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

impl From<&Registration> for ProfileUpdate {
    fn from(reg: &Registration) -> Self {
        Self {
            user_id: reg.user_id.clone(),
            first_name: reg.first_name.clone(),
            last_name: reg.last_name.clone(),
            email: reg.email.clone(),
            secret: reg.secret.clone(),
            confirm_secret: reg.confirm_secret.clone(),
        }
    }
}

/// Values the profile form is expected to show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileExpectation {
    /// User id
    pub user_id: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
}

impl ProfileExpectation {
    /// Values as stored by the server after a reload
    #[must_use]
    pub fn stored(reg: &Registration) -> Self {
        Self::as_typed(reg).normalized()
    }

    /// Values exactly as typed, before the server normalises them
    #[must_use]
    pub fn as_typed(reg: &Registration) -> Self {
        Self {
            user_id: reg.user_id.clone(),
            first_name: reg.first_name.clone(),
            last_name: reg.last_name.clone(),
            email: reg.email.clone(),
        }
    }

    /// Lower-case the user id and email, as the server does
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.user_id = self.user_id.to_lowercase();
        self.email = self.email.to_lowercase();
        self
    }

    /// Apply a submitted update; secrets never show in the form
    pub fn apply(&mut self, update: &ProfileUpdate) {
        let targets = [
            (&mut self.user_id, &update.user_id),
            (&mut self.first_name, &update.first_name),
            (&mut self.last_name, &update.last_name),
            (&mut self.email, &update.email),
        ];
        for (target, value) in targets {
            if !value.is_empty() {
                target.clone_from(value);
            }
        }
    }

    /// Expected `value` of each profile form field, by element name
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("UserId", self.user_id.as_str()),
            ("FirstName", self.first_name.as_str()),
            ("LastName", self.last_name.as_str()),
            ("EmailAddr", self.email.as_str()),
            ("ClearPassword", ""),
            ("ConfirmPassword", ""),
        ]
    }
}

/// One row of the login table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginCase {
    /// What the row exercises
    pub label: &'static str,
    /// Submitted credentials
    pub credentials: Credentials,
    /// Expected login message; `None` when not checked
    pub expected_message: Option<&'static str>,
    /// Whether a session token must be present afterwards
    pub expect_token: bool,
}

impl LoginCase {
    /// Reject rows whose secret the application could never accept
    pub fn validate(&self) -> E2eResult<()> {
        if self.credentials.secret.chars().count() < MIN_SECRET_LEN {
            return Err(E2eError::config(format!(
                "login case {:?} is invalid: secret {:?} is shorter than {MIN_SECRET_LEN} characters",
                self.label, self.credentials.secret
            )));
        }
        Ok(())
    }
}

/// One row of the verification table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyCase {
    /// Email address in the link
    pub email: String,
    /// Token in the link
    pub token: String,
    /// Expected page message
    pub expected_message: String,
}

impl VerifyCase {
    /// Create a case
    #[must_use]
    pub fn new(email: &str, token: &str, expected_message: &str) -> Self {
        Self {
            email: email.to_string(),
            token: token.to_string(),
            expected_message: expected_message.to_string(),
        }
    }
}

/// State shared by the scenarios of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteFixture {
    /// First registered user
    pub user_one: Registration,
    /// Second registered user
    pub user_two: Registration,
    /// Credentials currently valid for user one
    pub login: Credentials,
    /// What the profile page should show
    pub profile: ProfileExpectation,
    /// Last link read from a notification email
    pub last_link: Option<EmailLink>,
}

impl Default for SuiteFixture {
    fn default() -> Self {
        let user_one = Registration::new(
            "Selenium-One",
            "George",
            "Katsiopolous",
            "GeorgeK@mailbot.NET",
            "sldkfjeowir9",
        );
        let user_two =
            Registration::new("Selenium-Two", "Jane", "Plain", "jplain@mailbot.NET", "neverguess");
        Self {
            login: user_one.credentials(),
            profile: ProfileExpectation::stored(&user_one),
            user_one,
            user_two,
            last_link: None,
        }
    }
}

impl SuiteFixture {
    /// Canonical fixture
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Login table: three rejected variants, then the valid login
    #[must_use]
    pub fn login_cases(&self) -> Vec<LoginCase> {
        const FAILED: Option<&str> = Some("Authentication failed");
        vec![
            LoginCase {
                label: "unknown user id",
                credentials: Credentials::new("no such dude", "passwordpassword"),
                expected_message: FAILED,
                expect_token: false,
            },
            LoginCase {
                label: "wrong user id",
                credentials: Credentials::new("wrong uid", &self.user_one.secret),
                expected_message: FAILED,
                expect_token: false,
            },
            LoginCase {
                label: "wrong secret",
                credentials: Credentials::new(&self.user_one.user_id, "wrong password"),
                expected_message: FAILED,
                expect_token: false,
            },
            LoginCase {
                label: "valid user id and secret",
                credentials: self.user_one.credentials(),
                expected_message: None,
                expect_token: true,
            },
        ]
    }

    /// Verification links that must be refused
    #[must_use]
    pub fn bad_verify_cases() -> Vec<VerifyCase> {
        const TOKEN: &str = "6ba7b814-9dad-11d1-80b4-00c04fd430c8";
        vec![
            VerifyCase::new(
                "WTF-Email",
                TOKEN,
                "Failed! Server says: Verification failed; Not a valid email address",
            ),
            VerifyCase::new(
                "matches@pattern.io",
                "toktok",
                "Failed! Server says: Verification failed; Not a valid token",
            ),
            VerifyCase::new(
                "matches@pattern.io",
                TOKEN,
                "Failed! Server says: Verification failed",
            ),
        ]
    }
}

//! Scenario scripts for each Plog flow.
//!
//! Scenarios run strictly in order against one browser session and share a
//! [`SuiteFixture`]. Later scenarios rely on the state earlier ones leave
//! behind (a registered and verified user, a logged-in session), so a suite
//! is only meaningful when run from its first scenario.

pub mod login;
pub mod profile;
pub mod register;
pub mod reset;
pub mod verify;

use crate::driver::BrowserDriver;
use crate::fixture::SuiteFixture;
use crate::result::{E2eError, E2eResult};
use crate::session::Session;
use std::fmt;
use std::str::FromStr;

/// Every scenario of the suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioId {
    /// Register two users, verifying the first
    RegisterSuccess,
    /// Duplicate email address and user id are refused
    RegisterAlreadyRegistered,
    /// Malformed verification links are refused
    VerifyBadAddress,
    /// Verify the second user from the mailbox
    VerifySecondUser,
    /// Login table of rejected and accepted credentials
    LoginTable,
    /// Logout, protected pages, automatic login
    Logout,
    /// Profile page redirects to login first
    ProfileNeedsLogin,
    /// Change the user id
    ProfileChangeUserId,
    /// Change the first name
    ProfileChangeFirstName,
    /// Change the last name
    ProfileChangeLastName,
    /// Change and re-verify the email address
    ProfileChangeEmail,
    /// Change the password and log in with it
    ProfileChangePassword,
    /// Restore every profile field
    ProfileChangeAllBack,
    /// Request a password reset and read the reset link
    ResetPasswordRequest,
}

impl ScenarioId {
    /// All scenarios in run order
    pub const ALL: [Self; 14] = [
        Self::RegisterSuccess,
        Self::RegisterAlreadyRegistered,
        Self::VerifyBadAddress,
        Self::VerifySecondUser,
        Self::LoginTable,
        Self::Logout,
        Self::ProfileNeedsLogin,
        Self::ProfileChangeUserId,
        Self::ProfileChangeFirstName,
        Self::ProfileChangeLastName,
        Self::ProfileChangeEmail,
        Self::ProfileChangePassword,
        Self::ProfileChangeAllBack,
        Self::ResetPasswordRequest,
    ];

    /// Stable name used in reports and screenshot files
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RegisterSuccess => "register-success",
            Self::RegisterAlreadyRegistered => "register-already-registered",
            Self::VerifyBadAddress => "verify-bad-address",
            Self::VerifySecondUser => "verify-second-user",
            Self::LoginTable => "login-table",
            Self::Logout => "logout",
            Self::ProfileNeedsLogin => "profile-needs-login",
            Self::ProfileChangeUserId => "profile-change-user-id",
            Self::ProfileChangeFirstName => "profile-change-first-name",
            Self::ProfileChangeLastName => "profile-change-last-name",
            Self::ProfileChangeEmail => "profile-change-email",
            Self::ProfileChangePassword => "profile-change-password",
            Self::ProfileChangeAllBack => "profile-change-all-back",
            Self::ResetPasswordRequest => "reset-password-request",
        }
    }

    /// Suite this scenario belongs to
    #[must_use]
    pub const fn suite(self) -> Suite {
        match self {
            Self::RegisterSuccess | Self::RegisterAlreadyRegistered => Suite::Register,
            Self::VerifyBadAddress | Self::VerifySecondUser => Suite::Verify,
            Self::LoginTable | Self::Logout => Suite::Login,
            Self::ProfileNeedsLogin
            | Self::ProfileChangeUserId
            | Self::ProfileChangeFirstName
            | Self::ProfileChangeLastName
            | Self::ProfileChangeEmail
            | Self::ProfileChangePassword
            | Self::ProfileChangeAllBack => Suite::Profile,
            Self::ResetPasswordRequest => Suite::Reset,
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named group of scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Suite {
    /// Every suite, in order
    #[default]
    All,
    /// Registration
    Register,
    /// Email verification
    Verify,
    /// Login and logout
    Login,
    /// Profile editing
    Profile,
    /// Password reset
    Reset,
}

impl Suite {
    /// Every suite name accepted by [`Suite::from_str`]
    pub const NAMES: [&'static str; 6] = ["all", "register", "verify", "login", "profile", "reset"];

    /// Suite name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Register => "register",
            Self::Verify => "verify",
            Self::Login => "login",
            Self::Profile => "profile",
            Self::Reset => "reset",
        }
    }

    /// Scenarios of this suite in run order
    #[must_use]
    pub fn scenarios(self) -> Vec<ScenarioId> {
        ScenarioId::ALL
            .into_iter()
            .filter(|id| self == Self::All || id.suite() == self)
            .collect()
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Suite {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "register" => Ok(Self::Register),
            "verify" => Ok(Self::Verify),
            "login" => Ok(Self::Login),
            "profile" => Ok(Self::Profile),
            "reset" => Ok(Self::Reset),
            other => Err(E2eError::config(format!(
                "unknown suite {other:?}, expected one of {}",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// Run one scenario
pub async fn run_scenario<D: BrowserDriver>(
    id: ScenarioId,
    session: &Session<D>,
    fixture: &mut SuiteFixture,
) -> E2eResult<()> {
    match id {
        ScenarioId::RegisterSuccess => register::register_success(session, fixture).await,
        ScenarioId::RegisterAlreadyRegistered => {
            register::already_registered(session, fixture).await
        }
        ScenarioId::VerifyBadAddress => verify::bad_address(session).await,
        ScenarioId::VerifySecondUser => verify::second_user(session, fixture).await,
        ScenarioId::LoginTable => login::login_table(session, fixture).await,
        ScenarioId::Logout => login::logout_flow(session, fixture).await,
        ScenarioId::ProfileNeedsLogin => profile::needs_login(session, fixture).await,
        ScenarioId::ProfileChangeUserId => profile::change_user_id(session, fixture).await,
        ScenarioId::ProfileChangeFirstName => profile::change_first_name(session, fixture).await,
        ScenarioId::ProfileChangeLastName => profile::change_last_name(session, fixture).await,
        ScenarioId::ProfileChangeEmail => profile::change_email(session, fixture).await,
        ScenarioId::ProfileChangePassword => profile::change_password(session, fixture).await,
        ScenarioId::ProfileChangeAllBack => profile::change_all_back(session, fixture).await,
        ScenarioId::ResetPasswordRequest => reset::request(session, fixture).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_covers_every_suite_in_order() {
        let all = Suite::All.scenarios();
        assert_eq!(all.len(), ScenarioId::ALL.len());
        let suites: Vec<Suite> = all.iter().map(|id| id.suite()).collect();
        let mut order = suites.clone();
        order.dedup();
        assert_eq!(
            order,
            vec![
                Suite::Register,
                Suite::Verify,
                Suite::Login,
                Suite::Profile,
                Suite::Reset
            ]
        );
    }

    #[test]
    fn test_suite_scenarios() {
        assert_eq!(
            Suite::Login.scenarios(),
            vec![ScenarioId::LoginTable, ScenarioId::Logout]
        );
        assert_eq!(Suite::Profile.scenarios().len(), 7);
        assert_eq!(
            Suite::Reset.scenarios(),
            vec![ScenarioId::ResetPasswordRequest]
        );
    }

    #[test]
    fn test_suite_from_str() {
        assert_eq!("Profile".parse::<Suite>().unwrap(), Suite::Profile);
        for name in Suite::NAMES {
            assert_eq!(name.parse::<Suite>().unwrap().name(), name);
        }
        let err = "smoke".parse::<Suite>().unwrap_err();
        assert!(err.to_string().contains("unknown suite"));
    }

    #[test]
    fn test_scenario_names_unique() {
        let mut names: Vec<&str> = ScenarioId::ALL.iter().map(|id| id.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ScenarioId::ALL.len());
    }
}

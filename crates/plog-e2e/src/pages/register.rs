use crate::assertion::ensure_eq;
use crate::driver::BrowserDriver;
use crate::fixture::Registration;
use crate::locator::Selector;
use crate::page_object::PageObject;
use crate::result::E2eResult;
use crate::session::Session;

/// New account form
#[derive(Debug, Clone, Copy, Default)]
pub struct RegisterPage;

impl RegisterPage {
    /// Document title of the registration page
    pub const TITLE: &'static str = "ZM Plog";

    /// Error next to an email address that is already registered
    pub const EMAIL_TAKEN: &'static str = "Already associated with a user";

    /// Error next to a user id that is already registered
    pub const USER_ID_TAKEN: &'static str = "Not available";

    const FORM_FIELDS: [&'static str; 8] = [
        "UserId",
        "FirstName",
        "LastName",
        "EmailAddr",
        "TzName",
        "ClearPassword",
        "ConfirmPassword",
        "RegisterButton",
    ];

    /// Message after a successful registration
    #[must_use]
    pub fn success_message(email: &str) -> String {
        format!(
            "Registration successful. Next step: Check your {email} inbox and verify your email address."
        )
    }

    /// Email address error span
    #[must_use]
    pub fn email_error() -> Selector {
        Selector::tag_name("span", "EmailAddrErrorMsg")
    }

    /// User id error span
    #[must_use]
    pub fn user_id_error() -> Selector {
        Selector::tag_name("span", "UserIdErrorMsg")
    }

    /// Load the form, check the title, fill it and press register.
    ///
    /// Does not wait after the click.
    pub async fn submit<D: BrowserDriver>(
        &self,
        session: &Session<D>,
        registration: &Registration,
    ) -> E2eResult<()> {
        session.goto(&self.route()).await?;
        ensure_eq(
            session.title().await?.as_str(),
            Self::TITLE,
            "registration page title",
        )?;
        session.require_named(&Self::FORM_FIELDS).await?;

        let fields = [
            ("UserId", &registration.user_id),
            ("FirstName", &registration.first_name),
            ("LastName", &registration.last_name),
            ("EmailAddr", &registration.email),
            ("ClearPassword", &registration.secret),
            ("ConfirmPassword", &registration.confirm_secret),
        ];
        for (name, value) in fields {
            session.type_into(&Selector::name(name), value).await?;
        }
        session.click(&self.marker()).await
    }

    /// Main page message
    pub async fn read_message<D: BrowserDriver>(&self, session: &Session<D>) -> E2eResult<String> {
        session.text(&super::message_selector()).await
    }
}

impl PageObject for RegisterPage {
    fn route(&self) -> String {
        "/#/register".to_string()
    }

    fn marker(&self) -> Selector {
        Selector::name("RegisterButton")
    }

    fn page_name(&self) -> &'static str {
        "register"
    }
}

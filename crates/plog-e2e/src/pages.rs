//! Page objects for the Plog routes.

mod album;
mod login;
mod password;
mod profile;
mod register;
mod verify;

pub use album::AlbumPage;
pub use login::LoginPage;
pub use password::PasswordPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
pub use verify::VerifyPage;

use crate::locator::Selector;

/// Main message paragraph shared by most pages
#[must_use]
pub fn message_selector() -> Selector {
    Selector::tag_name("p", "Message")
}

//! Links carried by Plog notification emails.
//!
//! Verification and password-reset mails contain a link of the form
//! `…/#/{verify|reset}/{email}/token/{token}`; the token runs to the next
//! whitespace or the end of the text.

use crate::result::{E2eError, E2eResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which flow a link belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Email address verification
    Verify,
    /// Password reset
    Reset,
}

impl LinkKind {
    /// Path segment preceding the email address
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// Email address and token extracted from a notification link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailLink {
    /// Link kind
    pub kind: LinkKind,
    /// Email address embedded in the link
    pub email: String,
    /// One-time token
    pub token: String,
}

impl EmailLink {
    /// Find the first `kind` link in an email body
    pub fn parse(kind: LinkKind, body: &str) -> E2eResult<Self> {
        let pattern = Regex::new(&format!(
            r"{}/(?P<email>[^/\s]+)/token/(?P<token>\S+)",
            kind.segment()
        ))?;
        let caps = pattern.captures(body).ok_or_else(|| E2eError::LinkNotFound {
            kind: kind.to_string(),
        })?;
        Ok(Self {
            kind,
            email: caps["email"].to_string(),
            token: caps["token"].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERIFY_MAIL: &str = "Subject: Verify your email address\n\
        \n\
        Welcome to Plog. Visit the link below to verify your address:\n\
        https://plog.org:8004/#/verify/georgek@mailbot.net/token/6ba7b814-9dad-11d1-80b4-00c04fd430c8\n\
        \n\
        Thanks\n";

    #[test]
    fn test_parse_verify_link() {
        let link = EmailLink::parse(LinkKind::Verify, VERIFY_MAIL).unwrap();
        assert_eq!(link.email, "georgek@mailbot.net");
        assert_eq!(link.token, "6ba7b814-9dad-11d1-80b4-00c04fd430c8");
    }

    #[test]
    fn test_token_at_end_of_text() {
        let link = EmailLink::parse(
            LinkKind::Reset,
            "https://plog.org:8004/#/reset/jplain@mailbot.net/token/abc-123",
        )
        .unwrap();
        assert_eq!(link.kind, LinkKind::Reset);
        assert_eq!(link.email, "jplain@mailbot.net");
        assert_eq!(link.token, "abc-123");
    }

    #[test]
    fn test_kind_must_match() {
        let err = EmailLink::parse(LinkKind::Reset, VERIFY_MAIL).unwrap_err();
        assert!(matches!(err, E2eError::LinkNotFound { ref kind } if kind == "reset"));
    }

    #[test]
    fn test_missing_link() {
        let err = EmailLink::parse(LinkKind::Verify, "no links here").unwrap_err();
        assert_eq!(err.to_string(), "No verify link found in email");
    }
}

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};

const MAX_LEN: usize = 256;

/// A guest supplied email-address
#[derive(Debug, PartialEq, Clone)]
pub struct EmailAddress(String);

impl FromStr for EmailAddress {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        lazy_static::lazy_static! {
            static ref EMAIL_REGEX: Regex =
                Regex::new(r"^[\w.+-]+@[\w-]+(\.[\w-]+)+$").unwrap();
        }

        let value = value.trim();

        if value.is_empty() {
            return Err(Error::ParsingError("Email address cannot be empty".into()));
        }
        if value.graphemes(true).count() > MAX_LEN {
            return Err(Error::ParsingError("Email address too long".into()));
        }
        if !EMAIL_REGEX.is_match(value) {
            return Err(Error::ParsingError(
                "Email address of incorrect format".into(),
            ));
        }

        Ok(Self(value.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};

    #[derive(Debug, Clone)]
    struct ValidEmailFixture(pub String);

    impl quickcheck::Arbitrary for ValidEmailFixture {
        fn arbitrary<G: quickcheck::Gen>(g: &mut G) -> Self {
            use fake::faker::internet::en::SafeEmail;
            use fake::Fake;

            let email: String = SafeEmail().fake_with_rng(g);
            Self(email)
        }
    }

    #[quickcheck_macros::quickcheck]
    fn safe_emails_valid(valid_email: ValidEmailFixture) -> bool {
        valid_email.0.parse::<EmailAddress>().is_ok()
    }

    #[test]
    fn dotted_local_part_valid() {
        assert_ok!("ana.maria+wedding@mail.example.com".parse::<EmailAddress>());
    }

    #[test]
    fn email_is_normalized() {
        let email: EmailAddress = "  Guest@Example.COM ".parse().unwrap();
        assert_eq!(email.as_ref(), "guest@example.com");
    }

    #[test]
    fn too_long_email_invalid() {
        let domain = "@test.com".to_string();
        let subject = "ё".repeat(258 - domain.len());
        let email = format!("{}{}", subject, domain);

        assert_err!(email.parse::<EmailAddress>());
    }

    #[test]
    fn blank_email_invalid() {
        assert_err!("    ".parse::<EmailAddress>());
    }

    #[test]
    fn domain_only_invalid() {
        assert_err!("test.com".parse::<EmailAddress>());
    }

    #[test]
    fn subject_only_invalid() {
        assert_err!("@test.com".parse::<EmailAddress>());
    }
}

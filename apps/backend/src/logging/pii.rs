//! Helpers for keeping PII out of log output.

use std::fmt;

/// Display wrapper that redacts an email (or any string) in log fields.
/// `jane.doe@example.com` renders as `ja***@example.com`.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.split_once('@') {
            Some((local, domain)) => {
                let keep = local.chars().take(2).collect::<String>();
                write!(f, "{keep}***@{domain}")
            }
            None => {
                let keep = self.0.chars().take(2).collect::<String>();
                write!(f, "{keep}***")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Redacted;

    #[test]
    fn redacts_email_local_part() {
        assert_eq!(
            Redacted("jane.doe@example.com").to_string(),
            "ja***@example.com"
        );
    }

    #[test]
    fn redacts_plain_strings() {
        assert_eq!(Redacted("08123456789").to_string(), "08***");
    }

    #[test]
    fn short_values_do_not_leak() {
        assert_eq!(Redacted("a@b.c").to_string(), "a***@b.c");
    }
}

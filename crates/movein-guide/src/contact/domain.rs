use serde::{Deserialize, Serialize};

/// Raw contact-form fields. Phone and subject are optional free text and
/// are never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// Checks fields in form order; the first failure stops the scan.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::MissingName);
        }
        let email = self.email.trim();
        if email.is_empty() || !is_plausible_email(email) {
            return Err(ContactValidationError::MissingOrInvalidEmail);
        }
        if self.message.trim().is_empty() {
            return Err(ContactValidationError::MissingMessage);
        }
        Ok(())
    }
}

/// User-facing validation failures for the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    #[error("please enter your name")]
    MissingName,
    #[error("please enter a valid email address")]
    MissingOrInvalidEmail,
    #[error("please enter your inquiry message")]
    MissingMessage,
}

/// Same shape the form enforced: a non-empty local part, then a domain
/// containing a dot with text on both sides, no whitespace anywhere and no
/// second `@`.
fn is_plausible_email(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::is_plausible_email;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_plausible_email("sato@example.com"));
        assert!(is_plausible_email("a.b+c@mail.example.co.jp"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_plausible_email("plainaddress"));
        assert!(!is_plausible_email("no-domain@"));
        assert!(!is_plausible_email("@no-local.example"));
        assert!(!is_plausible_email("no-dot@example"));
        assert!(!is_plausible_email("trailing-dot@example."));
        assert!(!is_plausible_email("dot-first@.example"));
        assert!(!is_plausible_email("two@@example.com"));
        assert!(!is_plausible_email("white space@example.com"));
    }
}

use crate::api::errors::ApiError;

pub(crate) const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn validate_email(email: &str) -> Result<(), ApiError> {
    let trimmed = email.trim();
    let valid = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        })
        && !trimmed.contains(char::is_whitespace);

    if valid {
        Ok(())
    } else {
        Err(ApiError::BadRequest("Invalid email address".to_string()))
    }
}

pub(crate) fn validate_password_len(password: &str) -> Result<(), ApiError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ApiError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_email, validate_password_len};

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email("student@example.com").is_ok());
        assert!(validate_email("a.b+c@sub.domain.io").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
        assert!(validate_email("spaced user@example.com").is_err());
    }

    #[test]
    fn enforces_minimum_password_length() {
        assert!(validate_password_len("longenough").is_ok());
        assert!(validate_password_len("short").is_err());
    }
}

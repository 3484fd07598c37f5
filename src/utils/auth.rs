//! Registration field checks. Each returns the rejection message, or `None`
//! when the field is acceptable.

pub fn validate_name(name: &str) -> Option<&'static str> {
    let len = name.trim().chars().count();
    if len < 2 {
        Some("Name must be at least 2 characters long")
    } else if len > 50 {
        Some("Name must be at most 50 characters long")
    } else {
        None
    }
}

/// Shape check only (`local@domain.tld`, no whitespace); deliverability is
/// not our problem.
pub fn validate_email(email: &str) -> Option<&'static str> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        None
    } else {
        Some("Please use a valid email address")
    }
}

pub fn validate_password(password: &str) -> Option<&'static str> {
    if password.chars().count() < 6 {
        Some("Password must be at least 6 characters long")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_length_is_checked_after_trimming() {
        assert_eq!(validate_name("Jo"), None);
        assert_eq!(validate_name("  A  "), Some("Name must be at least 2 characters long"));
        assert!(validate_name(&"x".repeat(51)).is_some());
    }

    #[test]
    fn email_must_look_like_an_address() {
        assert_eq!(validate_email("ada@example.com"), None);
        assert!(validate_email("not-an-email").is_some());
        assert!(validate_email("@example.com").is_some());
        assert!(validate_email("ada@nodot").is_some());
        assert!(validate_email("ada lovelace@example.com").is_some());
    }

    #[test]
    fn password_needs_six_characters() {
        assert_eq!(validate_password("secret"), None);
        assert!(validate_password("12345").is_some());
    }
}

//! Request validators
//!
//! Only emptiness is checked. Names have no length or charset rules and
//! amounts have no bounds.

use super::result::{Error, Result};

/// Reject an empty account name
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation("empty name"));
    }
    Ok(())
}

/// Reject an empty rename target
pub fn validate_new_name(new_name: &str) -> Result<()> {
    if new_name.is_empty() {
        return Err(Error::validation("empty new name"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        let err = validate_name("").unwrap_err();
        assert_eq!(err.to_string(), "empty name");
    }

    #[test]
    fn test_whitespace_name_accepted() {
        // No charset rules: only the empty string is invalid
        assert!(validate_name(" ").is_ok());
        assert!(validate_name("alice").is_ok());
    }

    #[test]
    fn test_empty_new_name_rejected() {
        let err = validate_new_name("").unwrap_err();
        assert_eq!(err.to_string(), "empty new name");
        assert!(validate_new_name("alicia").is_ok());
    }
}

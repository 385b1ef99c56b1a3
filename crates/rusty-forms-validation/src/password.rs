//! Password strength tiers

use std::fmt;
use std::str::FromStr;

const SPECIAL_CHARS: &[char] = &[
    '@', '$', '!', '%', '*', '?', '&', '#', '-', '_', '+', '=', '.', ',',
];

/// Password strength tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordTier {
    /// 6+ characters minimum
    Basic,
    /// 8+ chars with uppercase, lowercase, and digit
    Medium,
    /// 8+ chars with uppercase, lowercase, digit, and special character
    Strong,
}

impl FromStr for PasswordTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(PasswordTier::Basic),
            "medium" => Ok(PasswordTier::Medium),
            "strong" => Ok(PasswordTier::Strong),
            other => Err(format!(
                "unknown password tier `{}` (expected basic, medium or strong)",
                other
            )),
        }
    }
}

impl fmt::Display for PasswordTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordTier::Basic => write!(f, "basic"),
            PasswordTier::Medium => write!(f, "medium"),
            PasswordTier::Strong => write!(f, "strong"),
        }
    }
}

/// Validates a password against a tier, naming the first unmet requirement
pub fn validate_password(password: &str, tier: PasswordTier) -> Result<(), String> {
    let len = password.chars().count();

    if tier == PasswordTier::Basic {
        return if len >= 6 {
            Ok(())
        } else {
            Err("Password must be at least 6 characters".to_string())
        };
    }

    if len < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if !password.chars().any(char::is_uppercase) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(char::is_lowercase) {
        return Err("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(char::is_numeric) {
        return Err("Password must contain at least one digit".to_string());
    }
    if tier == PasswordTier::Strong && !password.contains(SPECIAL_CHARS) {
        return Err(
            "Password must contain at least one special character (@$!%*?&#-_+=.,)".to_string(),
        );
    }

    Ok(())
}

pub fn is_password(password: &str, tier: PasswordTier) -> bool {
    validate_password(password, tier).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parsing() {
        assert_eq!("basic".parse::<PasswordTier>(), Ok(PasswordTier::Basic));
        assert_eq!("strong".parse::<PasswordTier>(), Ok(PasswordTier::Strong));
        assert!("extreme".parse::<PasswordTier>().is_err());
    }

    #[test]
    fn test_basic_password() {
        assert!(is_password("simple", PasswordTier::Basic));
        assert!(!is_password("short", PasswordTier::Basic));
    }

    #[test]
    fn test_medium_password() {
        assert!(is_password("Password123", PasswordTier::Medium));
        assert!(!is_password("lowercase1", PasswordTier::Medium));
        assert!(!is_password("UPPERCASE1", PasswordTier::Medium));
        assert!(!is_password("NoDigitsHere", PasswordTier::Medium));
        assert!(!is_password("Short1A", PasswordTier::Medium));
    }

    #[test]
    fn test_strong_password() {
        assert!(is_password("Password123!", PasswordTier::Strong));
        assert_eq!(
            validate_password("NoSpecial123", PasswordTier::Strong),
            Err("Password must contain at least one special character (@$!%*?&#-_+=.,)".to_string())
        );
        assert_eq!(
            validate_password("nouppercas!1", PasswordTier::Strong),
            Err("Password must contain at least one uppercase letter".to_string())
        );
    }
}

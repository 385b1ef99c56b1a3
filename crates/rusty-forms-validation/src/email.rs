//! Email predicates

/// Common free email providers
pub const PUBLIC_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "icloud.com",
    "aol.com",
    "mail.com",
    "protonmail.com",
    "yandex.com",
    "zoho.com",
];

/// Validates basic email format
///
/// One `@`, a non-empty local part of at most 64 characters, and a dotted
/// domain with a TLD of two or more characters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.is_empty() || domain.len() > 255 {
        return false;
    }

    if domain.contains('@') || domain.contains("..") || !domain.contains('.') {
        return false;
    }

    if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) {
        return false;
    }

    let local_ok = local
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | '+'));
    let domain_ok = domain
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '.' | '-'));

    let tld_ok = domain
        .rsplit_once('.')
        .is_some_and(|(_, tld)| tld.chars().count() >= 2);

    local_ok && domain_ok && tld_ok
}

/// Domain part of an address, if any
pub fn email_domain(email: &str) -> Option<&str> {
    email.split_once('@').map(|(_, domain)| domain)
}

/// Checks if email domain is a public provider (case-insensitive)
pub fn is_public_domain(email: &str) -> bool {
    email_domain(email)
        .is_some_and(|domain| PUBLIC_DOMAINS.iter().any(|d| d.eq_ignore_ascii_case(domain)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("user@example.com")]
    #[case("test.user@example.co.uk")]
    #[case("user+tag@example.com")]
    #[case("user_name@example-domain.com")]
    fn test_valid_emails(#[case] email: &str) {
        assert!(is_valid_email(email));
    }

    #[rstest]
    #[case("")]
    #[case("@")]
    #[case("user@")]
    #[case("@example.com")]
    #[case("user@@example.com")]
    #[case("user@example")]
    #[case("user@.com")]
    #[case("user@example..com")]
    #[case("user@example.c")]
    fn test_invalid_emails(#[case] email: &str) {
        assert!(!is_valid_email(email));
    }

    #[test]
    fn test_public_domains() {
        assert!(is_public_domain("user@gmail.com"));
        assert!(is_public_domain("user@GMAIL.COM"));
        assert!(!is_public_domain("user@company.com"));
        assert!(!is_public_domain("no-at-sign"));
    }
}

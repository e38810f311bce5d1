use validator::ValidateEmail;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;

/// Validates that the input looks like a valid email address.
///
/// The input is checked as given: surrounding whitespace makes it invalid.
/// The domain must end in a top-level label, so `a@localhost` is rejected.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email == email.trim() && email.validate_email() && has_tld(email)
}

fn has_tld(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if host.is_empty() {
        return false;
    }
    // Alphabetic of two or more chars, or a punycode label.
    let alphabetic = tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic);
    let punycode = tld.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && tld.len() >= 4
        && tld[..2].eq_ignore_ascii_case("xn");
    alphabetic || punycode
}

/// Validates a display name: 2-100 characters, counted as chars rather than bytes.
pub fn is_valid_name(name: &str) -> bool {
    let len = name.chars().count();
    (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len)
}

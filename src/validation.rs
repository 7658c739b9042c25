use once_cell::sync::Lazy;
use regex::Regex;
use uuid::{Uuid, Variant};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("invalid email regex: {}", e))
});

/// True iff `value` is the canonical lower-case hyphenated form of a v4 UUID
pub fn validate_uuid(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    match Uuid::parse_str(value) {
        Ok(uuid) => {
            uuid.get_version_num() == 4
                && uuid.get_variant() == Variant::RFC4122
                && uuid.hyphenated().to_string() == value
        }
        Err(_) => false,
    }
}

/// Ids pasted from consoles often arrive wrapped in quotes
pub fn strip_quotes(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '\'' || c == '"')
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Case-insensitive match of the part after the last `@`
pub fn is_domain_in_email(email: &str, domain: &str) -> bool {
    match email.rsplit_once('@') {
        Some((_, email_domain)) => email_domain.eq_ignore_ascii_case(domain),
        None => false,
    }
}

pub fn is_valid_ticket_id(ticket: &str) -> bool {
    !ticket.is_empty() && ticket.chars().all(|c| c.is_ascii_digit())
}

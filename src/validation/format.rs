//! String shape checks shared by the validators.

use chrono::NaiveDate;

/// Returns `true` if `value` has the shape `YYYY-MM-DD`.
///
/// Only the shape is checked: four digits, `-`, two digits, `-`, two
/// digits. Calendar validity is not, so `2023-02-31` and `2023-13-45` are
/// accepted; the server is the authority on real dates.
///
/// # Example
///
/// ```rust
/// use wafeq_api::validation::is_valid_date_format;
///
/// assert!(is_valid_date_format("2023-01-15"));
/// assert!(is_valid_date_format("2023-13-45"));
/// assert!(!is_valid_date_format("2023/01/15"));
/// ```
#[must_use]
pub fn is_valid_date_format(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Formats a calendar date as `YYYY-MM-DD`.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use wafeq_api::validation::format_date;
///
/// let date = NaiveDate::from_ymd_opt(2023, 1, 15).unwrap();
/// assert_eq!(format_date(date), "2023-01-15");
/// ```
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns `true` if `value` looks like `local@domain.tld`.
///
/// The local part may hold ASCII letters, digits and ``!#$%&'*+/=?^_`{|}~.-``
/// without leading, trailing or doubled dots. The domain must have at least
/// two dot-separated labels of letters, digits and inner hyphens, and a
/// top-level label of at least two letters.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    const SPECIALS: &str = "!#$%&'*+/=?^_`{|}~-.";

    !local.is_empty()
        && local.len() <= 64
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SPECIALS.contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || domain.len() > 253 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels_ok && tld_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_date_format() {
        assert!(is_valid_date_format("2023-01-15"));
        assert!(is_valid_date_format("1999-12-31"));
    }

    #[test]
    fn test_date_format_does_not_check_calendar() {
        assert!(is_valid_date_format("2023-02-31"));
        assert!(is_valid_date_format("2023-13-45"));
        assert!(is_valid_date_format("0000-00-00"));
    }

    #[test]
    fn test_invalid_date_formats() {
        assert!(!is_valid_date_format("01-15-2023"));
        assert!(!is_valid_date_format("2023/01/15"));
        assert!(!is_valid_date_format("2023.01.15"));
        assert!(!is_valid_date_format("Jan 15, 2023"));
        assert!(!is_valid_date_format("15-01-2023"));
        assert!(!is_valid_date_format("2023-1-15"));
        assert!(!is_valid_date_format("2023-01-15T00:00:00Z"));
        assert!(!is_valid_date_format(""));
        assert!(!is_valid_date_format("２０２３-01-15"));
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2022, 12, 31).unwrap();
        assert_eq!(format_date(date), "2022-12-31");
        let date = NaiveDate::from_ymd_opt(2023, 2, 28).unwrap();
        assert_eq!(format_date(date), "2023-02-28");
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("customer@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co"));
        assert!(is_valid_email("a_b-c@sub-domain.example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@example.c"));
        assert!(!is_valid_email("user..dots@example.com"));
        assert!(!is_valid_email(".user@example.com"));
        assert!(!is_valid_email("user@-example.com"));
        assert!(!is_valid_email("user@exa_mple.com"));
        assert!(!is_valid_email("user name@example.com"));
        assert!(!is_valid_email("user@example..com"));
    }
}

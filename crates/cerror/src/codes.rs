//! Predefined [`Coder`] catalog.
//!
//! # Code Ranges
//!
//! | Range             | Purpose                                  |
//! |-------------------|------------------------------------------|
//! | `-1`              | `UNKNOWN`, substituted for absent coders  |
//! | `100001..=100999` | Generic transport-level classes (below)  |
//! | `101000..=109999` | Reserved for future catalog entries      |
//! | `110000+`         | **User application space**               |
//!
//! Every entry is a `const` item: built at compile time, never mutated.
//!
//! # Usage
//!
//! ```rust
//! use cerror::codes::*;
//!
//! let err = cerror::new_with_code(NOT_FOUND, "user 42");
//! assert_eq!(err.to_string(), "resource not found: user 42");
//! assert_eq!(cerror::get_coder(&err).map(|c| c.http_status()), Some(404));
//! ```

use crate::Coder;

/// Fallback classification. Used whenever a coded error is built without a coder.
pub const UNKNOWN: Coder = Coder::new(-1, 500, "an internal server error occurred", "");

pub const INTERNAL_SERVER: Coder = Coder::new(100001, 500, "internal server error", "");
pub const NOT_FOUND: Coder = Coder::new(100002, 404, "resource not found", "");
pub const BAD_REQUEST: Coder = Coder::new(100003, 400, "bad request", "");
pub const UNAUTHORIZED: Coder = Coder::new(100004, 401, "authentication required", "");
pub const FORBIDDEN: Coder = Coder::new(100005, 403, "permission denied", "");
pub const VALIDATION: Coder = Coder::new(100006, 400, "validation failed", "");
pub const TIMEOUT: Coder = Coder::new(100007, 504, "request timed out", "");
pub const TOO_MANY_REQUESTS: Coder = Coder::new(100008, 429, "too many requests", "");
pub const CONFLICT: Coder = Coder::new(100009, 409, "resource conflict", "");
pub const UNAVAILABLE: Coder = Coder::new(100010, 503, "service unavailable", "");

static CATALOG: [Coder; 11] = [
    UNKNOWN,
    INTERNAL_SERVER,
    NOT_FOUND,
    BAD_REQUEST,
    UNAUTHORIZED,
    FORBIDDEN,
    VALIDATION,
    TIMEOUT,
    TOO_MANY_REQUESTS,
    CONFLICT,
    UNAVAILABLE,
];

/// All predefined coders, `UNKNOWN` first.
#[inline]
pub fn catalog() -> &'static [Coder] {
    &CATALOG
}

/// Find the predefined coder for `code`.
pub fn lookup(code: i32) -> Option<&'static Coder> {
    CATALOG.iter().find(|c| c.code() == code)
}

/// The sentinel substituted for absent coders.
#[inline]
pub fn unknown_coder() -> &'static Coder {
    &CATALOG[0]
}

/// True if `coder` carries the sentinel's code.
#[inline]
pub fn is_unknown_coder(coder: &Coder) -> bool {
    coder.code() == UNKNOWN.code()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_codes() {
        let expected = [
            (&UNKNOWN, -1, 500),
            (&INTERNAL_SERVER, 100001, 500),
            (&NOT_FOUND, 100002, 404),
            (&BAD_REQUEST, 100003, 400),
            (&UNAUTHORIZED, 100004, 401),
            (&FORBIDDEN, 100005, 403),
            (&VALIDATION, 100006, 400),
            (&TIMEOUT, 100007, 504),
            (&TOO_MANY_REQUESTS, 100008, 429),
            (&CONFLICT, 100009, 409),
            (&UNAVAILABLE, 100010, 503),
        ];
        for (coder, code, status) in expected {
            assert_eq!(coder.code(), code, "{coder:?}");
            assert_eq!(coder.http_status(), status, "{coder:?}");
            assert!(!coder.description().is_empty());
        }
    }

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<i32> = catalog().iter().map(Coder::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), catalog().len());
    }

    #[test]
    fn lookup_by_code() {
        assert_eq!(lookup(100002), Some(&NOT_FOUND));
        assert_eq!(lookup(-1), Some(&UNKNOWN));
        assert!(lookup(42).is_none());
    }

    #[test]
    fn unknown_sentinel() {
        assert_eq!(unknown_coder().code(), -1);
        assert_eq!(unknown_coder().http_status(), 500);
        assert!(is_unknown_coder(unknown_coder()));
        assert!(is_unknown_coder(&Coder::from_parts(-1, 418, "local unknown", "")));
        assert!(!is_unknown_coder(&NOT_FOUND));
    }
}

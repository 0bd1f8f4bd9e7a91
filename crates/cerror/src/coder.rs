use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// A classification attached to an error: numeric code, suggested HTTP
/// status, human description and an optional documentation reference.
///
/// Two coders are equal when their `code` is equal. Description, status
/// and reference play no part in equality, so a locally built coder with a
/// catalog code matches the catalog entry.
///
/// # Naming conventions
///
/// | Range           | Owner                                 |
/// |-----------------|---------------------------------------|
/// | `-1`            | `UNKNOWN` sentinel                    |
/// | `100001-100999` | cerror catalog (see [`crate::codes`]) |
/// | `110000+`       | Application space                     |
#[derive(Clone)]
pub struct Coder {
    code: i32,
    http_status: u16,
    description: Cow<'static, str>,
    reference: Cow<'static, str>,
}

impl Coder {
    /// Construct a coder from static strings. Usable in `const` items.
    ///
    /// ```
    /// use cerror::Coder;
    /// const ERR_QUOTA: Coder = Coder::new(110001, 402, "quota exceeded", "");
    /// assert_eq!(ERR_QUOTA.code(), 110001);
    /// ```
    pub const fn new(
        code: i32,
        http_status: u16,
        description: &'static str,
        reference: &'static str,
    ) -> Self {
        Self {
            code,
            http_status,
            description: Cow::Borrowed(description),
            reference: Cow::Borrowed(reference),
        }
    }

    /// Construct a coder from runtime strings.
    pub fn from_parts(
        code: i32,
        http_status: u16,
        description: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            code,
            http_status,
            description: Cow::Owned(description.into()),
            reference: Cow::Owned(reference.into()),
        }
    }

    #[inline]
    pub const fn code(&self) -> i32 {
        self.code
    }

    #[inline]
    pub const fn http_status(&self) -> u16 {
        self.http_status
    }

    /// Human-readable description. Also what `Display` prints.
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Documentation URI, empty when there is none.
    #[inline]
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl PartialEq for Coder {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Coder {}

impl std::hash::Hash for Coder {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Debug for Coder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Coder");
        d.field("code", &self.code);
        d.field("http_status", &self.http_status);
        d.field("description", &self.description);
        if !self.reference.is_empty() {
            d.field("reference", &self.reference);
        }
        d.finish()
    }
}

impl fmt::Display for Coder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

// A coder can terminate a chain on its own.
impl Error for Coder {}

#[cfg(test)]
mod tests {
    use super::*;

    const ERR_QUOTA: Coder = Coder::new(110001, 402, "quota exceeded", "https://docs.example.com/quota");

    #[test]
    fn equality_by_code() {
        let a = Coder::new(110001, 400, "alpha", "");
        let b = Coder::from_parts(110001, 500, "beta", "x");
        assert_eq!(a, b); // same code = equal, the rest doesn't matter
    }

    #[test]
    fn inequality() {
        let a = Coder::new(110001, 400, "alpha", "");
        let b = Coder::new(110002, 400, "alpha", "");
        assert_ne!(a, b);
    }

    #[test]
    fn const_construction() {
        assert_eq!(ERR_QUOTA.code(), 110001);
        assert_eq!(ERR_QUOTA.http_status(), 402);
        assert_eq!(ERR_QUOTA.description(), "quota exceeded");
        assert_eq!(ERR_QUOTA.reference(), "https://docs.example.com/quota");
    }

    #[test]
    fn display_shows_description() {
        assert_eq!(format!("{}", ERR_QUOTA), "quota exceeded");
        assert_eq!(ERR_QUOTA.to_string(), ERR_QUOTA.description());
    }

    #[test]
    fn debug_omits_empty_reference() {
        let c = Coder::new(7, 500, "seven", "");
        let s = format!("{:?}", c);
        assert!(s.contains("code: 7"), "{s}");
        assert!(!s.contains("reference"), "{s}");
    }

    #[test]
    fn hash_follows_code() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Coder::new(1, 400, "a", ""));
        set.insert(Coder::from_parts(1, 500, "b", ""));
        set.insert(Coder::new(2, 400, "c", ""));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn usable_as_error() {
        let boxed: Box<dyn Error + Send + Sync> = Box::new(ERR_QUOTA.clone());
        assert_eq!(boxed.to_string(), "quota exceeded");
        assert!(boxed.source().is_none());
        assert_eq!(boxed.downcast_ref::<Coder>(), Some(&ERR_QUOTA));
    }
}

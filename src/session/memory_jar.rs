//! In-memory cookie transport.
//!
//! Suitable for tests and for callers that are not serving HTTP directly.
//! Behaves like a browser cookie store for a single site: writes replace the
//! previous value of a slot and removals drop it.

use std::collections::HashMap;

use crate::AuthError;

use super::cookie::{CookieRecord, CookieTransport};

#[derive(Debug, Clone, Default)]
pub struct InMemoryCookieJar {
    cookies: HashMap<String, CookieRecord>,
    incoming: HashMap<String, String>,
}

impl InMemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw cookie value as if the client had sent it, with no
    /// attributes attached.
    #[must_use]
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.incoming.insert(name.into(), value.into());
        self
    }

    /// The last record written for `name`, if it has not been removed since.
    pub fn record(&self, name: &str) -> Option<&CookieRecord> {
        self.cookies.get(name)
    }

    /// Returns the number of cookies currently stored.
    pub fn len(&self) -> usize {
        self.cookies.len() + self.incoming.len()
    }

    /// Returns true if there are no cookies stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CookieTransport for InMemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .get(name)
            .map(|record| record.value.clone())
            .or_else(|| self.incoming.get(name).cloned())
    }

    fn set(&mut self, record: CookieRecord) -> Result<(), AuthError> {
        self.incoming.remove(&record.name);
        self.cookies.insert(record.name.clone(), record);
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<(), AuthError> {
        self.incoming.remove(name);
        self.cookies.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::session::cookie::{CookieAttributes, SameSite};

    fn record(name: &str, value: &str) -> CookieRecord {
        CookieRecord {
            name: name.to_owned(),
            value: value.to_owned(),
            attributes: CookieAttributes {
                http_only: true,
                same_site: SameSite::Lax,
                path: "/".to_owned(),
                secure: false,
                expires: Utc::now() + Duration::days(7),
            },
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut jar = InMemoryCookieJar::new();
        assert!(jar.is_empty());

        jar.set(record("auth-token", "one")).unwrap();
        assert_eq!(jar.get("auth-token"), Some("one".to_owned()));
        assert_eq!(jar.record("auth-token").unwrap().value, "one");
        assert_eq!(jar.len(), 1);
    }

    #[test]
    fn test_set_replaces_previous_value() {
        let mut jar = InMemoryCookieJar::new().with_cookie("auth-token", "stale");

        jar.set(record("auth-token", "fresh")).unwrap();
        assert_eq!(jar.get("auth-token"), Some("fresh".to_owned()));
        assert_eq!(jar.len(), 1);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut jar = InMemoryCookieJar::new().with_cookie("auth-token", "value");

        jar.delete("auth-token").unwrap();
        jar.delete("auth-token").unwrap();

        assert_eq!(jar.get("auth-token"), None);
        assert!(jar.is_empty());
    }

    #[test]
    fn test_other_cookies_untouched() {
        let mut jar = InMemoryCookieJar::new().with_cookie("theme", "dark");

        jar.set(record("auth-token", "token")).unwrap();
        jar.delete("auth-token").unwrap();

        assert_eq!(jar.get("theme"), Some("dark".to_owned()));
    }
}

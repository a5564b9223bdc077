//! Domain types for the movie catalog, favorites and chat feed.
//!
//! Identifiers are newtypes so a movie id can never be handed to a query that
//! expects a user id. Query objects (`CatalogQuery`, `FeedQuery`) are built
//! from loosely-typed HTTP parameters once, at the edge, and carried through
//! the services fully validated.

pub mod catalog;
pub mod feed;

pub use catalog::{CatalogQuery, GenreFilter, MovieSort, PageRequest, Pagination, search_text};
pub use feed::FeedQuery;

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn value(&self) -> i32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self::new(id)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_i32(self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                i32::deserialize(deserializer).map(Self::new)
            }
        }
    };
}

entity_id!(
    /// Identifier of a registered user.
    ///
    /// ```rust
    /// use cinepair::domain::UserId;
    ///
    /// let id = UserId::new(7);
    /// assert_eq!(id.value(), 7);
    /// assert_eq!(id.to_string(), "7");
    /// ```
    UserId
);

entity_id!(
    /// Identifier of a catalog movie.
    MovieId
);

entity_id!(
    /// Identifier of a chat message. Ids are monotonically assigned, which is
    /// what makes them usable as a polling cursor.
    MessageId
);

/// Longest accepted display name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Lenient numeric query parameter: anything that is missing, not a number or
/// below 1 yields `default`.
///
/// ```rust
/// use cinepair::domain::parse_positive_or;
///
/// assert_eq!(parse_positive_or(Some("3"), 1), 3);
/// assert_eq!(parse_positive_or(Some("abc"), 1), 1);
/// assert_eq!(parse_positive_or(Some("0"), 12), 12);
/// assert_eq!(parse_positive_or(None, 12), 12);
/// ```
#[must_use]
pub fn parse_positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(default)
}

/// Optional id parameter. Unparseable or non-positive values are treated as
/// absent rather than rejected.
#[must_use]
pub fn parse_optional_id(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|s| s.trim().parse::<i32>().ok())
        .filter(|n| *n >= 1)
}

/// Current time in the store's timestamp format.
///
/// Fixed microsecond precision keeps string order equal to time order.
#[must_use]
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&MovieId::new(5)).unwrap();
        assert_eq!(json, "5");

        let id: UserId = serde_json::from_str("12").unwrap();
        assert_eq!(id, UserId::new(12));
    }

    #[test]
    fn test_parse_positive_or() {
        assert_eq!(parse_positive_or(Some(" 4 "), 1), 4);
        assert_eq!(parse_positive_or(Some("-2"), 1), 1);
        assert_eq!(parse_positive_or(Some("2.5"), 12), 12);
        assert_eq!(parse_positive_or(Some(""), 12), 12);
    }

    #[test]
    fn test_parse_optional_id() {
        assert_eq!(parse_optional_id(Some("9")), Some(9));
        assert_eq!(parse_optional_id(Some("x")), None);
        assert_eq!(parse_optional_id(Some("0")), None);
        assert_eq!(parse_optional_id(None), None);
    }

    #[test]
    fn test_timestamps_sort_chronologically() {
        let a = now_timestamp();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = now_timestamp();
        assert!(a < b);
        assert!(a.ends_with('Z'));
        // 2025-01-01T00:00:00.000000Z
        assert_eq!(a.len(), 27);
    }
}

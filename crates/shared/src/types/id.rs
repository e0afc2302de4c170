//! Typed identifiers for ledger entities.
//!
//! Legacy books identify accounts and groups by unique names and
//! transactions by numeric ids, so the wrappers here carry those values
//! rather than generated surrogate keys. Using distinct types prevents
//! accidentally passing a `GroupName` where an `AccountName` is expected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Name keys serialize for snapshots but deliberately do not implement
// `Deserialize`: the only validated way in is `new`/`FromStr`.

/// Errors raised by name validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    /// The name was empty or whitespace-only.
    #[error("name must not be empty")]
    Empty,
}

/// Macro to generate validated name-key wrappers.
macro_rules! name_key {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a validated name; surrounding whitespace is trimmed.
            ///
            /// # Errors
            ///
            /// Returns [`NameError::Empty`] for an empty or whitespace-only
            /// name.
            pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
                let name = name.into();
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Err(NameError::Empty);
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the name as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = NameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }
    };
}

name_key!(
    AccountName,
    "Unique account name; the account's primary key, immutable once created."
);
name_key!(
    GroupName,
    "Account-group name, unique within a fiscal year's classification scheme."
);
name_key!(EntityName, "Capital-entity (owner/partner) name.");

/// Numeric transaction identifier.
///
/// Legacy transactions keep their flat-file ids; transactions synthesized by
/// the migration (opening balances, closing entries) draw from the reserved
/// range starting at [`TransactionId::FIRST_SYNTHETIC`], which sits above
/// every id the legacy format can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(i64);

impl TransactionId {
    /// First id of the reserved range for synthesized transactions.
    pub const FIRST_SYNTHETIC: Self = Self(1_000_000_000);

    /// Wraps a raw id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns true if the id lies in the reserved synthesized range.
    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        self.0 >= Self::FIRST_SYNTHETIC.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

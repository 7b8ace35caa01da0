//! Newtype wrappers around `String` for desk and schedule identifiers.
//!
//! The UI names a desk one way (`"Table 2 UP"`) and the backend another
//! (`locationId`). Using distinct types keeps a `DeskKey` from being passed
//! where a `LocationId` is expected; the two are only ever related through
//! an explicit mapping table.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype key wrapper around `String`.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_key!(
    /// UI-facing desk name as drawn on the floor plan (e.g. `"Table 2 UP"`).
    DeskKey
);

define_key!(
    /// Backend-assigned desk identifier (`locationId`).
    LocationId
);

define_key!(
    /// Opaque identifier of a booking or attendance, unique within a desk.
    EntryId
);

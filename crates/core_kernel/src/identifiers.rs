//! Strongly-typed identifiers for domain entities
//!
//! Accounts are opaque tokens supplied by the collaborator layer, so they wrap
//! UUIDs. Bills are numbered by the ledger itself and wrap a sequence number.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CoreError;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// The all-zero identifier
            pub fn nil() -> Self {
                Self(Uuid::nil())
            }

            /// Returns true for the all-zero identifier
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Strip prefix if present
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Participants (contributors, payees, administrators)
define_id!(AccountId, "ACC");

// Capability token naming the only caller allowed to mint or burn credits
define_id!(MinterId, "MNT");

/// Sequential bill identifier
///
/// Assigned by the ledger in creation order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillId(u64);

impl BillId {
    /// The first identifier a fresh ledger hands out
    pub const FIRST: BillId = BillId(1);

    pub fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Returns the sequence number
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the identifier following this one
    pub fn next(&self) -> Option<BillId> {
        self.0.checked_add(1).map(BillId)
    }

    /// Returns the identifier prefix for display
    pub fn prefix() -> &'static str {
        "BILL"
    }
}

impl fmt::Display for BillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BILL-{}", self.0)
    }
}

impl FromStr for BillId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("BILL-").unwrap_or(s);
        digits
            .parse::<u64>()
            .map(BillId)
            .map_err(|e| CoreError::invalid_identifier(s, e))
    }
}

impl From<u64> for BillId {
    fn from(sequence: u64) -> Self {
        Self(sequence)
    }
}

//! Typed identifiers.
//!
//! Forms and URLs carry ids as strings; storage uses integers. Both id types
//! parse from a positive decimal string and are plain integers on the wire;
//! deserializing goes through the same positivity check as [`ResourceId::new`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ClinicError;

macro_rules! positive_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw id, rejecting zero and negative values.
            pub fn new(raw: i64) -> Result<Self, ClinicError> {
                if raw > 0 {
                    Ok(Self(raw))
                } else {
                    Err(ClinicError::Validation(format!(
                        "{} must be a positive integer, got {}",
                        $label, raw
                    )))
                }
            }

            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ClinicError;

            fn try_from(raw: i64) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = ClinicError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ClinicError::Validation(format!(
                        "{} must be a numeric string, got {:?}",
                        $label, s
                    )));
                }
                let raw = trimmed.parse::<i64>().map_err(|_| {
                    ClinicError::Validation(format!("{} is out of range: {}", $label, trimmed))
                })?;
                Self::new(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

positive_id!(ResourceId, "Resource ID");
positive_id!(FacilityId, "Facility ID");

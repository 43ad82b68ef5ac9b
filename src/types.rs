/// Shared types used across the codebase

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why a raw route or query value could not become an identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("'{0}' is not a valid integer")]
    NotAnInteger(String),

    #[error("'{0}' must be a positive integer")]
    NotPositive(String),
}

/// Parse a positive `i32` identifier. Surrounding whitespace is not tolerated.
pub fn parse_positive_id(raw: &str) -> Result<i32, IdParseError> {
    let value: i32 = raw
        .parse()
        .map_err(|_| IdParseError::NotAnInteger(raw.to_string()))?;
    if value <= 0 {
        return Err(IdParseError::NotPositive(raw.to_string()));
    }
    Ok(value)
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub i32);

        impl $name {
            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_positive_id(s).map($name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_id!(
    /// Identifier of a row in `Concern`
    ConcernId
);
record_id!(
    /// Identifier of a row in `Skin_Type`
    SkinTypeId
);
record_id!(
    /// Identifier of a row in `Product_Type`
    ProductTypeId
);
record_id!(
    /// Identifier of a row in `Products`
    ProductId
);
record_id!(
    /// Identifier of a row in any of the five reference tables
    RecordId
);

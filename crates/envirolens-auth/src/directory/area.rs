use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Service area a user belongs to.
#[allow(missing_docs)]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    Colombo,
    Galle,
    Kandy,
    Jaffna,
    Matara,
}

impl Area {
    /// Every area, in the order they are offered to the user.
    pub const ALL: [Area; 5] = [
        Area::Colombo,
        Area::Galle,
        Area::Kandy,
        Area::Jaffna,
        Area::Matara,
    ];

    /// The name stored in the profile document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Colombo => "Colombo",
            Area::Galle => "Galle",
            Area::Kandy => "Kandy",
            Area::Jaffna => "Jaffna",
            Area::Matara => "Matara",
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[allow(missing_docs)]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown area: {0}")]
pub struct UnknownAreaError(pub String);

impl FromStr for Area {
    type Err = UnknownAreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Area::ALL
            .into_iter()
            .find(|area| area.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownAreaError(s.to_string()))
    }
}

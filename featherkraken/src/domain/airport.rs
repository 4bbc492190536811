//! Airport type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An airport as returned by the lookup endpoint.
///
/// `name` is the IATA-like code and is the unique key; `display_name` is
/// the human-readable city or airport name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

impl Airport {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
        }
    }

    /// An airport known only by its code.
    pub fn from_code(name: impl Into<String>) -> Self {
        Self::new(name, "")
    }
}

impl fmt::Display for Airport {
    /// Renders as "Display Name CODE", or just the code if there is no name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.display_name.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{} {}", self.display_name, self.name)
        }
    }
}

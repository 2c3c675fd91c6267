//! The drive-thru menu.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a name does not match anything on the menu.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("not on the menu: {0}")]
pub struct UnknownMenuItem(pub String);

/// Something a customer can order.
///
/// Serialized in lowercase plural form (`"burgers"`, `"fries"`, `"drinks"`),
/// which is also the vocabulary the order interpreter is told to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuItem {
    Burgers,
    Fries,
    Drinks,
}

impl MenuItem {
    /// Every item on the menu, in menu order.
    pub const ALL: [Self; 3] = [Self::Burgers, Self::Fries, Self::Drinks];

    /// The wire name of this item.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Burgers => "burgers",
            Self::Fries => "fries",
            Self::Drinks => "drinks",
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuItem {
    type Err = UnknownMenuItem;

    /// Case-insensitive, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|item| item.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownMenuItem(name.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_menu_names() {
        assert_eq!("burgers".parse::<MenuItem>().unwrap(), MenuItem::Burgers);
        assert_eq!(" Fries ".parse::<MenuItem>().unwrap(), MenuItem::Fries);
        assert_eq!("DRINKS".parse::<MenuItem>().unwrap(), MenuItem::Drinks);
    }

    #[test]
    fn test_from_str_rejects_off_menu() {
        let err = "pizza".parse::<MenuItem>().unwrap_err();
        assert_eq!(err, UnknownMenuItem("pizza".to_string()));
        assert_eq!(err.to_string(), "not on the menu: pizza");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&MenuItem::Fries).unwrap(),
            "\"fries\""
        );
        assert_eq!(
            serde_json::from_str::<MenuItem>("\"drinks\"").unwrap(),
            MenuItem::Drinks
        );
    }
}

//! Travel preferences captured by the form

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::destination::{BudgetLevel, DestinationType};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default, skip_serializing_if = "TypePreference::is_unset")]
    pub preferred_type: TypePreference,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub budget_level: Option<BudgetLevel>,
    #[serde(default)]
    pub activities: Vec<String>,
}

/// The preferred-type field as submitted.
///
/// Only a missing field is neutral. The form always sends the field, so an
/// untouched select arrives as `Blank` and matches no destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypePreference {
    #[default]
    Unset,
    Blank,
    Kind(DestinationType),
}

impl TypePreference {
    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    #[must_use]
    pub fn kind(&self) -> Option<DestinationType> {
        match self {
            Self::Kind(kind) => Some(*kind),
            Self::Unset | Self::Blank => None,
        }
    }
}

impl Serialize for TypePreference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unset => serializer.serialize_none(),
            Self::Blank => serializer.serialize_str(""),
            Self::Kind(kind) => kind.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TypePreference {
    /// `""` and `null` are `Blank`; a missing field never reaches here.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(Self::Blank),
            Some(value) => value
                .parse()
                .map(Self::Kind)
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Select inputs submit `""` until the user picks a value.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(value) if !value.trim().is_empty() => {
            value.parse().map(Some).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}

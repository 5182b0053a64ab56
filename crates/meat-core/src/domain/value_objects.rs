//! Domain value objects: ProjectType, Toggle, BuildMode.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! This file's only job is to define the types, their string
//! representations, and their parsers.

use crate::domain::error::DomainError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// ── ProjectType ──────────────────────────────────────────────────────────────

/// The base scaffolding a project is created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Themosis,
    Laravel,
    #[default]
    Blank,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [Self::Themosis, Self::Laravel, Self::Blank];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Themosis => "themosis",
            Self::Laravel => "laravel",
            Self::Blank => "blank",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Themosis => "Themosis",
            Self::Laravel => "Laravel",
            Self::Blank => "Blank",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "themosis" => Ok(Self::Themosis),
            "laravel" => Ok(Self::Laravel),
            "blank" => Ok(Self::Blank),
            other => Err(DomainError::UnknownProjectType(other.to_string())),
        }
    }
}

// ── Toggle ───────────────────────────────────────────────────────────────────

/// A configuration switch that may defer to filesystem probes.
///
/// Absent keys deserialize to [`Toggle::Off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    #[default]
    Off,
    On,
    Auto,
}

impl Toggle {
    /// Resolve the toggle; `probe` is only evaluated for [`Toggle::Auto`].
    pub fn resolve(self, probe: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Off => false,
            Self::On => true,
            Self::Auto => probe(),
        }
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl FromStr for Toggle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "true" | "on" | "yes" | "1" => Ok(Self::On),
            "false" | "off" | "no" | "0" | "" => Ok(Self::Off),
            other => Err(DomainError::InvalidToggle(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Toggle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ToggleVisitor;

        impl Visitor<'_> for ToggleVisitor {
            type Value = Toggle;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean or the string \"auto\"")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Toggle, E> {
                Ok(Toggle::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Toggle, E> {
                Ok(Toggle::from(v != 0))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Toggle, E> {
                Ok(Toggle::from(v != 0))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Toggle, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Toggle, E> {
                Ok(Toggle::Off)
            }
        }

        deserializer.deserialize_any(ToggleVisitor)
    }
}

// ── BuildMode ────────────────────────────────────────────────────────────────

/// Asset compilation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Dev,
    Production,
}

impl BuildMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

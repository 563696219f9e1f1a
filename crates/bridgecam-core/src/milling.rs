//! Milling side classifications
//!
//! `SideOfMilling` selects where a cut falls relative to a toolpath, and
//! `BoardSide` records which face of the stock a toolpath file belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Offset side of a cut relative to the toolpath it interrupts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideOfMilling {
    /// Centered on the toolpath
    On,
    /// Offset away from the enclosed area
    Outer,
    /// Offset into the enclosed area
    Inner,
}

impl Default for SideOfMilling {
    fn default() -> Self {
        Self::Outer
    }
}

impl fmt::Display for SideOfMilling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => write!(f, "On"),
            Self::Outer => write!(f, "Outer"),
            Self::Inner => write!(f, "Inner"),
        }
    }
}

impl FromStr for SideOfMilling {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on" => Ok(Self::On),
            "outer" | "outside" => Ok(Self::Outer),
            "inner" | "inside" => Ok(Self::Inner),
            _ => Err(Error::Parse(format!("Unknown side of milling: {}", s))),
        }
    }
}

/// Face of the stock a toolpath file is machined from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardSide {
    /// Top face
    Top,
    /// Bottom face (mirrored)
    Bottom,
}

impl Default for BoardSide {
    fn default() -> Self {
        Self::Top
    }
}

impl fmt::Display for BoardSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "Top"),
            Self::Bottom => write!(f, "Bottom"),
        }
    }
}

impl FromStr for BoardSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "bottom" | "bot" => Ok(Self::Bottom),
            _ => Err(Error::Parse(format!("Unknown board side: {}", s))),
        }
    }
}

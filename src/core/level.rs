//! Course code parsing and level bands.
//!
//! A course code is an alphabetic department prefix followed by a run of
//! digits (`AE101`, `PSY1414`). The digits form the course number; the
//! course *level* is that number floored to its hundred, so `AE101` is a
//! 100-level course and `AE1313` a 1300-level one.

use crate::utils::error::{CatalogError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)([0-9]+)$").expect("course code pattern is valid"));

/// A parsed course code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCode {
    prefix: String,
    number: u32,
}

impl CourseCode {
    /// Codes are matched exactly, like catalog lookups; surrounding
    /// whitespace makes a code malformed.
    pub fn parse(code: &str) -> Result<Self> {
        let caps = CODE_PATTERN
            .captures(code)
            .ok_or_else(|| CatalogError::MalformedCode {
                code: code.to_string(),
                reason: describe_mismatch(code).to_string(),
            })?;

        let number = caps[2]
            .parse::<u32>()
            .map_err(|e| CatalogError::MalformedCode {
                code: code.to_string(),
                reason: format!("course number out of range: {}", e),
            })?;

        Ok(Self {
            prefix: caps[1].to_string(),
            number,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn level(&self) -> u32 {
        self.number / 100 * 100
    }
}

fn describe_mismatch(code: &str) -> &'static str {
    if code.is_empty() {
        "empty code"
    } else if code.trim() != code {
        "surrounding whitespace"
    } else if !code.starts_with(|c: char| c.is_ascii_alphabetic()) {
        "missing alphabetic department prefix"
    } else if !code.contains(|c: char| c.is_ascii_digit()) {
        "missing course number"
    } else {
        "unexpected characters around course number"
    }
}

/// One of the seven fixed level ranges offered by the level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LevelBand {
    L100To200,
    L300To400,
    L500To600,
    L700To800,
    L900To1000,
    L1100To1200,
    L1300To1400,
}

impl LevelBand {
    pub const ALL: [LevelBand; 7] = [
        LevelBand::L100To200,
        LevelBand::L300To400,
        LevelBand::L500To600,
        LevelBand::L700To800,
        LevelBand::L900To1000,
        LevelBand::L1100To1200,
        LevelBand::L1300To1400,
    ];

    pub fn bounds(self) -> (u32, u32) {
        match self {
            LevelBand::L100To200 => (100, 200),
            LevelBand::L300To400 => (300, 400),
            LevelBand::L500To600 => (500, 600),
            LevelBand::L700To800 => (700, 800),
            LevelBand::L900To1000 => (900, 1000),
            LevelBand::L1100To1200 => (1100, 1200),
            LevelBand::L1300To1400 => (1300, 1400),
        }
    }

    /// Inclusive on both ends.
    pub fn contains(self, level: u32) -> bool {
        let (start, end) = self.bounds();
        start <= level && level <= end
    }
}

impl fmt::Display for LevelBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.bounds();
        write!(f, "{}-{}", start, end)
    }
}

impl FromStr for LevelBand {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().replace(' ', "");
        LevelBand::ALL
            .into_iter()
            .find(|band| band.to_string() == wanted)
            .ok_or_else(|| CatalogError::InvalidLevelBand {
                value: s.to_string(),
            })
    }
}

impl Serialize for LevelBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LevelBand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

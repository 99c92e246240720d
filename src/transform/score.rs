//! Heuristic security level
//!
//! Purely advisory: the rating reflects configuration choices and has no
//! effect on the generated artifact.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::encoder::EncodingMethod;

/// Optional hardening switches
///
/// These only feed the scorer; they do not change the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureFlags {
    /// Anti-tamper checks
    #[serde(default)]
    pub anti_tamper: bool,
    /// Variable renaming
    #[serde(default)]
    pub var_rename: bool,
    /// String literal encryption
    #[serde(default)]
    pub string_encrypt: bool,
}

impl FeatureFlags {
    /// All flags enabled
    pub fn all() -> Self {
        Self {
            anti_tamper: true,
            var_rename: true,
            string_encrypt: true,
        }
    }
}

/// Qualitative security band, ordered from weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    /// Below 30 points
    Low,
    /// 30 to 49 points
    Medium,
    /// 50 to 69 points
    High,
    /// 70 points and up
    #[serde(rename = "Military Grade")]
    MilitaryGrade,
}

impl Rating {
    /// Band for a point total
    pub fn from_points(points: u32) -> Self {
        match points {
            70.. => Self::MilitaryGrade,
            50.. => Self::High,
            30.. => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::MilitaryGrade => "Military Grade",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Point total for a method and flag set
pub fn score_points(method: EncodingMethod, flags: FeatureFlags) -> u32 {
    let base = match method {
        EncodingMethod::LayeredEscape => 40,
        EncodingMethod::PlainEscape => 20,
        EncodingMethod::CodepointList | EncodingMethod::HexPairs => 10,
    };

    let mut points = base;
    if flags.anti_tamper {
        points += 20;
    }
    if flags.var_rename {
        points += 15;
    }
    if flags.string_encrypt {
        points += 10;
    }
    points
}

/// Rate a method and flag set
///
/// # Examples
///
/// ```
/// use luacloak::transform::{score, EncodingMethod, FeatureFlags, Rating};
///
/// assert_eq!(score(EncodingMethod::LayeredEscape, FeatureFlags::all()), Rating::MilitaryGrade);
/// assert_eq!(score(EncodingMethod::HexPairs, FeatureFlags::default()), Rating::Low);
/// ```
pub fn score(method: EncodingMethod, flags: FeatureFlags) -> Rating {
    Rating::from_points(score_points(method, flags))
}

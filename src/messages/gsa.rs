//! GSA: DOP and active satellites
use crate::{
    messages::{optional, raw},
    sentence::Sentence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Receiver 2D/3D selection mode
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixMode {
    Manual,
    Automatic,
}

impl std::str::FromStr for FixMode {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" => Ok(Self::Manual),
            "A" => Ok(Self::Automatic),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixType {
    NoFix,
    Fix2D,
    Fix3D,
}

impl std::str::FromStr for FixType {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::NoFix),
            "2" => Ok(Self::Fix2D),
            "3" => Ok(Self::Fix3D),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for FixType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NoFix => f.write_str("no fix"),
            Self::Fix2D => f.write_str("2D"),
            Self::Fix3D => f.write_str("3D"),
        }
    }
}

/// Up to 12 satellite IDs are reported, in fields 3 to 14
const USED_IDS_FIELDS: std::ops::RangeInclusive<usize> = 3..=14;

/// DOP and active satellites
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gsa {
    pub mode: Option<FixMode>,
    pub fix_type: Option<FixType>,
    /// IDs of satellites used in the solution
    pub used: Vec<u16>,
    pub pdop: Option<f64>,
    pub hdop: Option<f64>,
    pub vdop: Option<f64>,
}

impl Gsa {
    pub(crate) fn parse(sentence: &Sentence) -> Self {
        Self {
            mode: optional(sentence, 1),
            fix_type: optional(sentence, 2),
            used: USED_IDS_FIELDS
                .filter_map(|i| raw(sentence, i).parse::<u16>().ok())
                .collect(),
            pdop: optional(sentence, 15),
            hdop: optional(sentence, 16),
            vdop: optional(sentence, 17),
        }
    }
}

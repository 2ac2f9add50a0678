//! Talker identification and talker to constellation resolution
use std::collections::BTreeMap;

use thiserror::Error;

use crate::constellation::Constellation;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Talker parsing related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("invalid talker \"{0}\": expecting 2 ascii characters")]
    InvalidTalker(String),
}

/// [TalkerId] is the 2 character source code of a sentence,
/// for example `GP` in `$GPGSV`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct TalkerId([u8; 2]);

impl TalkerId {
    /// GPS
    pub const GP: Self = Self(*b"GP");
    /// Glonass
    pub const GL: Self = Self(*b"GL");
    /// Galileo
    pub const GA: Self = Self(*b"GA");
    /// BeiDou
    pub const GB: Self = Self(*b"GB");
    /// BeiDou (legacy code)
    pub const BD: Self = Self(*b"BD");
    /// QZSS
    pub const GQ: Self = Self(*b"GQ");
    /// QZSS (legacy code)
    pub const QZ: Self = Self(*b"QZ");
    /// Mixed, multi constellation receivers
    pub const GN: Self = Self(*b"GN");

    pub fn as_str(&self) -> &str {
        // built from ascii only
        std::str::from_utf8(&self.0).unwrap_or("??")
    }
}

impl std::fmt::Display for TalkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TalkerId {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 || !s.is_ascii() {
            return Err(ParsingError::InvalidTalker(s.to_string()));
        }
        Ok(Self([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
        ]))
    }
}

impl TryFrom<String> for TalkerId {
    type Error = ParsingError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TalkerId> for String {
    fn from(t: TalkerId) -> String {
        t.to_string()
    }
}

/// How satellites reported by a talker are attributed to a [Constellation]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Resolution {
    /// Every satellite belongs to this [Constellation]
    Fixed(Constellation),
    /// Mixed talker: constellation is deduced from each PRN
    PerSatellite,
}

/// Talker to [Resolution] lookup table.
/// Talkers absent from the table resolve to [Constellation::Unknown].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TalkerTable(BTreeMap<TalkerId, Resolution>);

impl Default for TalkerTable {
    fn default() -> Self {
        Self(BTreeMap::from([
            (TalkerId::GP, Resolution::Fixed(Constellation::GPS)),
            (TalkerId::GL, Resolution::Fixed(Constellation::Glonass)),
            (TalkerId::GA, Resolution::Fixed(Constellation::Galileo)),
            (TalkerId::GB, Resolution::Fixed(Constellation::BeiDou)),
            (TalkerId::BD, Resolution::Fixed(Constellation::BeiDou)),
            (TalkerId::GQ, Resolution::Fixed(Constellation::QZSS)),
            (TalkerId::QZ, Resolution::Fixed(Constellation::QZSS)),
            (TalkerId::GN, Resolution::PerSatellite),
        ]))
    }
}

impl TalkerTable {
    /// Builds an empty table: every talker resolves to [Constellation::Unknown]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }
    /// Copies and returns [TalkerTable] with one more (or replaced) entry
    pub fn with(&self, talker: TalkerId, resolution: Resolution) -> Self {
        let mut s = self.clone();
        s.0.insert(talker, resolution);
        s
    }
    pub fn resolution(&self, talker: &TalkerId) -> Resolution {
        self.0
            .get(talker)
            .copied()
            .unwrap_or(Resolution::Fixed(Constellation::Unknown))
    }
}

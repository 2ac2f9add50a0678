//! GGA: fix data
use crate::{
    coordinates::dms_to_decimal,
    messages::{optional, optional_string, raw},
    sentence::Sentence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// GGA fix quality indicator
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixQuality {
    /// Fix not available
    Invalid,
    /// Autonomous GNSS fix
    GNSS,
    /// Differential GNSS fix
    DGNSS,
    /// PPS fix
    PPS,
    /// RTK with fixed ambiguities
    RTK,
    /// RTK with float ambiguities
    FloatRTK,
    /// Dead reckoning
    Estimated,
    /// Manual input mode
    Manual,
    /// Simulation mode
    Simulation,
}

impl std::str::FromStr for FixQuality {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Self::Invalid),
            "1" => Ok(Self::GNSS),
            "2" => Ok(Self::DGNSS),
            "3" => Ok(Self::PPS),
            "4" => Ok(Self::RTK),
            "5" => Ok(Self::FloatRTK),
            "6" => Ok(Self::Estimated),
            "7" => Ok(Self::Manual),
            "8" => Ok(Self::Simulation),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for FixQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Invalid => f.write_str("invalid"),
            Self::GNSS => f.write_str("GNSS"),
            Self::DGNSS => f.write_str("DGNSS"),
            Self::PPS => f.write_str("PPS"),
            Self::RTK => f.write_str("RTK"),
            Self::FloatRTK => f.write_str("float RTK"),
            Self::Estimated => f.write_str("estimated"),
            Self::Manual => f.write_str("manual"),
            Self::Simulation => f.write_str("simulation"),
        }
    }
}

/// Global positioning system fix data
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gga {
    /// UTC time of fix, hhmmss(.ss)
    pub time: Option<String>,
    /// Latitude in decimal degrees, north positive
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees, east positive
    pub longitude: Option<f64>,
    pub quality: Option<FixQuality>,
    /// Number of satellites in use
    pub satellites: Option<u8>,
    pub hdop: Option<f64>,
    /// Altitude above mean sea level (m)
    pub altitude: Option<f64>,
}

impl Gga {
    pub(crate) fn parse(sentence: &Sentence) -> Self {
        Self {
            time: optional_string(sentence, 1),
            latitude: dms_to_decimal(raw(sentence, 2), raw(sentence, 3)),
            longitude: dms_to_decimal(raw(sentence, 4), raw(sentence, 5)),
            quality: optional(sentence, 6),
            satellites: optional(sentence, 7),
            hdop: optional(sentence, 8),
            altitude: optional(sentence, 9),
        }
    }
}

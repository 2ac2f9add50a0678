//! RMC: recommended minimum data
use hifitime::Epoch;

use crate::{
    coordinates::dms_to_decimal,
    messages::{optional, optional_string, raw, utc_epoch},
    sentence::Sentence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RMC data status
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    Valid,
    Invalid,
}

impl std::str::FromStr for Status {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(Self::Valid),
            "V" => Ok(Self::Invalid),
            _ => Err(()),
        }
    }
}

/// Recommended minimum specific GNSS data
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rmc {
    /// UTC time, hhmmss(.ss)
    pub time: Option<String>,
    pub status: Option<Status>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Speed over ground (knots)
    pub speed_knots: Option<f64>,
    /// Course over ground (degrees, true)
    pub course: Option<f64>,
    /// UTC date, ddmmyy
    pub date: Option<String>,
    /// Magnetic variation in degrees, west negative
    pub magnetic_variation: Option<f64>,
}

impl Rmc {
    pub(crate) fn parse(sentence: &Sentence) -> Self {
        Self {
            time: optional_string(sentence, 1),
            status: optional(sentence, 2),
            latitude: dms_to_decimal(raw(sentence, 3), raw(sentence, 4)),
            longitude: dms_to_decimal(raw(sentence, 5), raw(sentence, 6)),
            speed_knots: optional(sentence, 7),
            course: optional(sentence, 8),
            date: optional_string(sentence, 9),
            magnetic_variation: optional::<f64>(sentence, 10).map(|var| {
                if raw(sentence, 11) == "W" {
                    -var
                } else {
                    var
                }
            }),
        }
    }
    /// Returns UTC [Epoch] of this message, when both date and time are known
    pub fn epoch(&self) -> Option<Epoch> {
        let date = self.date.as_ref()?;
        if date.len() != 6 || !date.is_ascii() {
            return None;
        }
        let day = date[0..2].parse::<u8>().ok()?;
        let month = date[2..4].parse::<u8>().ok()?;
        // two digit years: 1980 to 2079
        let year = match date[4..6].parse::<i32>().ok()? {
            yy if yy >= 80 => 1900 + yy,
            yy => 2000 + yy,
        };
        utc_epoch(year, month, day, self.time.as_ref()?)
    }
}

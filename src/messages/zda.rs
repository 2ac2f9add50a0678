//! ZDA: time and date
use hifitime::Epoch;

use crate::{
    messages::{optional, optional_string, utc_epoch},
    sentence::Sentence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// UTC time & date, with local zone description
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Zda {
    /// UTC time, hhmmss(.ss)
    pub time: Option<String>,
    pub day: Option<u8>,
    pub month: Option<u8>,
    pub year: Option<i32>,
    /// Local zone offset, hours (-13..13)
    pub zone_hours: Option<i8>,
    /// Local zone offset, minutes
    pub zone_minutes: Option<u8>,
}

impl Zda {
    pub(crate) fn parse(sentence: &Sentence) -> Self {
        Self {
            time: optional_string(sentence, 1),
            day: optional(sentence, 2),
            month: optional(sentence, 3),
            year: optional(sentence, 4),
            zone_hours: optional(sentence, 5),
            zone_minutes: optional(sentence, 6),
        }
    }
    /// Returns UTC [Epoch] of this message, when fully described
    pub fn epoch(&self) -> Option<Epoch> {
        utc_epoch(self.year?, self.month?, self.day?, self.time.as_ref()?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    #[test]
    fn zda() {
        let sentence = Sentence::from_str("$GPZDA,201530.00,04,07,2002,00,00*60").unwrap();
        let zda = Zda::parse(&sentence);
        assert_eq!(zda.time.as_deref(), Some("201530.00"));
        assert_eq!(zda.day, Some(4));
        assert_eq!(zda.month, Some(7));
        assert_eq!(zda.year, Some(2002));
        assert_eq!(zda.zone_hours, Some(0));
        assert_eq!(zda.zone_minutes, Some(0));
        assert_eq!(
            zda.epoch(),
            Some(Epoch::from_gregorian_utc_hms(2002, 7, 4, 20, 15, 30))
        );
    }
    #[test]
    fn incomplete() {
        let sentence = Sentence::from_str("$GNZDA,,,,,,*56").unwrap();
        let zda = Zda::parse(&sentence);
        assert_eq!(zda, Zda::default());
        assert!(zda.epoch().is_none());
    }
}

//! VTG: track made good and ground speed
use crate::{messages::optional, sentence::Sentence};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Course and speed over ground
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vtg {
    /// Course over ground, true north (degrees)
    pub course_true: Option<f64>,
    /// Course over ground, magnetic north (degrees)
    pub course_magnetic: Option<f64>,
    pub speed_knots: Option<f64>,
    pub speed_kmh: Option<f64>,
}

impl Vtg {
    pub(crate) fn parse(sentence: &Sentence) -> Self {
        // each value is followed by its unit letter
        Self {
            course_true: optional(sentence, 1),
            course_magnetic: optional(sentence, 3),
            speed_knots: optional(sentence, 5),
            speed_kmh: optional(sentence, 7),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    #[test]
    fn vtg() {
        let sentence = Sentence::from_str("$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48").unwrap();
        let vtg = Vtg::parse(&sentence);
        assert_eq!(vtg.course_true, Some(54.7));
        assert_eq!(vtg.course_magnetic, Some(34.4));
        assert_eq!(vtg.speed_knots, Some(5.5));
        assert_eq!(vtg.speed_kmh, Some(10.2));

        let sentence = Sentence::from_str("$GNVTG,,T,,M,0.012,N,0.022,K,A*3E").unwrap();
        let vtg = Vtg::parse(&sentence);
        assert!(vtg.course_true.is_none());
        assert!(vtg.course_magnetic.is_none());
        assert_eq!(vtg.speed_knots, Some(0.012));
        assert_eq!(vtg.speed_kmh, Some(0.022));
    }
}

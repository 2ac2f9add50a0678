//! GNSS constellations & PRN based identification
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Constellation parsing & identification related errors
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParsingError {
    #[error("unknown constellation \"{0}\"")]
    Unknown(String),
}

/// Describes the `GNSS` constellations a receiver reports satellites for.
/// Declaration order is the catalog sorting order.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constellation {
    /// `GPS` american constellation
    #[default]
    GPS,
    /// Augmentation systems (WAAS, EGNOS, MSAS..)
    SBAS,
    /// `Glonass` russian constellation
    Glonass,
    /// `Galileo` european constellation
    Galileo,
    /// `QZSS` japanese constellation
    QZSS,
    /// `BeiDou` chinese constellation
    BeiDou,
    /// Satellite we could not attribute
    Unknown,
}

impl std::fmt::Display for Constellation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::GPS => f.write_str("GPS"),
            Self::SBAS => f.write_str("SBAS"),
            Self::Glonass => f.write_str("GLONASS"),
            Self::Galileo => f.write_str("Galileo"),
            Self::QZSS => f.write_str("QZSS"),
            Self::BeiDou => f.write_str("BeiDou"),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

impl std::str::FromStr for Constellation {
    type Err = ParsingError;
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let s = string.trim().to_lowercase();
        match s.as_str() {
            "g" | "gps" => Ok(Self::GPS),
            "s" | "sbas" => Ok(Self::SBAS),
            "r" | "glo" | "glonass" => Ok(Self::Glonass),
            "e" | "gal" | "galileo" => Ok(Self::Galileo),
            "j" | "qzs" | "qzss" => Ok(Self::QZSS),
            "c" | "bds" | "beidou" => Ok(Self::BeiDou),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ParsingError::Unknown(string.to_string())),
        }
    }
}

impl Constellation {
    /// Nominal signal bands of this system
    pub fn bands(&self) -> &'static str {
        match self {
            Self::GPS => "L1/L2/L5",
            Self::SBAS => "L1",
            Self::Glonass => "L1/L2",
            Self::Galileo => "E1/E5",
            Self::QZSS => "L1/L2",
            Self::BeiDou => "B1/B2",
            Self::Unknown => "N/A",
        }
    }
}

/// One inclusive PRN range attributed to a [Constellation]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrnRange {
    pub first: u16,
    pub last: u16,
    pub constellation: Constellation,
}

impl PrnRange {
    pub const fn new(first: u16, last: u16, constellation: Constellation) -> Self {
        Self {
            first,
            last,
            constellation,
        }
    }
    pub fn contains(&self, prn: u16) -> bool {
        self.first <= prn && prn <= self.last
    }
}

/// PRN to [Constellation] lookup, used for mixed (`GN`) talkers.
/// The default partition follows common receiver numbering and
/// is not normative: vendors differ, replace it when needed.
/// First matching range wins.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrnPartition(Vec<PrnRange>);

impl Default for PrnPartition {
    fn default() -> Self {
        Self(vec![
            PrnRange::new(1, 32, Constellation::GPS),
            PrnRange::new(33, 64, Constellation::SBAS),
            PrnRange::new(65, 96, Constellation::Glonass),
            PrnRange::new(120, 158, Constellation::Galileo),
            PrnRange::new(159, 163, Constellation::QZSS),
            PrnRange::new(201, 237, Constellation::BeiDou),
        ])
    }
}

impl PrnPartition {
    /// Builds a partition from given ranges
    pub fn new(ranges: Vec<PrnRange>) -> Self {
        Self(ranges)
    }
    /// Identifies the [Constellation] of given PRN
    pub fn resolve(&self, prn: u16) -> Constellation {
        self.0
            .iter()
            .find(|range| range.contains(prn))
            .map(|range| range.constellation)
            .unwrap_or(Constellation::Unknown)
    }
    pub fn ranges(&self) -> &[PrnRange] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    #[test]
    fn from_str() {
        for (desc, expected) in [
            ("G", Constellation::GPS),
            ("GPS", Constellation::GPS),
            ("sbas", Constellation::SBAS),
            ("GLONASS", Constellation::Glonass),
            ("Galileo", Constellation::Galileo),
            ("QZSS", Constellation::QZSS),
            ("BeiDou", Constellation::BeiDou),
        ] {
            assert_eq!(Constellation::from_str(desc), Ok(expected), "\"{}\"", desc);
            // Display is reciprocal
            assert_eq!(Constellation::from_str(&expected.to_string()), Ok(expected));
        }
        for desc in ["X", "GPX", "mixed", "blah"] {
            assert!(Constellation::from_str(desc).is_err());
        }
    }
    #[test]
    fn sorting() {
        assert!(Constellation::GPS < Constellation::SBAS);
        assert!(Constellation::SBAS < Constellation::Glonass);
        assert!(Constellation::Glonass < Constellation::Galileo);
        assert!(Constellation::Galileo < Constellation::QZSS);
        assert!(Constellation::QZSS < Constellation::BeiDou);
        assert!(Constellation::BeiDou < Constellation::Unknown);
    }
    #[test]
    fn default_partition() {
        let partition = PrnPartition::default();
        for (prn, expected) in [
            (0, Constellation::Unknown),
            (1, Constellation::GPS),
            (32, Constellation::GPS),
            (33, Constellation::SBAS),
            (64, Constellation::SBAS),
            (65, Constellation::Glonass),
            (96, Constellation::Glonass),
            (97, Constellation::Unknown),
            (119, Constellation::Unknown),
            (120, Constellation::Galileo),
            (158, Constellation::Galileo),
            (159, Constellation::QZSS),
            (163, Constellation::QZSS),
            (200, Constellation::Unknown),
            (201, Constellation::BeiDou),
            (237, Constellation::BeiDou),
            (238, Constellation::Unknown),
        ] {
            assert_eq!(partition.resolve(prn), expected, "PRN #{}", prn);
        }
    }
    #[test]
    fn custom_partition() {
        let partition = PrnPartition::new(vec![
            PrnRange::new(1, 36, Constellation::Galileo),
            PrnRange::new(1, 99, Constellation::GPS),
        ]);
        assert_eq!(partition.resolve(5), Constellation::Galileo);
        assert_eq!(partition.resolve(50), Constellation::GPS);
        assert_eq!(partition.resolve(150), Constellation::Unknown);
    }
    #[test]
    fn bands() {
        assert_eq!(Constellation::GPS.bands(), "L1/L2/L5");
        assert_eq!(Constellation::BeiDou.bands(), "B1/B2");
        assert_eq!(Constellation::Unknown.bands(), "N/A");
    }
}

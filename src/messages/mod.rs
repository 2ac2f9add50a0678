//! Typed NMEA messages and the sentence type dispatcher
use std::str::FromStr;

use hifitime::Epoch;

use crate::{
    constellation::{Constellation, PrnPartition},
    error::{Error, FieldError},
    sentence::Sentence,
    talker::{Resolution, TalkerId, TalkerTable},
};

mod gga;
mod gsa;
mod gsv;
mod gst;
mod rmc;
mod txt;
mod vtg;
mod zda;

pub use gga::{FixQuality, Gga};
pub use gsa::{FixMode, FixType, Gsa};
pub use gsv::Gsv;
pub use gst::Gst;
pub use rmc::{Rmc, Status};
pub use txt::Txt;
pub use vtg::Vtg;
pub use zda::Zda;

/// Returns field content, trimmed and stripped of a possibly fused `*CC` checksum
pub(crate) fn raw(sentence: &Sentence, index: usize) -> &str {
    let field = sentence.field(index);
    match field.find('*') {
        Some(offset) => field[..offset].trim(),
        None => field.trim(),
    }
}

/// Optional field: None when empty or not interpretable
pub(crate) fn optional<T: FromStr>(sentence: &Sentence, index: usize) -> Option<T> {
    let field = raw(sentence, index);
    if field.is_empty() {
        None
    } else {
        T::from_str(field).ok()
    }
}

pub(crate) fn optional_string(sentence: &Sentence, index: usize) -> Option<String> {
    let field = raw(sentence, index);
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

/// Mandatory structural field: the sentence is rejected if missing or invalid
pub(crate) fn mandatory<T: FromStr>(
    sentence: &Sentence,
    index: usize,
    name: &'static str,
) -> Result<T, FieldError> {
    let field = raw(sentence, index);
    if field.is_empty() {
        return Err(FieldError::Missing(name));
    }
    T::from_str(field).map_err(|_| FieldError::NotNumeric {
        name,
        value: field.to_string(),
    })
}

/// Builds a UTC [Epoch] from calendar date and `hhmmss(.sss)` time
pub(crate) fn utc_epoch(year: i32, month: u8, day: u8, time: &str) -> Option<Epoch> {
    if time.len() < 6 || !time.is_ascii() {
        return None;
    }
    let hours = time[0..2].parse::<u8>().ok()?;
    let minutes = time[2..4].parse::<u8>().ok()?;
    let seconds = time[4..6].parse::<u8>().ok()?;
    let nanos = match time[6..].strip_prefix('.') {
        Some(fract) if !fract.is_empty() && fract.len() <= 9 => {
            let scaling = 10_u32.pow(9 - fract.len() as u32);
            fract.parse::<u32>().ok()? * scaling
        },
        Some(_) => return None,
        None if time.len() == 6 => 0,
        None => return None,
    };
    Epoch::maybe_from_gregorian_utc(year, month, day, hours, minutes, seconds, nanos).ok()
}

/// [ParsedSentence] is a validated [Sentence] interpreted per its type
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedSentence {
    GGA(Gga),
    GSA(Gsa),
    GSV(Gsv),
    RMC(Rmc),
    VTG(Vtg),
    GST(Gst),
    ZDA(Zda),
    TXT(Txt),
    /// Sentence types we do not interpret
    Unknown(String),
}

impl ParsedSentence {
    /// Sentence type
    pub fn kind(&self) -> &str {
        match self {
            Self::GGA(_) => "GGA",
            Self::GSA(_) => "GSA",
            Self::GSV(_) => "GSV",
            Self::RMC(_) => "RMC",
            Self::VTG(_) => "VTG",
            Self::GST(_) => "GST",
            Self::ZDA(_) => "ZDA",
            Self::TXT(_) => "TXT",
            Self::Unknown(kind) => kind,
        }
    }
    pub fn as_gsv(&self) -> Option<&Gsv> {
        match self {
            Self::GSV(gsv) => Some(gsv),
            _ => None,
        }
    }
}

/// [Parser] dispatches validated sentences to the typed message parsers.
/// It holds the tables used to attribute satellites to a [Constellation].
/// ```
/// use nmea_gnss::prelude::{Constellation, ParsedSentence, Parser};
///
/// let parser = Parser::default();
/// let parsed = parser
///     .parse_line("$GPGSV,1,1,01,05,40,083,46*40")
///     .unwrap();
///
/// let gsv = parsed.as_gsv().unwrap();
/// assert_eq!(gsv.satellites[0].prn, 5);
/// assert_eq!(gsv.satellites[0].constellation, Constellation::GPS);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    talkers: TalkerTable,
    partition: PrnPartition,
}

impl Parser {
    /// Builds a [Parser] with custom constellation resolution tables
    pub fn new(talkers: TalkerTable, partition: PrnPartition) -> Self {
        Self { talkers, partition }
    }
    /// Attributes satellite PRN reported by talker to a [Constellation]
    pub fn resolve(&self, talker: &TalkerId, prn: u16) -> Constellation {
        match self.talkers.resolution(talker) {
            Resolution::Fixed(constellation) => constellation,
            Resolution::PerSatellite => self.partition.resolve(prn),
        }
    }
    /// Constellation of a talker that reports a single system.
    /// None for mixed talkers.
    pub fn talker_constellation(&self, talker: &TalkerId) -> Option<Constellation> {
        match self.talkers.resolution(talker) {
            Resolution::Fixed(constellation) => Some(constellation),
            Resolution::PerSatellite => None,
        }
    }
    /// Interprets a validated [Sentence]
    pub fn parse(&self, sentence: &Sentence) -> Result<ParsedSentence, Error> {
        match sentence.kind() {
            "GGA" => Ok(ParsedSentence::GGA(Gga::parse(sentence))),
            "GSA" => Ok(ParsedSentence::GSA(Gsa::parse(sentence))),
            "GSV" => Ok(ParsedSentence::GSV(Gsv::parse(sentence, self)?)),
            "RMC" => Ok(ParsedSentence::RMC(Rmc::parse(sentence))),
            "VTG" => Ok(ParsedSentence::VTG(Vtg::parse(sentence))),
            "GST" => Ok(ParsedSentence::GST(Gst::parse(sentence))),
            "ZDA" => Ok(ParsedSentence::ZDA(Zda::parse(sentence))),
            "TXT" => Ok(ParsedSentence::TXT(Txt::parse(sentence)?)),
            kind => Ok(ParsedSentence::Unknown(kind.to_string())),
        }
    }
    /// Validates then interprets one raw line
    pub fn parse_line(&self, line: &str) -> Result<ParsedSentence, Error> {
        let sentence = Sentence::from_str(line)?;
        self.parse(&sentence)
    }
}

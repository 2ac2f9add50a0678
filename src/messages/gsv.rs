//! GSV: satellites in view
use crate::{
    catalog::SatelliteRecord,
    error::{Error, FormatError},
    messages::{mandatory, optional, raw, Parser},
    sentence::Sentence,
    talker::TalkerId,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Satellite groups start after the sats-in-view field
const FIRST_GROUP: usize = 4;

/// Each satellite is described by (PRN, elevation, azimuth, SNR)
const GROUP_SIZE: usize = 4;

/// One GSV message, part of a reporting cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gsv {
    pub talker: TalkerId,
    /// Total number of messages in this cycle
    pub total: u16,
    /// Message number, starting at 1
    pub seq: u16,
    /// Number of satellites in view, for the whole cycle
    pub sats_in_view: u16,
    /// Satellites described by this message
    pub satellites: Vec<SatelliteRecord>,
}

impl Gsv {
    pub(crate) fn parse(sentence: &Sentence, parser: &Parser) -> Result<Self, Error> {
        if sentence.len() < FIRST_GROUP {
            return Err(FormatError::TooFewFields {
                kind: sentence.kind().to_string(),
                expected: FIRST_GROUP,
                found: sentence.len(),
            }
            .into());
        }

        let talker = sentence.talker();
        let total = mandatory::<u16>(sentence, 1, "total")?;
        let seq = mandatory::<u16>(sentence, 2, "seq")?;
        let sats_in_view = mandatory::<u16>(sentence, 3, "sats in view")?;

        let mut satellites = Vec::with_capacity(GROUP_SIZE);

        // trailing partial group (like NMEA 4.10 signal ID) is dropped
        let mut offset = FIRST_GROUP;
        while offset + GROUP_SIZE <= sentence.len() {
            if let Ok(prn) = raw(sentence, offset).parse::<u16>() {
                satellites.push(SatelliteRecord {
                    prn,
                    constellation: parser.resolve(&talker, prn),
                    elevation: optional::<u8>(sentence, offset + 1).filter(|e| *e <= 90),
                    azimuth: optional::<u16>(sentence, offset + 2).filter(|a| *a < 360),
                    snr: optional(sentence, offset + 3),
                });
            }
            offset += GROUP_SIZE;
        }

        Ok(Self {
            talker,
            total,
            seq,
            sats_in_view,
            satellites,
        })
    }
}

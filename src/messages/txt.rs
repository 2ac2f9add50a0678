//! TXT: receiver text messages
use crate::{
    error::Error,
    messages::{mandatory, optional},
    sentence::Sentence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Free text transmitted by the receiver (antenna status, firmware..)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Txt {
    /// Total number of messages
    pub total: u8,
    /// Message number
    pub seq: u8,
    /// 00: error, 01: warning, 02: notice, 07: user
    pub severity: Option<u8>,
    pub text: String,
}

impl Txt {
    pub(crate) fn parse(sentence: &Sentence) -> Result<Self, Error> {
        Ok(Self {
            total: mandatory(sentence, 1, "total")?,
            seq: mandatory(sentence, 2, "seq")?,
            severity: optional(sentence, 3),
            // text may contain ','
            text: sentence
                .fields()
                .get(4..)
                .map(|fields| fields.join(","))
                .unwrap_or_default(),
        })
    }
}

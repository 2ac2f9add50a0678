#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod aggregator;
pub mod catalog;
pub mod config;
pub mod constellation;
pub mod coordinates;
pub mod error;
pub mod messages;
pub mod monitor;
pub mod reader;
pub mod sentence;
pub mod snapshot;
pub mod talker;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::{
        aggregator::{Aggregator, CompletedCycle},
        catalog::{Catalog, SatelliteKey, SatelliteRecord},
        config::MonitorConfig,
        constellation::{Constellation, PrnPartition, PrnRange},
        coordinates::dms_to_decimal,
        error::{Error, FieldError, FormatError, Rejection},
        messages::{ParsedSentence, Parser},
        monitor::{Monitor, Shared, Statistics},
        reader::{LineEvent, LineSource, StreamSource},
        sentence::{checksum, Sentence},
        snapshot::FixSnapshot,
        talker::{Resolution, TalkerId, TalkerTable},
    };

    // pub re-export
    pub use hifitime::Epoch;
}

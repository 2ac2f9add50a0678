//! Monitor configuration
use std::time::Duration;

use crate::{
    constellation::PrnPartition, messages::Parser, snapshot::DEFAULT_TXT_HISTORY,
    talker::TalkerTable,
};

#[cfg(feature = "serde")]
use serde::Deserialize;

fn default_receiver_messages() -> usize {
    DEFAULT_TXT_HISTORY
}

fn default_read_timeout_ms() -> u64 {
    1000
}

/// [Monitor](crate::monitor::Monitor) configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct MonitorConfig {
    /// Talker to constellation table
    #[cfg_attr(feature = "serde", serde(default))]
    pub talkers: TalkerTable,
    /// PRN ranges used to identify satellites of mixed talkers.
    /// Vendors number satellites differently: adapt to your receiver.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prn_partition: PrnPartition,
    /// Number of receiver text messages (TXT) kept
    #[cfg_attr(feature = "serde", serde(default = "default_receiver_messages"))]
    pub receiver_messages: usize,
    /// Satellites that were not republished within this many seconds
    /// are dropped from the catalog. Satellites are kept forever when omitted.
    #[cfg_attr(feature = "serde", serde(default))]
    pub satellite_timeout_s: Option<f64>,
    /// Line source read timeout (ms)
    #[cfg_attr(feature = "serde", serde(default = "default_read_timeout_ms"))]
    pub read_timeout_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            talkers: TalkerTable::default(),
            prn_partition: PrnPartition::default(),
            receiver_messages: default_receiver_messages(),
            satellite_timeout_s: None,
            read_timeout_ms: default_read_timeout_ms(),
        }
    }
}

impl MonitorConfig {
    /// Builds the sentence [Parser] described by this configuration
    pub fn parser(&self) -> Parser {
        Parser::new(self.talkers.clone(), self.prn_partition.clone())
    }
    /// Satellite staleness limit, if any.
    /// Negative or invalid values disable the expiry.
    pub fn satellite_timeout(&self) -> Option<Duration> {
        self.satellite_timeout_s
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

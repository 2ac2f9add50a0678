//! GST: pseudorange error statistics
use crate::{
    messages::{optional, optional_string},
    sentence::Sentence,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position error statistics. Deviations are expressed in meters.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gst {
    /// UTC time, hhmmss(.ss)
    pub time: Option<String>,
    /// RMS value of the range inputs standard deviation
    pub rms: Option<f64>,
    /// Error ellipse semi-major axis
    pub std_dev_major: Option<f64>,
    /// Error ellipse semi-minor axis
    pub std_dev_minor: Option<f64>,
    /// Error ellipse orientation (degrees from true north)
    pub orientation: Option<f64>,
    pub std_dev_lat: Option<f64>,
    pub std_dev_lon: Option<f64>,
    pub std_dev_alt: Option<f64>,
}

impl Gst {
    pub(crate) fn parse(sentence: &Sentence) -> Self {
        Self {
            time: optional_string(sentence, 1),
            rms: optional(sentence, 2),
            std_dev_major: optional(sentence, 3),
            std_dev_minor: optional(sentence, 4),
            orientation: optional(sentence, 5),
            std_dev_lat: optional(sentence, 6),
            std_dev_lon: optional(sentence, 7),
            std_dev_alt: optional(sentence, 8),
        }
    }
}

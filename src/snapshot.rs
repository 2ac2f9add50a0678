//! Latest fix and quality values
use std::collections::VecDeque;

use hifitime::Epoch;
use log::trace;

use crate::messages::{
    FixMode, FixQuality, FixType, Gga, Gsa, Gst, ParsedSentence, Rmc, Status, Txt, Vtg, Zda,
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Number of receiver text messages kept by default
pub const DEFAULT_TXT_HISTORY: usize = 20;

/// [FixSnapshot] gathers the scalar values of the latest GGA, GSA, RMC, VTG,
/// GST and ZDA sentences. Each sentence overwrites the fields it carries,
/// regardless of what other sentence types previously reported: there is no
/// cross validation. Receiver text messages (TXT) are kept in a bounded history.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FixSnapshot {
    /// UTC time, hhmmss(.ss)
    pub time: Option<String>,
    /// UTC date, ddmmyy
    pub date: Option<String>,
    /// Latest complete date and time (RMC, ZDA)
    pub epoch: Option<Epoch>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Altitude above mean sea level (m)
    pub altitude: Option<f64>,
    pub quality: Option<FixQuality>,
    /// Number of satellites used (GGA)
    pub satellites_used: Option<u8>,
    pub fix_mode: Option<FixMode>,
    pub fix_type: Option<FixType>,
    /// Satellites used in the solution (GSA)
    pub used: Vec<u16>,
    pub pdop: Option<f64>,
    pub hdop: Option<f64>,
    pub vdop: Option<f64>,
    pub status: Option<Status>,
    pub speed_knots: Option<f64>,
    pub speed_kmh: Option<f64>,
    /// Course over ground (degrees, true)
    pub course: Option<f64>,
    /// Course over ground (degrees, magnetic)
    pub course_magnetic: Option<f64>,
    pub magnetic_variation: Option<f64>,
    pub rms: Option<f64>,
    pub std_dev_major: Option<f64>,
    pub std_dev_minor: Option<f64>,
    pub orientation: Option<f64>,
    pub std_dev_lat: Option<f64>,
    pub std_dev_lon: Option<f64>,
    pub std_dev_alt: Option<f64>,
    pub zone_hours: Option<i8>,
    pub zone_minutes: Option<u8>,
    /// Receiver text messages, oldest first
    pub messages: VecDeque<Txt>,
    #[cfg_attr(feature = "serde", serde(skip))]
    history: usize,
}

impl Default for FixSnapshot {
    fn default() -> Self {
        Self::new(DEFAULT_TXT_HISTORY)
    }
}

impl FixSnapshot {
    /// Builds an empty [FixSnapshot] that keeps up to `history` text messages
    pub fn new(history: usize) -> Self {
        Self {
            time: None,
            date: None,
            epoch: None,
            latitude: None,
            longitude: None,
            altitude: None,
            quality: None,
            satellites_used: None,
            fix_mode: None,
            fix_type: None,
            used: Vec::new(),
            pdop: None,
            hdop: None,
            vdop: None,
            status: None,
            speed_knots: None,
            speed_kmh: None,
            course: None,
            course_magnetic: None,
            magnetic_variation: None,
            rms: None,
            std_dev_major: None,
            std_dev_minor: None,
            orientation: None,
            std_dev_lat: None,
            std_dev_lon: None,
            std_dev_alt: None,
            zone_hours: None,
            zone_minutes: None,
            messages: VecDeque::with_capacity(history),
            history,
        }
    }

    /// Applies one parsed sentence. Returns true if this snapshot was updated:
    /// GSV and unknown sentences are not applicable.
    pub fn apply(&mut self, parsed: &ParsedSentence) -> bool {
        match parsed {
            ParsedSentence::GGA(gga) => self.apply_gga(gga),
            ParsedSentence::GSA(gsa) => self.apply_gsa(gsa),
            ParsedSentence::RMC(rmc) => self.apply_rmc(rmc),
            ParsedSentence::VTG(vtg) => self.apply_vtg(vtg),
            ParsedSentence::GST(gst) => self.apply_gst(gst),
            ParsedSentence::ZDA(zda) => self.apply_zda(zda),
            ParsedSentence::TXT(txt) => self.push_message(txt),
            ParsedSentence::GSV(_) | ParsedSentence::Unknown(_) => return false,
        }
        trace!("snapshot updated by {}", parsed.kind());
        true
    }

    fn apply_gga(&mut self, gga: &Gga) {
        self.time = gga.time.clone();
        self.latitude = gga.latitude;
        self.longitude = gga.longitude;
        self.quality = gga.quality;
        self.satellites_used = gga.satellites;
        self.hdop = gga.hdop;
        self.altitude = gga.altitude;
    }

    fn apply_gsa(&mut self, gsa: &Gsa) {
        self.fix_mode = gsa.mode;
        self.fix_type = gsa.fix_type;
        self.used = gsa.used.clone();
        self.pdop = gsa.pdop;
        self.hdop = gsa.hdop;
        self.vdop = gsa.vdop;
    }

    fn apply_rmc(&mut self, rmc: &Rmc) {
        self.time = rmc.time.clone();
        self.status = rmc.status;
        self.latitude = rmc.latitude;
        self.longitude = rmc.longitude;
        self.speed_knots = rmc.speed_knots;
        self.course = rmc.course;
        self.date = rmc.date.clone();
        self.magnetic_variation = rmc.magnetic_variation;
        if let Some(epoch) = rmc.epoch() {
            self.epoch = Some(epoch);
        }
    }

    fn apply_vtg(&mut self, vtg: &Vtg) {
        self.course = vtg.course_true;
        self.course_magnetic = vtg.course_magnetic;
        self.speed_knots = vtg.speed_knots;
        self.speed_kmh = vtg.speed_kmh;
    }

    fn apply_gst(&mut self, gst: &Gst) {
        self.rms = gst.rms;
        self.std_dev_major = gst.std_dev_major;
        self.std_dev_minor = gst.std_dev_minor;
        self.orientation = gst.orientation;
        self.std_dev_lat = gst.std_dev_lat;
        self.std_dev_lon = gst.std_dev_lon;
        self.std_dev_alt = gst.std_dev_alt;
    }

    fn apply_zda(&mut self, zda: &Zda) {
        self.time = zda.time.clone();
        self.zone_hours = zda.zone_hours;
        self.zone_minutes = zda.zone_minutes;
        if let Some(epoch) = zda.epoch() {
            self.epoch = Some(epoch);
        }
    }

    fn push_message(&mut self, txt: &Txt) {
        if self.history == 0 {
            return;
        }
        while self.messages.len() >= self.history {
            self.messages.pop_front();
        }
        self.messages.push_back(txt.clone());
    }

    /// Maximal number of text messages kept
    pub fn history(&self) -> usize {
        self.history
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::messages::Parser;

    fn apply(snapshot: &mut FixSnapshot, line: &str) -> bool {
        let parsed = Parser::default().parse_line(line).unwrap();
        snapshot.apply(&parsed)
    }

    #[test]
    fn field_by_field() {
        let mut snapshot = FixSnapshot::default();
        assert!(apply(
            &mut snapshot,
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47"
        ));
        assert_eq!(snapshot.time.as_deref(), Some("123519"));
        assert_eq!(snapshot.quality, Some(FixQuality::GNSS));
        assert_eq!(snapshot.satellites_used, Some(8));
        assert_eq!(snapshot.hdop, Some(0.9));
        assert_eq!(snapshot.altitude, Some(545.4));

        assert!(apply(
            &mut snapshot,
            "$GPGSA,A,3,04,05,,09,12,,,24,,,,,2.5,1.3,2.1*39"
        ));
        // GSA overwrites HDOP, leaves GGA only fields
        assert_eq!(snapshot.hdop, Some(1.3));
        assert_eq!(snapshot.pdop, Some(2.5));
        assert_eq!(snapshot.vdop, Some(2.1));
        assert_eq!(snapshot.used, vec![4, 5, 9, 12, 24]);
        assert_eq!(snapshot.fix_type, Some(FixType::Fix3D));
        assert_eq!(snapshot.altitude, Some(545.4));
        assert_eq!(snapshot.satellites_used, Some(8));

        assert!(apply(
            &mut snapshot,
            "$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48"
        ));
        assert_eq!(snapshot.course, Some(54.7));
        assert_eq!(snapshot.course_magnetic, Some(34.4));
        assert_eq!(snapshot.speed_knots, Some(5.5));
        assert_eq!(snapshot.speed_kmh, Some(10.2));
    }

    #[test]
    fn epochs() {
        let mut snapshot = FixSnapshot::default();
        assert!(apply(
            &mut snapshot,
            "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A"
        ));
        assert_eq!(snapshot.status, Some(Status::Valid));
        assert_eq!(snapshot.date.as_deref(), Some("230394"));
        assert_eq!(
            snapshot.epoch,
            Some(Epoch::from_gregorian_utc(1994, 3, 23, 12, 35, 19, 0))
        );
        assert!(apply(&mut snapshot, "$GPZDA,201530.00,04,07,2002,00,00*60"));
        assert_eq!(snapshot.time.as_deref(), Some("201530.00"));
        assert_eq!(snapshot.zone_hours, Some(0));
        assert_eq!(
            snapshot.epoch,
            Some(Epoch::from_gregorian_utc(2002, 7, 4, 20, 15, 30, 0))
        );
    }

    #[test]
    fn not_applicable() {
        let mut snapshot = FixSnapshot::default();
        assert!(!apply(&mut snapshot, "$GPGSV,1,1,01,05,40,083,46*40"));
        assert!(!apply(
            &mut snapshot,
            "$GPGLL,4916.45,N,12311.12,W,225444,A*31"
        ));
        assert_eq!(snapshot, FixSnapshot::default());
    }

    #[test]
    fn bounded_messages() {
        let mut snapshot = FixSnapshot::new(2);
        for text in ["first", "second", "third"] {
            snapshot.apply(&ParsedSentence::TXT(Txt {
                total: 1,
                seq: 1,
                severity: Some(2),
                text: text.to_string(),
            }));
        }
        let texts = snapshot
            .messages
            .iter()
            .map(|txt| txt.text.as_str())
            .collect::<Vec<_>>();
        assert_eq!(texts, vec!["second", "third"]);

        let mut snapshot = FixSnapshot::new(0);
        assert!(apply(&mut snapshot, "$GPTXT,01,01,02,ANTSTATUS=OK*3B"));
        assert!(snapshot.messages.is_empty());
        assert_eq!(FixSnapshot::default().history(), DEFAULT_TXT_HISTORY);
    }
}

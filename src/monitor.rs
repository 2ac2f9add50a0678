//! Sentence processing pipeline and shared state
use std::{
    collections::BTreeMap,
    str::FromStr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
    },
    time::{Duration, Instant},
};

use log::{debug, error, info, trace};

use crate::{
    aggregator::Aggregator,
    catalog::{Catalog, SatelliteRecord},
    config::MonitorConfig,
    error::{Error, Rejection},
    messages::{ParsedSentence, Parser},
    reader::{LineEvent, LineSource},
    sentence::Sentence,
    snapshot::FixSnapshot,
};

#[cfg(feature = "serde")]
use serde::Serialize;

/// [Shared] is a read handle on state owned by the [Monitor].
/// Readers never observe a partial update: each update happens
/// within a single write lock. A poisoned lock is recovered.
#[derive(Debug, Default)]
pub struct Shared<T>(Arc<RwLock<T>>);

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Shared<T> {
    /// Copy of the current state
    pub fn current(&self) -> T {
        self.read().clone()
    }
}

impl Shared<Catalog> {
    /// Satellites of the catalog, sorted by constellation then PRN
    pub fn query(&self) -> Vec<SatelliteRecord> {
        self.read().query()
    }
}

/// Pipeline [Statistics]
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Statistics {
    /// Accepted sentences, per sentence type
    pub accepted: BTreeMap<String, u64>,
    /// Rejected sentences, per [Rejection] kind
    pub rejected: BTreeMap<Rejection, u64>,
    /// Reason of the latest rejection
    pub last_rejection: Option<String>,
    /// Number of GSV cycles published
    pub cycles: u64,
    /// Number of read timeouts
    pub timeouts: u64,
}

impl Statistics {
    pub fn total_accepted(&self) -> u64 {
        self.accepted.values().sum()
    }
    pub fn total_rejected(&self) -> u64 {
        self.rejected.values().sum()
    }
    fn accept(&mut self, kind: &str) {
        *self.accepted.entry(kind.to_string()).or_default() += 1;
    }
    fn reject(&mut self, error: &Error) {
        *self.rejected.entry(error.kind()).or_default() += 1;
        self.last_rejection = Some(error.to_string());
    }
}

/// [Monitor] runs the pipeline: one line is validated, parsed, then either
/// applied to the [FixSnapshot] or fed to the GSV [Aggregator], which
/// publishes complete cycles into the [Catalog].
/// ```
/// use nmea_gnss::prelude::Monitor;
///
/// let mut monitor = Monitor::default();
/// let catalog = monitor.catalog();
///
/// monitor
///     .process_line("$GPGSV,1,1,01,05,40,083,46*40")
///     .unwrap();
///
/// assert_eq!(catalog.query().len(), 1);
/// assert!(monitor.process_line("$GPGSV,1,1,01,05,40,083,46*41").is_err());
/// assert_eq!(monitor.statistics().current().total_rejected(), 1);
/// ```
#[derive(Debug)]
pub struct Monitor {
    parser: Parser,
    aggregator: Aggregator,
    catalog: Shared<Catalog>,
    snapshot: Shared<FixSnapshot>,
    statistics: Shared<Statistics>,
    satellite_timeout: Option<Duration>,
    read_timeout: Duration,
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new(&MonitorConfig::default())
    }
}

impl Monitor {
    pub fn new(cfg: &MonitorConfig) -> Self {
        Self {
            parser: cfg.parser(),
            aggregator: Aggregator::default(),
            catalog: Shared::default(),
            snapshot: Shared::new(FixSnapshot::new(cfg.receiver_messages)),
            statistics: Shared::default(),
            satellite_timeout: cfg.satellite_timeout(),
            read_timeout: cfg.read_timeout(),
        }
    }

    /// Handle on the satellite [Catalog]
    pub fn catalog(&self) -> Shared<Catalog> {
        self.catalog.clone()
    }

    /// Handle on the [FixSnapshot]
    pub fn snapshot(&self) -> Shared<FixSnapshot> {
        self.snapshot.clone()
    }

    /// Handle on the pipeline [Statistics]
    pub fn statistics(&self) -> Shared<Statistics> {
        self.statistics.clone()
    }

    /// Processes one raw line. A rejection is counted and returned: it never
    /// affects the following lines.
    pub fn process_line(&mut self, line: &str) -> Result<(), Error> {
        match self.process(line) {
            Ok(kind) => {
                self.statistics.write().accept(&kind);
                Ok(())
            },
            Err(e) => {
                debug!("rejected \"{}\": {}", line.trim_end(), e);
                self.statistics.write().reject(&e);
                Err(e)
            },
        }
    }

    fn process(&mut self, line: &str) -> Result<String, Error> {
        let sentence = Sentence::from_str(line)?;
        let parsed = self.parser.parse(&sentence)?;

        match &parsed {
            ParsedSentence::GSV(gsv) => {
                if let Some(cycle) = self.aggregator.feed(gsv, &self.parser)? {
                    debug!(
                        "{}: publishing {} satellites",
                        cycle.talker,
                        cycle.satellites.len()
                    );
                    cycle.publish(&mut self.catalog.write());
                    self.statistics.write().cycles += 1;
                }
            },
            ParsedSentence::Unknown(kind) => {
                trace!("ignored {} sentence", kind);
            },
            parsed => {
                self.snapshot.write().apply(parsed);
            },
        }

        Ok(parsed.kind().to_string())
    }

    /// Applies the satellite staleness policy, when configured.
    /// Returns the number of satellites dropped.
    pub fn expire(&self, now: Instant) -> usize {
        match self.satellite_timeout {
            Some(max_age) => self.catalog.write().expire(now, max_age),
            None => 0,
        }
    }

    /// Consumes the [LineSource] until it is closed or `stop` is raised.
    /// In progress GSV cycles are discarded on exit.
    /// Only I/O errors (other than timeouts) interrupt the pipeline.
    pub fn run<S: LineSource + ?Sized>(
        &mut self,
        source: &mut S,
        stop: &AtomicBool,
    ) -> std::io::Result<()> {
        info!("monitor started");

        let ret = loop {
            if stop.load(Ordering::Relaxed) {
                info!("stop requested");
                break Ok(());
            }
            match source.next_line(self.read_timeout) {
                Ok(LineEvent::Line(line)) => {
                    // rejections are accounted for
                    let _ = self.process_line(&line);
                },
                Ok(LineEvent::Timeout) => {
                    self.statistics.write().timeouts += 1;
                },
                Ok(LineEvent::Closed) => {
                    info!("source closed");
                    break Ok(());
                },
                Err(e) => {
                    error!("read error: {}", e);
                    let mut statistics = self.statistics.write();
                    *statistics.rejected.entry(Rejection::Io).or_default() += 1;
                    statistics.last_rejection = Some(e.to_string());
                    break Err(e);
                },
            }
            let expired = self.expire(Instant::now());
            if expired > 0 {
                debug!("{} satellites expired", expired);
            }
        };

        for talker in self.aggregator.pending() {
            debug!("{}: discarding incomplete cycle", talker);
        }
        self.aggregator.reset();
        ret
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        constellation::Constellation,
        error::FormatError,
        reader::StreamSource,
    };
    use std::io::Cursor;

    #[test]
    fn statistics() {
        let mut monitor = Monitor::default();
        let statistics = monitor.statistics();

        monitor
            .process_line("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47")
            .unwrap();
        monitor
            .process_line("$GPGLL,4916.45,N,12311.12,W,225444,A*31")
            .unwrap();
        assert!(monitor
            .process_line("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*48")
            .is_err());
        assert!(monitor.process_line("garbage").is_err());
        assert!(monitor.process_line("$GPGSV,a,1,01*28").is_err());

        let stats = statistics.current();
        assert_eq!(stats.accepted.get("GGA"), Some(&1));
        assert_eq!(stats.accepted.get("GLL"), Some(&1));
        assert_eq!(stats.total_accepted(), 2);
        assert_eq!(stats.rejected.get(&Rejection::Checksum), Some(&1));
        assert_eq!(stats.rejected.get(&Rejection::Format), Some(&1));
        assert_eq!(stats.rejected.get(&Rejection::Field), Some(&1));
        assert_eq!(stats.total_rejected(), 3);
        assert!(stats.last_rejection.unwrap().contains("total"));

        let snapshot = monitor.snapshot().current();
        assert_eq!(snapshot.altitude, Some(545.4));
    }

    #[test]
    fn invalid_sequence_is_rejected() {
        let mut monitor = Monitor::default();
        match monitor.process_line("$GPGSV,2,3,05,01,40,083,46*41") {
            Err(Error::Format(FormatError::InvalidSequence { seq: 3, total: 2 })) => {},
            other => panic!("unexpected result {:?}", other),
        }
        assert!(monitor.catalog().query().is_empty());
    }

    #[test]
    fn publication() {
        let mut monitor = Monitor::default();
        let catalog = monitor.catalog();
        monitor
            .process_line("$GPGSV,2,1,05,01,40,083,46,02,17,308,41,03,07,344,39,04,22,228,45*79")
            .unwrap();
        // incomplete cycle is not visible
        assert!(catalog.query().is_empty());
        monitor
            .process_line("$GPGSV,2,2,05,05,10,010,33*49")
            .unwrap();
        let satellites = catalog.query();
        assert_eq!(satellites.len(), 5);
        assert!(satellites
            .iter()
            .all(|sat| sat.constellation == Constellation::GPS));
        assert_eq!(
            catalog.read().sats_in_view(&crate::talker::TalkerId::GP),
            Some(5)
        );
        assert_eq!(monitor.statistics().current().cycles, 1);
    }

    #[test]
    fn expiry() {
        let cfg = MonitorConfig {
            satellite_timeout_s: Some(30.0),
            ..Default::default()
        };
        let mut monitor = Monitor::new(&cfg);
        monitor
            .process_line("$GPGSV,1,1,01,05,40,083,46*40")
            .unwrap();
        assert_eq!(monitor.expire(Instant::now()), 0);
        assert_eq!(monitor.expire(Instant::now() + Duration::from_secs(60)), 1);
        assert!(monitor.catalog().query().is_empty());

        // no policy
        let mut monitor = Monitor::default();
        monitor
            .process_line("$GPGSV,1,1,01,05,40,083,46*40")
            .unwrap();
        assert_eq!(monitor.expire(Instant::now() + Duration::from_secs(3600)), 0);
    }

    #[test]
    fn run_until_closed() {
        let content = "$GPGSV,2,1,05,01,40,083,46,02,17,308,41,03,07,344,39,04,22,228,45*79\n\
            $GPTXT,01,01,02,ANTSTATUS=OK*3B\n\
            $GPGSV,2,2,05,05,10,010,33*49\n\
            $GLGSV,2,1,05,65,40,083,46*5D\n";
        let mut source = StreamSource::new(Cursor::new(content));
        let stop = AtomicBool::new(false);
        let mut monitor = Monitor::default();
        monitor.run(&mut source, &stop).unwrap();

        assert_eq!(monitor.catalog().query().len(), 5);
        assert_eq!(monitor.snapshot().current().messages.len(), 1);
        // incomplete GLONASS cycle was discarded
        assert_eq!(monitor.aggregator.pending().count(), 0);
    }

    #[test]
    fn stop_signal() {
        let mut source = StreamSource::new(Cursor::new("$GPGSV,1,1,01,05,40,083,46*40\n"));
        let stop = AtomicBool::new(true);
        let mut monitor = Monitor::default();
        monitor.run(&mut source, &stop).unwrap();
        assert_eq!(monitor.statistics().current().total_accepted(), 0);
    }

    #[test]
    fn poisoned_lock() {
        let shared = Shared::new(Statistics::default());
        let handle = shared.clone();
        let _ = std::thread::spawn(move || {
            let _guard = handle.write();
            panic!("poisoning");
        })
        .join();
        shared.write().cycles = 3;
        assert_eq!(shared.current().cycles, 3);
    }
}

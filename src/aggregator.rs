//! GSV cycles reassembly
use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use crate::{
    catalog::{Catalog, SatelliteKey, SatelliteRecord},
    constellation::Constellation,
    error::FormatError,
    messages::{Gsv, Parser},
    talker::TalkerId,
};

/// Cycle being collected for one talker
#[derive(Debug, Clone, Default)]
struct Cycle {
    total: u16,
    sats_in_view: u16,
    /// Satellites per message number
    received: BTreeMap<u16, Vec<SatelliteRecord>>,
    /// Previous cycle was completed by a late message #1
    late_first: bool,
}

/// [CompletedCycle] is a fully reassembled GSV cycle, ready to be published.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedCycle {
    pub talker: TalkerId,
    /// Constellations this cycle is authoritative for
    pub constellations: BTreeSet<Constellation>,
    /// Merged satellites, sorted by (constellation, prn)
    pub satellites: Vec<SatelliteRecord>,
    /// Satellites in view, as announced by the talker
    pub sats_in_view: u16,
}

impl CompletedCycle {
    /// Publishes this cycle into the [Catalog]
    pub fn publish(self, catalog: &mut Catalog) {
        catalog.publish(
            self.talker,
            &self.constellations,
            self.satellites,
            self.sats_in_view,
        );
    }
}

/// [Aggregator] reassembles multi message GSV cycles, independently per talker.
/// A talker is either Idle (no pending cycle) or Collecting.
/// ```
/// use nmea_gnss::prelude::{Aggregator, Catalog, Parser};
///
/// let parser = Parser::default();
/// let mut aggregator = Aggregator::default();
/// let mut catalog = Catalog::default();
///
/// for line in [
///     "$GPGSV,2,1,05,01,40,083,46,02,17,308,41,03,07,344,39,04,22,228,45*79",
///     "$GPGSV,2,2,05,05,10,010,33*49",
/// ] {
///     let parsed = parser.parse_line(line).unwrap();
///     let gsv = parsed.as_gsv().unwrap();
///     if let Some(cycle) = aggregator.feed(gsv, &parser).unwrap() {
///         cycle.publish(&mut catalog);
///     }
/// }
///
/// assert_eq!(catalog.len(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    cycles: BTreeMap<TalkerId, Cycle>,
}

impl Aggregator {
    /// Feeds one GSV message. Returns the [CompletedCycle] when this message
    /// completes its cycle. Out of range message numbers are rejected,
    /// leaving the state untouched.
    pub fn feed(
        &mut self,
        gsv: &Gsv,
        parser: &Parser,
    ) -> Result<Option<CompletedCycle>, FormatError> {
        let talker = gsv.talker;

        if gsv.total == 0 {
            // empty cycle: nothing in view
            self.cycles.remove(&talker);
            return Ok(Some(Self::merge(talker, BTreeMap::new(), 0, parser)));
        }

        if gsv.seq < 1 || gsv.seq > gsv.total {
            return Err(FormatError::InvalidSequence {
                seq: gsv.seq,
                total: gsv.total,
            });
        }

        let cycle = self.cycles.entry(talker).or_default();

        // message #1 received after later messages of the same cycle
        let late_first = gsv.seq == 1
            && cycle.total == gsv.total
            && !cycle.received.is_empty()
            && !cycle.received.contains_key(&1);

        let completes = late_first && cycle.received.len() + 1 == usize::from(gsv.total);

        // A different message #1 means a new cycle has started: whatever is
        // pending belongs to a previous, incomplete cycle. An identical #1 is a
        // retransmission. A first message arriving late (out of order) does
        // not discard the messages received before it, unless the previous
        // cycle was completed that way too: pending messages are then the
        // leftovers of a cycle whose #1 was lost.
        let new_cycle = gsv.seq == 1
            && match cycle.received.get(&1) {
                Some(satellites) => *satellites != gsv.satellites,
                None => completes && cycle.late_first,
            };

        if new_cycle || cycle.total != gsv.total {
            if !cycle.received.is_empty() {
                debug!(
                    "{}: dropping incomplete cycle ({}/{} messages)",
                    talker,
                    cycle.received.len(),
                    cycle.total
                );
            }
            cycle.total = gsv.total;
            cycle.received.clear();
        }

        cycle.sats_in_view = gsv.sats_in_view;
        cycle.received.insert(gsv.seq, gsv.satellites.clone());

        trace!(
            "{}: gsv {}/{} ({} received)",
            talker,
            gsv.seq,
            gsv.total,
            cycle.received.len()
        );

        if cycle.received.len() < usize::from(cycle.total) {
            return Ok(None);
        }

        cycle.late_first = completes && !new_cycle;
        let received = std::mem::take(&mut cycle.received);
        Ok(Some(Self::merge(
            talker,
            received,
            cycle.sats_in_view,
            parser,
        )))
    }

    fn merge(
        talker: TalkerId,
        received: BTreeMap<u16, Vec<SatelliteRecord>>,
        sats_in_view: u16,
        parser: &Parser,
    ) -> CompletedCycle {
        let mut merged = BTreeMap::<SatelliteKey, SatelliteRecord>::new();

        // ascending message number: later message wins
        for satellites in received.into_values() {
            for satellite in satellites {
                merged.insert(satellite.key(), satellite);
            }
        }

        let constellations = match parser.talker_constellation(&talker) {
            Some(constellation) => BTreeSet::from([constellation]),
            None => merged.keys().map(|key| key.constellation).collect(),
        };

        if merged.len() != usize::from(sats_in_view) {
            debug!(
                "{}: {} satellites described, {} announced",
                talker,
                merged.len(),
                sats_in_view
            );
        }

        CompletedCycle {
            talker,
            constellations,
            satellites: merged.into_values().collect(),
            sats_in_view,
        }
    }

    /// Talkers with a pending (incomplete) cycle
    pub fn pending(&self) -> impl Iterator<Item = &TalkerId> + '_ {
        self.cycles
            .iter()
            .filter(|(_, cycle)| !cycle.received.is_empty())
            .map(|(talker, _)| talker)
    }

    /// Discards all pending cycles
    pub fn reset(&mut self) {
        self.cycles.clear();
    }
}

//! Satellites in view catalog
use std::{
    collections::{BTreeMap, BTreeSet},
    time::{Duration, Instant},
};

use log::debug;

use crate::{constellation::Constellation, talker::TalkerId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Satellite identity: PRN numbers are only unique within a constellation
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteKey {
    pub constellation: Constellation,
    pub prn: u16,
}

impl std::fmt::Display for SatelliteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}#{}", self.constellation, self.prn)
    }
}

/// Latest known state of one satellite
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteRecord {
    pub prn: u16,
    pub constellation: Constellation,
    /// Elevation (0..=90 degrees)
    pub elevation: Option<u8>,
    /// Azimuth (0..=359 degrees, true north)
    pub azimuth: Option<u16>,
    /// Carrier to noise density (dB.Hz)
    pub snr: Option<u8>,
}

impl SatelliteRecord {
    pub fn key(&self) -> SatelliteKey {
        SatelliteKey {
            constellation: self.constellation,
            prn: self.prn,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    record: SatelliteRecord,
    /// Talker that published this entry
    talker: TalkerId,
    published: Instant,
}

/// [Catalog] stores the satellites of the latest complete GSV cycles.
/// It is only modified by [Catalog::publish] (wholesale, per talker)
/// and the optional [Catalog::expire] staleness policy.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<SatelliteKey, Entry>,
    in_view: BTreeMap<TalkerId, u16>,
}

impl Catalog {
    /// Publishes one complete cycle. Entries previously published by this
    /// talker, for any of the given constellations, are replaced by the new set.
    /// Other talkers' entries are left untouched.
    pub fn publish(
        &mut self,
        talker: TalkerId,
        constellations: &BTreeSet<Constellation>,
        satellites: impl IntoIterator<Item = SatelliteRecord>,
        sats_in_view: u16,
    ) {
        self.publish_at(
            talker,
            constellations,
            satellites,
            sats_in_view,
            Instant::now(),
        )
    }

    /// [Catalog::publish] with explicit publication instant
    pub fn publish_at(
        &mut self,
        talker: TalkerId,
        constellations: &BTreeSet<Constellation>,
        satellites: impl IntoIterator<Item = SatelliteRecord>,
        sats_in_view: u16,
        published: Instant,
    ) {
        self.entries.retain(|key, entry| {
            entry.talker != talker || !constellations.contains(&key.constellation)
        });

        for record in satellites {
            self.entries.insert(
                record.key(),
                Entry {
                    record,
                    talker,
                    published,
                },
            );
        }

        self.in_view.insert(talker, sats_in_view);
    }

    /// Returns all satellites, sorted by constellation then PRN
    pub fn query(&self) -> Vec<SatelliteRecord> {
        self.entries
            .values()
            .map(|entry| entry.record.clone())
            .collect()
    }

    /// Returns satellites of given [Constellation], sorted by PRN
    pub fn query_constellation(&self, constellation: Constellation) -> Vec<SatelliteRecord> {
        self.entries
            .iter()
            .filter_map(|(key, entry)| {
                if key.constellation == constellation {
                    Some(entry.record.clone())
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn get(&self, key: &SatelliteKey) -> Option<&SatelliteRecord> {
        self.entries.get(key).map(|entry| &entry.record)
    }

    /// Satellites in view, as last announced by this talker
    pub fn sats_in_view(&self, talker: &TalkerId) -> Option<u16> {
        self.in_view.get(talker).copied()
    }

    /// Talkers that published at least one cycle
    pub fn talkers(&self) -> impl Iterator<Item = &TalkerId> + '_ {
        self.in_view.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops entries that were not republished within `max_age`.
    /// Returns the number of dropped entries.
    pub fn expire(&mut self, now: Instant, max_age: Duration) -> usize {
        let size = self.entries.len();
        self.entries.retain(|key, entry| {
            let stale = now.saturating_duration_since(entry.published) > max_age;
            if stale {
                debug!("{} ({}) expired", key, entry.talker);
            }
            !stale
        });
        size - self.entries.len()
    }
}

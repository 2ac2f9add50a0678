//! Plain text rendering
use std::{collections::BTreeMap, fmt::Write};

use nmea_gnss::prelude::{Constellation, FixSnapshot, SatelliteRecord, Statistics};

fn value<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}

fn decimal(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(value) => format!("{:.*}", precision, value),
        None => "-".to_string(),
    }
}

/// Renders one frame
pub fn frame(
    satellites: &[SatelliteRecord],
    snapshot: &FixSnapshot,
    statistics: &Statistics,
) -> Result<String, std::fmt::Error> {
    let mut s = String::with_capacity(4096);

    writeln!(
        s,
        "UTC {} {} | epoch: {}",
        value(snapshot.date.as_ref()),
        value(snapshot.time.as_ref()),
        value(snapshot.epoch),
    )?;
    writeln!(
        s,
        "position: {} {} alt {} m | quality: {} | used: {}",
        decimal(snapshot.latitude, 6),
        decimal(snapshot.longitude, 6),
        decimal(snapshot.altitude, 1),
        value(snapshot.quality),
        value(snapshot.satellites_used),
    )?;
    writeln!(
        s,
        "fix: {} | PDOP {} HDOP {} VDOP {}",
        value(snapshot.fix_type),
        decimal(snapshot.pdop, 2),
        decimal(snapshot.hdop, 2),
        decimal(snapshot.vdop, 2),
    )?;
    writeln!(
        s,
        "speed: {} kn {} km/h | course: {} deg | sigma lat {} lon {} alt {} m",
        decimal(snapshot.speed_knots, 3),
        decimal(snapshot.speed_kmh, 3),
        decimal(snapshot.course, 1),
        decimal(snapshot.std_dev_lat, 2),
        decimal(snapshot.std_dev_lon, 2),
        decimal(snapshot.std_dev_alt, 2),
    )?;

    let mut systems = BTreeMap::<Constellation, Vec<&SatelliteRecord>>::new();
    for sat in satellites {
        systems.entry(sat.constellation).or_default().push(sat);
    }

    for (constellation, sats) in systems {
        writeln!(
            s,
            "\n{} ({}) - {} satellites",
            constellation,
            constellation.bands(),
            sats.len()
        )?;
        writeln!(s, "  PRN  ELEV  AZIM  SNR")?;
        for sat in sats {
            writeln!(
                s,
                "  {:>3}  {:>4}  {:>4}  {:>3}",
                sat.prn,
                value(sat.elevation),
                value(sat.azimuth),
                value(sat.snr),
            )?;
        }
    }

    if !snapshot.messages.is_empty() {
        writeln!(s, "\nreceiver messages:")?;
        for txt in snapshot.messages.iter() {
            writeln!(s, "  [{}] {}", value(txt.severity), txt.text)?;
        }
    }

    writeln!(
        s,
        "\naccepted: {} | rejected: {} | cycles: {} | last rejection: {}",
        statistics.total_accepted(),
        statistics.total_rejected(),
        statistics.cycles,
        value(statistics.last_rejection.as_ref()),
    )?;

    Ok(s)
}

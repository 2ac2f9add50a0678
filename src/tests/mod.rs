//! nmea-gnss lib test modules

mod checksum;

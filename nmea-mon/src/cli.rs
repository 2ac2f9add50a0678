use clap::{value_parser, Arg, ArgMatches, ColorChoice, Command};
use std::{path::PathBuf, time::Duration};

pub struct Cli {
    /// Arguments passed by user
    matches: ArgMatches,
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: {
                Command::new("nmea-mon")
                    .version(env!("CARGO_PKG_VERSION"))
                    .about("Satellites in view and fix quality monitor, for NMEA-0183 receivers")
                    .color(ColorChoice::Always)
                    .arg(
                        Arg::new("port")
                            .short('p')
                            .long("port")
                            .value_name("PORT")
                            .conflicts_with("file")
                            .help("Set device port, default: \"/dev/ttyUSB0\""),
                    )
                    .arg(
                        Arg::new("baud")
                            .short('b')
                            .long("baud")
                            .value_name("BAUDRATE")
                            .value_parser(value_parser!(u32))
                            .help("Set port baudrate, default: \"9600\""),
                    )
                    .arg(
                        Arg::new("file")
                            .short('f')
                            .long("file")
                            .value_name("FILE")
                            .value_parser(value_parser!(PathBuf))
                            .help("Replay a NMEA capture instead of a live device"),
                    )
                    .arg(
                        Arg::new("config")
                            .short('c')
                            .long("config")
                            .value_name("FILE")
                            .value_parser(value_parser!(PathBuf))
                            .help("Monitor configuration (JSON)"),
                    )
                    .arg(
                        Arg::new("refresh")
                            .short('r')
                            .long("refresh")
                            .value_name("MS")
                            .value_parser(value_parser!(u64))
                            .help("Display refresh period in milliseconds, default: 1000"),
                    )
                    .get_matches()
            },
        }
    }
    /* returns device port to use */
    pub fn port(&self) -> String {
        if let Some(p) = self.matches.get_one::<String>("port") {
            p.clone()
        } else {
            String::from("/dev/ttyUSB0")
        }
    }
    /* returns baudrate to use */
    pub fn baudrate(&self) -> u32 {
        self.matches.get_one::<u32>("baud").copied().unwrap_or(9600)
    }
    /* returns capture to replay, if any */
    pub fn replay(&self) -> Option<&PathBuf> {
        self.matches.get_one::<PathBuf>("file")
    }
    pub fn config(&self) -> Option<&PathBuf> {
        self.matches.get_one::<PathBuf>("config")
    }
    pub fn refresh(&self) -> Duration {
        let ms = self.matches.get_one::<u64>("refresh").copied().unwrap_or(1000);
        Duration::from_millis(ms.max(10))
    }
}

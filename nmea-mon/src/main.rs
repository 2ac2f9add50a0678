//! Satellites in view and fix quality monitor, for NMEA-0183 GNSS receivers.
//! Homepage: <https://github.com/georust/nmea-gnss>
mod cli;
mod render;

use cli::Cli;

use env_logger::{Builder, Target};
use log::{error, info};
use thiserror::Error;

use nmea_gnss::prelude::{LineSource, Monitor, MonitorConfig, StreamSource};

use std::{
    fs::File,
    io::{BufRead, Write},
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read configuration \"{0}\"")]
    ConfigRead(PathBuf, #[source] std::io::Error),
    #[error("invalid configuration: {0}")]
    ConfigParsing(#[from] serde_json::Error),
    #[error("failed to open serial port \"{0}\"")]
    SerialPort(String, #[source] serialport::Error),
    #[error("failed to open capture \"{0}\"")]
    Replay(PathBuf, #[source] std::io::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("rendering error")]
    Render(#[from] std::fmt::Error),
    #[error("reader thread panicked")]
    ReaderPanic,
}

fn load_config(cli: &Cli) -> Result<MonitorConfig, Error> {
    match cli.config() {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| Error::ConfigRead(path.clone(), e))?;
            let cfg: MonitorConfig = serde_json::from_str(&content)?;
            info!("loaded configuration \"{}\"", path.display());
            Ok(cfg)
        },
        None => Ok(MonitorConfig::default()),
    }
}

fn open_source(cli: &Cli, cfg: &MonitorConfig) -> Result<Box<dyn LineSource + Send>, Error> {
    if let Some(path) = cli.replay() {
        let fd = File::open(path).map_err(|e| Error::Replay(path.clone(), e))?;
        info!("replaying \"{}\"", path.display());
        return Ok(Box::new(StreamSource::from_reader(fd)));
    }

    let port = cli.port();
    let baud_rate = cli.baudrate();
    info!("connecting to {}, baud: {}", port, baud_rate);

    let device = serialport::new(port.clone(), baud_rate)
        .timeout(cfg.read_timeout())
        .open()
        .map_err(|e| Error::SerialPort(port, e))?;

    Ok(Box::new(StreamSource::from_reader(device)))
}

pub fn main() -> Result<(), Error> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stderr)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();
    let cfg = load_config(&cli)?;

    // device unavailability is fatal
    let mut source = open_source(&cli, &cfg)?;

    let mut monitor = Monitor::new(&cfg);
    let catalog = monitor.catalog();
    let snapshot = monitor.snapshot();
    let statistics = monitor.statistics();

    let stop = Arc::new(AtomicBool::new(false));
    let reader = {
        let stop = Arc::clone(&stop);
        thread::spawn(move || monitor.run(&mut *source, &stop))
    };

    // "q" or end of input stops the monitor
    {
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) if line.trim() == "q" => break,
                    Ok(_) => continue,
                    Err(_) => break,
                }
            }
            stop.store(true, Ordering::Relaxed);
        });
    }

    let refresh = cli.refresh();
    let mut stdout = std::io::stdout();

    loop {
        let finished = reader.is_finished();

        let frame = render::frame(&catalog.query(), &snapshot.current(), &statistics.current())?;
        // clear screen, then draw
        write!(stdout, "\x1b[2J\x1b[H{}", frame)?;
        stdout.flush()?;

        if finished {
            break;
        }
        thread::sleep(refresh);
    }

    match reader.join() {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!("stream interrupted: {}", e);
            Err(e.into())
        },
        Err(_) => Err(Error::ReaderPanic),
    }
}

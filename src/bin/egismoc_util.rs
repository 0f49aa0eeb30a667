//! A small command-line front end for exercising the driver against real
//! hardware, mirroring `spi-memory`'s bundled `spimem-util` binary (same
//! shape: parse options, connect, dispatch one subcommand, log the
//! outcome).

use clap::{Parser, Subcommand};
use log::{error, info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

use egismoc::fingerprint::FingerprintDevice;
use egismoc::print::{print_from_id, PrintId};
use egismoc::usb::RusbTransport;
use egismoc::Driver;

#[derive(Parser, Debug)]
#[command(name = "egismoc-util", about = "Exercise an Egis match-on-chip fingerprint sensor")]
struct Options {
    #[command(subcommand)]
    operation: Operation,

    /// Log level.
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
enum Operation {
    /// Open the device and print its firmware version.
    Info,
    /// List currently enrolled prints.
    List,
    /// Enroll a new print under the given user id.
    Enroll {
        /// User id to embed in the new print's identifier.
        user_id: String,
    },
    /// Delete the enrolled print whose id, as hex, is given.
    Delete {
        #[arg(value_parser = parse_hex_id)]
        id: PrintId,
    },
    /// Delete every enrolled print.
    ClearStorage,
}

fn parse_hex_id(s: &str) -> Result<PrintId, hex::FromHexError> {
    hex::decode(s).map(|bytes| PrintId::from_bytes(&bytes))
}

fn main() -> Result<(), Box<dyn std::error::Error + 'static>> {
    let opts = Options::parse();

    TermLogger::init(opts.log_level, Config::default(), TerminalMode::Mixed, simplelog::ColorChoice::Auto)?;

    let transport = match RusbTransport::open_first() {
        Ok(t) => t,
        Err(e) => {
            error!("could not open device: {}", e);
            return Ok(());
        }
    };

    let mut driver = Driver::new(transport);
    if let Err(e) = driver.device_open() {
        error!("open failed: {}", e);
        return Ok(());
    }
    info!("firmware version: {}", driver.firmware_version().unwrap_or("unknown"));

    match opts.operation {
        Operation::Info => {}
        Operation::List => match driver.list_prints() {
            Ok(prints) => {
                for p in prints {
                    info!("{}", p.description);
                }
            }
            Err(e) => error!("list failed: {}", e),
        },
        Operation::Enroll { user_id } => {
            let generated = format!("FP{}", user_id);
            match driver.enroll(generated.as_bytes(), |stage, kind| match kind {
                Some(kind) => info!("stage {} retry: {:?}", stage, kind),
                None => info!("stage {} complete", stage),
            }) {
                Ok(print) => info!("enrolled: {}", print.description),
                Err(e) => error!("enroll failed: {}", e),
            }
        }
        Operation::Delete { id } => {
            let print = print_from_id(id);
            match driver.delete_print(&print) {
                Ok(()) => info!("deleted"),
                Err(e) => error!("delete failed: {}", e),
            }
        }
        Operation::ClearStorage => match driver.clear_storage() {
            Ok(()) => info!("cleared"),
            Err(e) => error!("clear-storage failed: {}", e),
        },
    }

    driver.device_close().ok();
    Ok(())
}

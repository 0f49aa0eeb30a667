//! Driver core for Egis Technology (LighTuning) match-on-chip USB
//! fingerprint sensors (vendor `0x1c7a`, product `0x0582`).
//!
//! This crate implements the wire protocol, the per-operation state
//! machines, and the enrolled-template registry; it deliberately does not
//! implement a generic fingerprint framework, a USB stack, or driver
//! registration glue — callers provide a [`transport::UsbTransport`] and an
//! [`ops::open::ControlHandshake`], and drive the [`fingerprint::FingerprintDevice`]
//! trait from whatever host framework they're embedding this in.
//!
//! Logging follows the `log` facade throughout (`debug!`/`trace!` on every
//! transfer and state transition); host binaries pick a subscriber, e.g.
//! `env_logger` in tests or `simplelog` in the bundled CLI.

#![doc(html_root_url = "https://docs.rs/egismoc/0.1.0")]
#![deny(rust_2018_idioms)]

pub mod command;
pub mod config;
pub mod device;
pub mod error;
pub mod fingerprint;
pub mod frame;
pub mod markers;
pub mod ops;
pub mod print;
pub mod registry;
pub mod transport;
pub mod usb;

pub use device::Driver;
pub use error::{DriverError, RetryKind};
pub use fingerprint::{device_features, DeviceFeatures, FingerprintDevice};
pub use print::{Print, PrintId};
pub use registry::EnrolledRegistry;
pub use transport::UsbTransport;

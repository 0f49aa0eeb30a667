//! Operation state machines. Each public operation gets its own module;
//! all of them share the frame-compose-send-decode rhythm factored out here.
//!
//! Each operation is expressed directly as a synchronous function rather
//! than an explicit state machine, since the driver's own concurrency model
//! is a single cooperative dispatch loop with no concurrent operations to
//! interleave. `enroll`'s capture loop is the one operation with real
//! branching state, so it alone is given an explicit `enum` (see
//! `ops::enroll::CaptureOutcome`); the others are a straight-line sequence
//! of steps.

pub mod clear;
pub mod delete;
pub mod enroll;
pub mod identify;
pub mod list;
pub mod open;

use std::time::Duration;

use log::{debug, trace};

use crate::config::{
    EP_CMD_IN, EP_CMD_OUT, READ_PREFIX_LEN, USB_IN_RECV_LENGTH, USB_RECV_TIMEOUT, USB_SEND_TIMEOUT,
};
use crate::error::DriverError;
use crate::transport::{command_round_trip, UsbTransport};

/// Runs one SEND-then-RECEIVE command round-trip over the command endpoints
/// with the driver's standard timeouts.
pub(crate) fn exchange<T: UsbTransport>(
    transport: &mut T,
    command: &[u8],
) -> Result<Vec<u8>, DriverError<T::Error>> {
    trace!("command round-trip: {} bytes out", command.len());
    let reply = command_round_trip(
        transport,
        EP_CMD_OUT,
        EP_CMD_IN,
        command,
        USB_SEND_TIMEOUT,
        USB_RECV_TIMEOUT,
        USB_IN_RECV_LENGTH,
    )
    .map_err(DriverError::Transport)?;
    trace!("command round-trip: {} bytes in", reply.len());
    if reply.len() < READ_PREFIX_LEN {
        return Err(DriverError::general(format!(
            "reply truncated below the {}-byte read prefix ({} bytes)",
            READ_PREFIX_LEN,
            reply.len()
        )));
    }
    Ok(reply)
}

/// Waits for the finger-presence interrupt, surfacing a cooperative
/// cancellation check before and after the wait.
pub(crate) fn wait_for_finger<T: UsbTransport>(
    transport: &mut T,
    interrupt_ep: u8,
    timeout: Duration,
) -> Result<(), DriverError<T::Error>> {
    if transport.is_cancelled() {
        debug!("finger-wait skipped: operation already cancelled");
        return Err(DriverError::Cancelled);
    }
    transport
        .interrupt_read(interrupt_ep, timeout)
        .map_err(DriverError::Transport)?;
    if transport.is_cancelled() {
        debug!("finger-wait cancelled after interrupt transfer completed");
        return Err(DriverError::Cancelled);
    }
    Ok(())
}

/// A command whose only decoding is "does the reply match this single
/// marker at the fixed prefix offset".
pub(crate) fn expect_prefix<T: UsbTransport>(
    reply: &[u8],
    marker: &[u8],
) -> Result<(), DriverError<T::Error>> {
    if crate::frame::validate_prefix(reply, marker) {
        Ok(())
    } else {
        Err(DriverError::protocol("reply did not match expected prefix marker"))
    }
}

//! `identify` and `verify`: identical
//! transport path, differing only in how the matched `PrintId` is reported.

use crate::command::build_check_body;
use crate::config::{EP_INTERRUPT_IN, IDENTIFY_RESPONSE_PRINT_ID_OFFSET, USB_INTERRUPT_TIMEOUT};
use crate::error::DriverError;
use crate::markers::{
    CMD_SENSOR_CHECK, CMD_SENSOR_IDENTIFY, CMD_SENSOR_RESET, RSP_IDENTIFY_MATCH_PREFIX,
    RSP_IDENTIFY_MATCH_SUFFIX, RSP_IDENTIFY_NOTMATCH_PREFIX,
};
use crate::print::{print_from_id, Print, PrintId};
use crate::transport::UsbTransport;

/// The outcome of an identify attempt against a caller-supplied gallery.
#[derive(Debug, Clone, PartialEq)]
pub enum IdentifyOutcome {
    /// The matched `PrintId` was found among the caller's gallery prints.
    Matched(Print),
    /// The device matched a print, but it isn't one the caller's gallery
    /// knows about.
    MatchedUnknown(Print),
    /// The device reported no match for any enrolled print.
    NoMatch,
}

/// The outcome of a verify attempt against a single reference print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Matched,
    Failed,
}

/// Runs the shared identify/verify transport path up to and including the
/// check-command reply, returning the matched `PrintId` if any.
fn run_check<T: UsbTransport>(transport: &mut T) -> Result<Option<Print>, DriverError<T::Error>> {
    let registry = super::list::refresh_registry(transport)?;
    if registry.is_empty() {
        return Err(DriverError::DataNotFound);
    }

    let reset = crate::frame::compose(&CMD_SENSOR_RESET);
    super::exchange(transport, &reset)?;

    let identify = crate::frame::compose(&CMD_SENSOR_IDENTIFY);
    super::exchange(transport, &identify)?;

    super::wait_for_finger(transport, EP_INTERRUPT_IN, USB_INTERRUPT_TIMEOUT)?;

    let check = crate::frame::compose(&CMD_SENSOR_CHECK);
    super::exchange(transport, &check)?;

    let check_body = build_check_body(registry.ids());
    let check_frame = crate::frame::compose(&check_body);
    let reply = super::exchange(transport, &check_frame)?;

    let matched = if crate::frame::validate_prefix(&reply, &RSP_IDENTIFY_MATCH_PREFIX)
        && crate::frame::validate_suffix(&reply, &RSP_IDENTIFY_MATCH_SUFFIX)
    {
        let start = IDENTIFY_RESPONSE_PRINT_ID_OFFSET;
        let end = start + crate::config::FINGERPRINT_DATA_SIZE;
        if end > reply.len() {
            return Err(DriverError::general("identify reply too short for PrintId field"));
        }
        Some(print_from_id(PrintId::from_bytes(&reply[start..end])))
    } else if crate::frame::validate_prefix(&reply, &RSP_IDENTIFY_NOTMATCH_PREFIX) {
        None
    } else {
        return Err(DriverError::protocol("identify/verify check reply matched no known marker"));
    };

    let final_reset = crate::frame::compose(&CMD_SENSOR_RESET);
    super::exchange(transport, &final_reset)?;

    Ok(matched)
}

/// Runs `identify`: searches `gallery` for a `Print` matching the device's
/// reported `PrintId`.
pub fn identify<T: UsbTransport>(
    transport: &mut T,
    gallery: &[Print],
) -> Result<IdentifyOutcome, DriverError<T::Error>> {
    match run_check(transport)? {
        None => Ok(IdentifyOutcome::NoMatch),
        Some(candidate) => match gallery.iter().find(|p| **p == candidate) {
            Some(known) => Ok(IdentifyOutcome::Matched(known.clone())),
            None => Ok(IdentifyOutcome::MatchedUnknown(candidate)),
        },
    }
}

/// Runs `verify`: compares the device's reported `PrintId` against a single
/// reference `Print`.
pub fn verify<T: UsbTransport>(
    transport: &mut T,
    reference: &Print,
) -> Result<VerifyOutcome, DriverError<T::Error>> {
    match run_check(transport)? {
        Some(candidate) if candidate == *reference => Ok(VerifyOutcome::Matched),
        _ => Ok(VerifyOutcome::Failed),
    }
}

//! The `enroll` operation: the one operation with
//! real branching state, so it alone gets an explicit state enum.

use log::debug;

use crate::command::build_check_body;
use crate::config::{EP_INTERRUPT_IN, ENROLL_TIMES, MAX_ENROLL_NUM, USB_INTERRUPT_TIMEOUT};
use crate::error::{DriverError, RetryKind};
use crate::markers::{
    CMD_COMMIT_STARTING, CMD_ENROLL_STARTING, CMD_NEW_PRINT_PREFIX, CMD_READ_CAPTURE,
    CMD_SENSOR_CHECK, CMD_SENSOR_ENROLL, CMD_SENSOR_RESET, CMD_SENSOR_START_CAPTURE,
    RSP_CHECK_NOT_YET_ENROLLED_PREFIX, RSP_READ_DIRTY_PREFIX, RSP_READ_OFFCENTER_PREFIX,
    RSP_READ_OFFCENTER_SUFFIX, RSP_READ_SUCCESS_PREFIX, RSP_READ_SUCCESS_SUFFIX,
};
use crate::print::{new_enrolled_print_id, Print};
use crate::transport::UsbTransport;

/// How the device classified one `read_capture` reply. `Retry` stages do not advance the stage counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureOutcome {
    PartialOk,
    Retry(RetryKind),
}

fn classify_capture_reply(reply: &[u8]) -> CaptureOutcome {
    if crate::frame::validate_prefix(reply, &RSP_READ_SUCCESS_PREFIX)
        && crate::frame::validate_suffix(reply, &RSP_READ_SUCCESS_SUFFIX)
    {
        CaptureOutcome::PartialOk
    } else if crate::frame::validate_prefix(reply, &RSP_READ_OFFCENTER_PREFIX)
        && crate::frame::validate_suffix(reply, &RSP_READ_OFFCENTER_SUFFIX)
    {
        CaptureOutcome::Retry(RetryKind::CenterFinger)
    } else if crate::frame::validate_prefix(reply, &RSP_READ_DIRTY_PREFIX) {
        CaptureOutcome::Retry(RetryKind::RemoveFinger)
    } else {
        CaptureOutcome::Retry(RetryKind::Generic)
    }
}

/// Runs the full enroll sequence.
/// `on_progress` is invoked once per capture attempt with the current stage
/// index: `None` on a successful partial capture (after the stage counter
/// has advanced), `Some(kind)` on a soft capture failure (stage not
/// advanced), mirroring the framework's `fpi_device_enroll_progress` calls
/// for both `ENROLL_STATUS_PARTIAL_OK` and the retry statuses.
pub fn enroll<T: UsbTransport>(
    transport: &mut T,
    generated_user_id: &[u8],
    mut on_progress: impl FnMut(usize, Option<RetryKind>),
) -> Result<Print, DriverError<T::Error>> {
    let registry = super::list::refresh_registry(transport)?;
    if registry.len() >= MAX_ENROLL_NUM {
        return Err(DriverError::DataFull);
    }

    let reset = crate::frame::compose(&CMD_SENSOR_RESET);
    super::exchange(transport, &reset)?;
    let sensor_enroll = crate::frame::compose(&CMD_SENSOR_ENROLL);
    super::exchange(transport, &sensor_enroll)?;
    super::wait_for_finger(transport, EP_INTERRUPT_IN, USB_INTERRUPT_TIMEOUT)?;
    let sensor_check = crate::frame::compose(&CMD_SENSOR_CHECK);
    super::exchange(transport, &sensor_check)?;

    let check_body = build_check_body(registry.ids());
    let check_frame = crate::frame::compose(&check_body);
    let check_reply = super::exchange(transport, &check_frame)?;
    if !crate::frame::validate_prefix(&check_reply, &RSP_CHECK_NOT_YET_ENROLLED_PREFIX) {
        return Err(DriverError::DataDuplicate);
    }

    let enroll_start = crate::frame::compose(&CMD_ENROLL_STARTING);
    super::exchange(transport, &enroll_start)?;

    let mut stage = 0usize;
    while stage < ENROLL_TIMES {
        let reset = crate::frame::compose(&CMD_SENSOR_RESET);
        super::exchange(transport, &reset)?;
        let start_capture = crate::frame::compose(&CMD_SENSOR_START_CAPTURE);
        super::exchange(transport, &start_capture)?;
        super::wait_for_finger(transport, EP_INTERRUPT_IN, USB_INTERRUPT_TIMEOUT)?;
        let read_capture = crate::frame::compose(&CMD_READ_CAPTURE);
        let reply = super::exchange(transport, &read_capture)?;

        match classify_capture_reply(&reply) {
            CaptureOutcome::PartialOk => {
                stage += 1;
                debug!("capture stage {}/{} complete", stage, ENROLL_TIMES);
                on_progress(stage, None);
            }
            CaptureOutcome::Retry(kind) => {
                debug!("capture stage {} soft-failed: {:?}", stage, kind);
                on_progress(stage, Some(kind));
            }
        }
    }

    let commit_start = crate::frame::compose(&CMD_COMMIT_STARTING);
    super::exchange(transport, &commit_start)?;

    let new_id = new_enrolled_print_id(generated_user_id);
    let mut new_print_body = CMD_NEW_PRINT_PREFIX.to_vec();
    new_print_body.extend_from_slice(new_id.as_bytes());
    let new_print_frame = crate::frame::compose(&new_print_body);
    super::exchange(transport, &new_print_frame)?;

    let final_reset = crate::frame::compose(&CMD_SENSOR_RESET);
    super::exchange(transport, &final_reset)?;

    Ok(crate::print::print_from_id(new_id))
}

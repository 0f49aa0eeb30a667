//! The `open` state machine: a fixed control-transfer
//! handshake followed by a firmware-version read.

use crate::config::{CHECK_BYTES_LENGTH, READ_PREFIX_LEN};
use crate::error::DriverError;
use crate::markers::{CMD_FW_VERSION, RSP_FW_VERSION_SUFFIX};
use crate::transport::UsbTransport;

/// A vendor- or standard-defined control-IN request issued during open.
/// `UsbTransport` doesn't model control transfers directly since this driver
/// never writes to the control endpoint, only reads fixed-length
/// acknowledgements from it. Concrete implementations apply
/// `config::USB_CONTROL_TIMEOUT` to each request.
pub trait ControlHandshake {
    type Error: std::error::Error + 'static;

    fn control_read(
        &mut self,
        request_type_vendor: bool,
        request: u8,
        value: u16,
        index: u16,
        length: u16,
    ) -> Result<Vec<u8>, Self::Error>;
}

/// Runs the fixed open handshake: two vendor
/// control-INs, two standard control-INs, then one more vendor control-IN.
/// The replies themselves are not semantically decoded — only their
/// successful completion matters.
pub fn run_handshake<C: ControlHandshake>(ctrl: &mut C) -> Result<(), DriverError<C::Error>> {
    ctrl.control_read(true, 32, 0, 4, 16).map_err(DriverError::Transport)?;
    ctrl.control_read(true, 32, 0, 4, 40).map_err(DriverError::Transport)?;
    ctrl.control_read(false, 0, 0, 0, 2).map_err(DriverError::Transport)?;
    ctrl.control_read(false, 0, 0, 0, 2).map_err(DriverError::Transport)?;
    ctrl.control_read(true, 82, 0, 0, 8).map_err(DriverError::Transport)?;
    Ok(())
}

/// Sends the firmware-version command and extracts the version string
/// embedded in the reply.
pub fn read_firmware_version<T: UsbTransport>(
    transport: &mut T,
) -> Result<String, DriverError<T::Error>> {
    let frame = crate::frame::compose(&CMD_FW_VERSION);
    let reply = super::exchange(transport, &frame)?;

    if !crate::frame::validate_suffix(&reply, &RSP_FW_VERSION_SUFFIX) {
        return Err(DriverError::protocol("firmware-version reply missing expected suffix marker"));
    }

    let start = READ_PREFIX_LEN + CHECK_BYTES_LENGTH + 3 + 1;
    let end = reply
        .len()
        .checked_sub(RSP_FW_VERSION_SUFFIX.len())
        .ok_or_else(|| DriverError::general("firmware-version reply shorter than suffix marker"))?;
    if start > end || end > reply.len() {
        return Err(DriverError::general("firmware-version reply too short for version field"));
    }

    Ok(String::from_utf8_lossy(&reply[start..end]).into_owned())
}

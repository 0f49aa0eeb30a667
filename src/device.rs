//! Device lifecycle: interface claim/release around the
//! `open` handshake, and the cancellation/suspend aliasing used for
//! cooperative cancellation of the finger-presence wait.

use log::{error, info};

use crate::config::{USB_ALT_SETTING, USB_INTERFACE};
use crate::error::DriverError;
use crate::ops::open::{read_firmware_version, ControlHandshake};
use crate::transport::UsbTransport;

/// Holds the claimed transport for the device's entire open lifetime.
/// Generic over the transport the same way `spi-memory`'s `Flash<SPI, CS>`
/// is generic over the bus and chip-select rather than a concrete
/// peripheral type.
pub struct Driver<T> {
    transport: T,
    firmware_version: Option<String>,
    open: bool,
}

impl<T: UsbTransport> Driver<T> {
    pub fn new(transport: T) -> Self {
        Driver {
            transport,
            firmware_version: None,
            open: false,
        }
    }

    /// Releases the interface.
    pub fn close(&mut self) -> Result<(), DriverError<T::Error>> {
        self.cancel();
        self.transport
            .release_interface(USB_INTERFACE)
            .map_err(DriverError::Transport)?;
        self.open = false;
        info!("device closed");
        Ok(())
    }

    /// Cancels the in-flight finger-wait, if any. `suspend` is aliased to this.
    pub fn cancel(&mut self) {
        self.transport.cancel();
    }

    pub fn suspend(&mut self) {
        self.cancel();
    }

    /// Rebuilds the cancellation handle so the next operation starts
    /// uncancelled. Callers invoke this after an operation's
    /// state machine has wound down from a cancellation.
    pub fn reset_cancellation(&mut self) {
        self.transport.reset_cancellation();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn firmware_version(&self) -> Option<&str> {
        self.firmware_version.as_deref()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

impl<T> Driver<T>
where
    T: UsbTransport + ControlHandshake<Error = <T as UsbTransport>::Error>,
{
    /// Resets the device, claims the interface, and runs the open
    /// handshake. Only available when the transport itself also implements
    /// `ControlHandshake` — the control endpoint this needs is reached
    /// through the same USB handle as the bulk endpoints on real hardware.
    pub fn open(&mut self) -> Result<(), DriverError<T::Error>> {
        self.transport.reset().map_err(DriverError::Transport)?;

        self.transport
            .claim_interface(USB_INTERFACE, USB_ALT_SETTING)
            .map_err(DriverError::Transport)?;

        match self.run_open_sequence() {
            Ok(version) => {
                info!("device open, firmware version {}", version);
                self.firmware_version = Some(version);
                self.open = true;
                Ok(())
            }
            Err(e) => {
                // On error, release the interface before surfacing it. The
                // release's own error is secondary to the one already in hand.
                error!("open failed, releasing interface: {}", e);
                let _ = self.transport.release_interface(USB_INTERFACE);
                Err(e)
            }
        }
    }

    fn run_open_sequence(&mut self) -> Result<String, DriverError<T::Error>> {
        crate::ops::open::run_handshake(&mut self.transport)?;
        read_firmware_version(&mut self.transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::FakeTransport;

    #[test]
    fn open_releases_interface_on_firmware_read_failure() {
        let transport = FakeTransport::new(); // no scripted bulk reply -> fails
        let mut driver = Driver::new(transport);

        let result = driver.open();
        assert!(result.is_err());
        assert!(!driver.is_open());
    }

    #[test]
    fn open_resets_the_device_before_claiming_the_interface() {
        let mut transport = FakeTransport::new();
        transport.fail_reset = true;
        let mut driver = Driver::new(transport);

        let result = driver.open();
        assert!(result.is_err());
        assert!(driver.transport_mut().reset_called);
        assert!(!driver.transport_mut().interface_claimed);
    }

    #[test]
    fn open_succeeds_and_records_firmware_version() {
        let _ = env_logger::try_init();
        let mut transport = FakeTransport::new();
        let prefix_len = crate::config::READ_PREFIX_LEN + crate::config::CHECK_BYTES_LENGTH;
        let mut reply = vec![0u8; prefix_len + 4];
        reply.extend_from_slice(b"9.99");
        reply.extend_from_slice(&crate::markers::RSP_FW_VERSION_SUFFIX);
        transport.push_bulk_reply(reply);

        let mut driver = Driver::new(transport);
        driver.open().unwrap();

        assert!(driver.is_open());
        assert_eq!(driver.firmware_version(), Some("9.99"));
    }
}

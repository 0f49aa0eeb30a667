//! A `rusb`-backed [`UsbTransport`]/[`ControlHandshake`] implementation
//! against real hardware.
//!
//! Kept separate from `transport.rs` so the op state machines and their
//! tests never depend on `rusb` directly — only this module and the CLI
//! binary do.

use std::time::Duration;

use rusb::{DeviceHandle, GlobalContext};

use crate::config::{PRODUCT_ID, VENDOR_ID};
use crate::ops::open::ControlHandshake;
use crate::transport::UsbTransport;

/// Owns the open `rusb` handle for the duration of the driver's lifetime.
pub struct RusbTransport {
    handle: DeviceHandle<GlobalContext>,
    cancelled: bool,
}

impl RusbTransport {
    /// Opens the first device matching the sensor's vendor/product ID.
    pub fn open_first() -> Result<Self, rusb::Error> {
        let handle = rusb::open_device_with_vid_pid(VENDOR_ID, PRODUCT_ID)
            .ok_or(rusb::Error::NoDevice)?;
        Ok(RusbTransport { handle, cancelled: false })
    }
}

impl UsbTransport for RusbTransport {
    type Error = rusb::Error;

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.handle.reset()
    }

    fn claim_interface(&mut self, interface: u8, alt_setting: u8) -> Result<(), Self::Error> {
        self.handle.claim_interface(interface)?;
        self.handle.set_alternate_setting(interface, alt_setting)
    }

    fn release_interface(&mut self, interface: u8) -> Result<(), Self::Error> {
        self.handle.release_interface(interface)
    }

    fn bulk_write(&mut self, endpoint: u8, data: &[u8], timeout: Duration) -> Result<usize, Self::Error> {
        self.handle.write_bulk(endpoint, data, timeout)
    }

    fn bulk_read(&mut self, endpoint: u8, max_len: usize, timeout: Duration) -> Result<Vec<u8>, Self::Error> {
        let mut buf = vec![0u8; max_len];
        let n = self.handle.read_bulk(endpoint, &mut buf, timeout)?;
        buf.truncate(n);
        Ok(buf)
    }

    fn interrupt_read(&mut self, endpoint: u8, timeout: Duration) -> Result<Vec<u8>, Self::Error> {
        // The device is known to short this transfer by one byte; a 2-byte
        // buffer absorbs that without ever treating it as an error.
        let mut buf = [0u8; 2];
        let n = self.handle.read_interrupt(endpoint, &mut buf, timeout)?;
        Ok(buf[..n].to_vec())
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }

    fn reset_cancellation(&mut self) {
        self.cancelled = false;
    }
}

impl ControlHandshake for RusbTransport {
    type Error = rusb::Error;

    fn control_read(
        &mut self,
        request_type_vendor: bool,
        request: u8,
        value: u16,
        index: u16,
        length: u16,
    ) -> Result<Vec<u8>, Self::Error> {
        use rusb::request_type;

        let request_type = request_type(
            rusb::Direction::In,
            if request_type_vendor { rusb::RequestType::Vendor } else { rusb::RequestType::Standard },
            rusb::Recipient::Device,
        );
        let mut buf = vec![0u8; length as usize];
        let n = self
            .handle
            .read_control(request_type, request, value, index, &mut buf, crate::config::USB_CONTROL_TIMEOUT)?;
        buf.truncate(n);
        Ok(buf)
    }
}

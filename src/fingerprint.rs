//! The public adapter: dispatches the
//! framework's abstract operations onto the op state machines in `ops/`.
//!
//! This is a thin stand-in for the generic fingerprint framework's device
//! base class, which lives outside this crate as an external collaborator
//! this driver is written against but doesn't implement.

use crate::device::Driver;
use crate::error::{DriverError, RetryKind};
use crate::ops::identify::{IdentifyOutcome, VerifyOutcome};
use crate::ops::open::ControlHandshake;
use crate::print::Print;
use crate::transport::UsbTransport;

/// A transport that also reaches the device's control endpoint, the
/// combination every concrete `FingerprintDevice` impl needs to `open`.
pub trait OpenableTransport: UsbTransport + ControlHandshake<Error = <Self as UsbTransport>::Error> {}
impl<T> OpenableTransport for T where T: UsbTransport + ControlHandshake<Error = <T as UsbTransport>::Error> {}

/// Feature flags the framework queries when registering this driver.
pub struct DeviceFeatures {
    pub duplicates_check: bool,
    pub scan_type_press: bool,
    pub enroll_stages: usize,
    pub temp_hot_seconds: u32,
}

pub fn device_features() -> DeviceFeatures {
    DeviceFeatures {
        duplicates_check: true,
        scan_type_press: true,
        enroll_stages: crate::config::ENROLL_TIMES,
        temp_hot_seconds: 0,
    }
}

/// The eight abstract operations the framework invokes.
/// Implemented for any `Driver<T>` over a concrete `UsbTransport`.
pub trait FingerprintDevice {
    type Error: std::error::Error + 'static;

    fn device_open(&mut self) -> Result<(), DriverError<Self::Error>>;

    fn device_close(&mut self) -> Result<(), DriverError<Self::Error>>;

    fn device_cancel(&mut self);

    fn device_suspend(&mut self);

    fn list_prints(&mut self) -> Result<Vec<Print>, DriverError<Self::Error>>;

    fn delete_print(&mut self, target: &Print) -> Result<(), DriverError<Self::Error>>;

    fn clear_storage(&mut self) -> Result<(), DriverError<Self::Error>>;

    fn enroll(
        &mut self,
        generated_user_id: &[u8],
        on_progress: impl FnMut(usize, Option<RetryKind>),
    ) -> Result<Print, DriverError<Self::Error>>;

    fn identify(&mut self, gallery: &[Print]) -> Result<IdentifyOutcome, DriverError<Self::Error>>;

    fn verify(&mut self, reference: &Print) -> Result<VerifyOutcome, DriverError<Self::Error>>;
}

impl<T: OpenableTransport> FingerprintDevice for Driver<T> {
    type Error = T::Error;

    fn device_open(&mut self) -> Result<(), DriverError<T::Error>> {
        self.open()
    }

    fn device_close(&mut self) -> Result<(), DriverError<T::Error>> {
        self.close()
    }

    fn device_cancel(&mut self) {
        self.cancel();
    }

    fn device_suspend(&mut self) {
        self.suspend();
    }

    fn list_prints(&mut self) -> Result<Vec<Print>, DriverError<T::Error>> {
        crate::ops::list::list(self.transport_mut())
    }

    fn delete_print(&mut self, target: &Print) -> Result<(), DriverError<T::Error>> {
        crate::ops::delete::delete(self.transport_mut(), target)
    }

    fn clear_storage(&mut self) -> Result<(), DriverError<T::Error>> {
        crate::ops::clear::clear_storage(self.transport_mut())
    }

    fn enroll(
        &mut self,
        generated_user_id: &[u8],
        on_progress: impl FnMut(usize, Option<RetryKind>),
    ) -> Result<Print, DriverError<T::Error>> {
        crate::ops::enroll::enroll(self.transport_mut(), generated_user_id, on_progress)
    }

    fn identify(&mut self, gallery: &[Print]) -> Result<IdentifyOutcome, DriverError<T::Error>> {
        crate::ops::identify::identify(self.transport_mut(), gallery)
    }

    fn verify(&mut self, reference: &Print) -> Result<VerifyOutcome, DriverError<T::Error>> {
        crate::ops::identify::verify(self.transport_mut(), reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::FakeTransport;

    #[test]
    fn device_features_report_press_and_duplicates_check() {
        let features = device_features();
        assert!(features.duplicates_check);
        assert!(features.scan_type_press);
        assert_eq!(features.temp_hot_seconds, 0);
    }

    #[test]
    fn list_prints_on_fresh_driver_is_empty_when_registry_empty() {
        let mut transport = FakeTransport::new();
        transport.push_bulk_reply(vec![0u8; 10]);
        let mut driver = Driver::new(transport);

        assert!(driver.list_prints().unwrap().is_empty());
    }

    #[test]
    fn device_close_releases_even_if_not_open() {
        let transport = FakeTransport::new();
        let mut driver = Driver::new(transport);
        assert!(driver.device_close().is_ok());
    }

    #[test]
    fn device_open_runs_through_fingerprint_device_trait() {
        let mut transport = FakeTransport::new();
        let prefix_len = crate::config::READ_PREFIX_LEN + crate::config::CHECK_BYTES_LENGTH;
        let mut reply = vec![0u8; prefix_len + 4];
        reply.extend_from_slice(b"1.00");
        reply.extend_from_slice(&crate::markers::RSP_FW_VERSION_SUFFIX);
        transport.push_bulk_reply(reply);

        let mut driver = Driver::new(transport);
        assert!(driver.device_open().is_ok());
    }
}

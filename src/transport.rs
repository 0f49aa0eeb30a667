//! The transport abstraction: bulk command round-trips
//! and the interrupt-IN "finger present" signal, plus cooperative
//! cancellation.
//!
//! Generalizes `spi-memory`'s "generic over any SPI bus + chip-select pin"
//! design (`series25.rs`'s `Flash<SPI, CS>`) to "generic over any USB
//! transport", so the op state machines in `ops/` never depend on `rusb`
//! directly and can be driven against a `FakeTransport` in tests.

use std::time::Duration;

/// Bulk/control/interrupt USB transfers the driver core needs, abstracted
/// away from any particular USB stack.
pub trait UsbTransport {
    type Error: std::error::Error + 'static;

    /// Resets the USB device. Issued once, before the interface is claimed,
    /// at the start of `open`.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Claims the interface and selects the alternate setting used by this
    /// driver.
    fn claim_interface(&mut self, interface: u8, alt_setting: u8) -> Result<(), Self::Error>;

    /// Releases the interface.
    fn release_interface(&mut self, interface: u8) -> Result<(), Self::Error>;

    /// Writes a fully composed frame to the command bulk-OUT endpoint.
    fn bulk_write(&mut self, endpoint: u8, data: &[u8], timeout: Duration) -> Result<usize, Self::Error>;

    /// Reads up to `max_len` bytes from the command bulk-IN endpoint.
    fn bulk_read(&mut self, endpoint: u8, max_len: usize, timeout: Duration) -> Result<Vec<u8>, Self::Error>;

    /// Blocks until the interrupt-IN endpoint reports finger presence, or
    /// the timeout elapses.
    fn interrupt_read(&mut self, endpoint: u8, timeout: Duration) -> Result<Vec<u8>, Self::Error>;

    /// True once a cancellation has been requested for the in-flight
    /// operation. Transports that can't observe cancellation mid-transfer
    /// may always return `false` and rely on the op state machine polling
    /// between steps.
    fn is_cancelled(&self) -> bool {
        false
    }

    /// Trips the dedicated cancellation handle guarding the interrupt-in
    /// finger-wait. A no-op default for transports with nothing in flight
    /// to cancel.
    fn cancel(&mut self) {}

    /// Reconstructs the cancellation handle fresh so the next operation
    /// starts uncancelled.
    fn reset_cancellation(&mut self) {}
}

/// A single round-trip: write `command`, then read up to `USB_IN_RECV_LENGTH`
/// bytes back.
pub fn command_round_trip<T: UsbTransport>(
    transport: &mut T,
    cmd_out_ep: u8,
    cmd_in_ep: u8,
    command: &[u8],
    send_timeout: Duration,
    recv_timeout: Duration,
    recv_len: usize,
) -> Result<Vec<u8>, T::Error> {
    transport.bulk_write(cmd_out_ep, command, send_timeout)?;
    transport.bulk_read(cmd_in_ep, recv_len, recv_timeout)
}

#[cfg(test)]
pub mod fake {
    //! A scripted, in-memory `UsbTransport` used by op state machine tests.
    //! Not gated behind a feature: `spi-memory` likewise keeps its
    //! `#[cfg(test)]` helpers inline rather than behind a dev-only crate.

    use super::UsbTransport;
    use crate::ops::open::ControlHandshake;
    use std::collections::VecDeque;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum FakeTransportError {
        #[error("fake transport: scripted reply queue exhausted")]
        QueueExhausted,
        #[error("fake transport: scripted failure")]
        Scripted,
    }

    /// Replays a queue of scripted bulk-IN / interrupt-IN replies in order,
    /// and records every outbound bulk-OUT write for later assertion.
    #[derive(Default)]
    pub struct FakeTransport {
        pub bulk_in_replies: VecDeque<Vec<u8>>,
        pub interrupt_replies: VecDeque<Vec<u8>>,
        pub writes: Vec<Vec<u8>>,
        pub cancelled: bool,
        pub fail_next_write: bool,
        pub fail_reset: bool,
        pub reset_called: bool,
        pub interface_claimed: bool,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_bulk_reply(&mut self, reply: Vec<u8>) -> &mut Self {
            self.bulk_in_replies.push_back(reply);
            self
        }

        pub fn push_interrupt_reply(&mut self, reply: Vec<u8>) -> &mut Self {
            self.interrupt_replies.push_back(reply);
            self
        }
    }

    impl UsbTransport for FakeTransport {
        type Error = FakeTransportError;

        fn reset(&mut self) -> Result<(), Self::Error> {
            self.reset_called = true;
            if self.fail_reset {
                return Err(FakeTransportError::Scripted);
            }
            Ok(())
        }

        fn claim_interface(&mut self, _interface: u8, _alt_setting: u8) -> Result<(), Self::Error> {
            self.interface_claimed = true;
            Ok(())
        }

        fn release_interface(&mut self, _interface: u8) -> Result<(), Self::Error> {
            Ok(())
        }

        fn bulk_write(&mut self, _endpoint: u8, data: &[u8], _timeout: std::time::Duration) -> Result<usize, Self::Error> {
            if self.fail_next_write {
                self.fail_next_write = false;
                return Err(FakeTransportError::Scripted);
            }
            self.writes.push(data.to_vec());
            Ok(data.len())
        }

        fn bulk_read(&mut self, _endpoint: u8, _max_len: usize, _timeout: std::time::Duration) -> Result<Vec<u8>, Self::Error> {
            self.bulk_in_replies.pop_front().ok_or(FakeTransportError::QueueExhausted)
        }

        fn interrupt_read(&mut self, _endpoint: u8, _timeout: std::time::Duration) -> Result<Vec<u8>, Self::Error> {
            self.interrupt_replies.pop_front().ok_or(FakeTransportError::QueueExhausted)
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

    impl ControlHandshake for FakeTransport {
        type Error = FakeTransportError;

        fn control_read(
            &mut self,
            _request_type_vendor: bool,
            _request: u8,
            _value: u16,
            _index: u16,
            length: u16,
        ) -> Result<Vec<u8>, Self::Error> {
            Ok(vec![0u8; length as usize])
        }
    }

    #[test]
    fn records_writes_and_replays_replies_in_order() {
        let mut t = FakeTransport::new();
        t.push_bulk_reply(vec![1, 2, 3]);
        t.push_bulk_reply(vec![4, 5, 6]);

        super::command_round_trip(&mut t, 0x01, 0x81, &[0xAA], std::time::Duration::from_millis(1), std::time::Duration::from_millis(1), 64).unwrap();
        let second = super::command_round_trip(&mut t, 0x01, 0x81, &[0xBB], std::time::Duration::from_millis(1), std::time::Duration::from_millis(1), 64).unwrap();

        assert_eq!(t.writes, vec![vec![0xAA], vec![0xBB]]);
        assert_eq!(second, vec![4, 5, 6]);
    }

    #[test]
    fn exhausted_queue_yields_error() {
        let mut t = FakeTransport::new();
        let err = super::command_round_trip(&mut t, 0x01, 0x81, &[0xAA], std::time::Duration::from_millis(1), std::time::Duration::from_millis(1), 64);
        assert!(err.is_err());
    }
}

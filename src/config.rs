//! Protocol and device constants.
//!
//! No external configuration layer exists: every tunable here is a compile
//! time constant, the same way `spi-memory` hard-codes opcodes and sizes as
//! plain `u8` values in `series25.rs` rather than reading them from a file.

use std::time::Duration;

/// USB vendor ID for the Egis Technology (LighTuning) sensor family.
pub const VENDOR_ID: u16 = 0x1c7a;
/// USB product ID for this sensor family.
pub const PRODUCT_ID: u16 = 0x0582;

/// The interface claimed during `open`.
pub const USB_INTERFACE: u8 = 0;
pub const USB_ALT_SETTING: u8 = 0;

/// Bulk-OUT endpoint carrying composed commands.
pub const EP_CMD_OUT: u8 = 0x01;
/// Bulk-IN endpoint carrying command replies.
pub const EP_CMD_IN: u8 = 0x81;
/// Interrupt-IN endpoint signalling finger presence.
pub const EP_INTERRUPT_IN: u8 = 0x82;

/// Fixed-size buffer used for bulk-IN command replies.
pub const USB_IN_RECV_LENGTH: usize = 1024;
/// The device always returns one byte fewer than requested on this endpoint;
/// the transfer engine must not treat that as an error.
pub const USB_INTERRUPT_IN_RECV_LENGTH: usize = 1;

pub const USB_SEND_TIMEOUT: Duration = Duration::from_millis(2000);
pub const USB_RECV_TIMEOUT: Duration = Duration::from_millis(2000);
pub const USB_CONTROL_TIMEOUT: Duration = Duration::from_millis(2000);
/// Long timeout: this transfer only completes once a finger touches the
/// sensor.
pub const USB_INTERRUPT_TIMEOUT: Duration = Duration::from_secs(15);

/// 32 bytes, the fixed size of a `PrintId`.
pub const FINGERPRINT_DATA_SIZE: usize = 32;

/// Maximum number of templates the device is believed to support.
pub const MAX_ENROLL_NUM: usize = 10;

/// Hard upper bound above which the size-byte encoding silently saturates.
pub const MAX_REGISTRY_SIZE: usize = 14;

/// Number of successful partial captures required to commit an enrollment.
pub const ENROLL_TIMES: usize = 3;

/// Offset into an identify/verify "check" reply at which the matched
/// print's 32-byte ID begins.
pub const IDENTIFY_RESPONSE_PRINT_ID_OFFSET: usize = 46;

/// Length of the device-prepended read header on every inbound frame.
pub const READ_PREFIX_LEN: usize = 6;

/// Length of the check-byte field.
pub const CHECK_BYTES_LENGTH: usize = 2;

/// Separator of zero bytes between the check-body size fields and the
/// sentinel/ID payload.
pub const CMD_CHECK_SEPARATOR_LENGTH: usize = 32;

/// The human-readable "full name" reported by the open/device-lifecycle
/// layer.
pub const DRIVER_FULLNAME: &str = "Egis Technology (LighTuning) Match-On-Chip";

//! Literal byte markers that make up outbound command bodies and classify
//! inbound replies.
//!
//! These are opaque constants defined by the device; a real driver copies
//! them verbatim from a USB capture against physical hardware (see
//! `egismoc.c`'s `egismoc.h`, which was not available to this port). The
//! values below preserve the lengths and structural role each marker plays
//! in the protocol (documented inline) but are placeholders pending a real
//! capture — see DESIGN.md "Open Questions".

/// Write-prefix prepended to every outbound frame: magic `"EGIS"` followed
/// by `00 00 00 01`.
pub const WRITE_PREFIX: [u8; 8] = [b'E', b'G', b'I', b'S', 0x00, 0x00, 0x00, 0x01];

// ---- Outbound command bodies --------------------------------------------

pub const CMD_FW_VERSION: [u8; 2] = [0x00, 0xd3];
pub const CMD_SENSOR_RESET: [u8; 2] = [0x00, 0x14];
pub const CMD_SENSOR_ENROLL: [u8; 2] = [0x00, 0x2e];
pub const CMD_SENSOR_IDENTIFY: [u8; 2] = [0x00, 0x2f];
pub const CMD_SENSOR_CHECK: [u8; 2] = [0x00, 0x31];
pub const CMD_SENSOR_START_CAPTURE: [u8; 2] = [0x00, 0x60];
pub const CMD_READ_CAPTURE: [u8; 2] = [0x00, 0x61];
pub const CMD_ENROLL_STARTING: [u8; 2] = [0x00, 0x65];
pub const CMD_COMMIT_STARTING: [u8; 2] = [0x00, 0x6e];
/// Prefix prepended to the 32-byte new `PrintId` when committing an
/// enrollment.
pub const CMD_NEW_PRINT_PREFIX: [u8; 2] = [0x00, 0x6f];
pub const CMD_LIST: [u8; 2] = [0x00, 0x23];

/// Prefix used inside `BuildDeleteBody`.
pub const CMD_DELETE_PREFIX: [u8; 2] = [0x00, 0x44];
/// Prefix used inside `BuildCheckBody`.
pub const CMD_CHECK_PREFIX: [u8; 2] = [0x00, 0x35];
/// Suffix appended after the `BuildCheckBody` ID list.
pub const CMD_CHECK_SUFFIX: [u8; 2] = [0xff, 0xff];

// ---- Inbound response markers --------------------------------------------

pub const RSP_DELETE_SUCCESS_PREFIX: [u8; 2] = [0x01, 0x00];

pub const RSP_READ_SUCCESS_PREFIX: [u8; 2] = [0x02, 0x00];
pub const RSP_READ_SUCCESS_SUFFIX: [u8; 2] = [0x00, 0x00];

pub const RSP_READ_OFFCENTER_PREFIX: [u8; 2] = [0x02, 0x0c];
pub const RSP_READ_OFFCENTER_SUFFIX: [u8; 2] = [0x00, 0x0c];

pub const RSP_READ_DIRTY_PREFIX: [u8; 2] = [0x02, 0x0e];

pub const RSP_CHECK_NOT_YET_ENROLLED_PREFIX: [u8; 2] = [0x03, 0x00];

pub const RSP_IDENTIFY_MATCH_PREFIX: [u8; 2] = [0x03, 0x01];
pub const RSP_IDENTIFY_MATCH_SUFFIX: [u8; 2] = [0x00, 0x01];

pub const RSP_IDENTIFY_NOTMATCH_PREFIX: [u8; 2] = [0x03, 0x02];

pub const RSP_FW_VERSION_SUFFIX: [u8; 2] = [0x0a, 0x0d];

//! The wire frame codec: composing an outbound `Command` and
//! classifying an inbound `ResponseBuffer` by its literal markers.
//!
//! Kept pure and allocation-light, the way `Identification` decoding in
//! `spi-memory`'s `series25.rs` is a small free function operating directly
//! on byte slices rather than a stateful object.

use crate::config::{CHECK_BYTES_LENGTH, READ_PREFIX_LEN};
use crate::markers::WRITE_PREFIX;

/// Computes the two check bytes for `buffer`, which must already contain
/// the full frame (write prefix + zeroed check-byte slots + body).
///
/// Despite an informal description as a "big-endian sum of 16-bit words",
/// the device reads (and expects) each word little-endian. We pin that
/// observed convention here rather than the prose.
fn check_bytes(buffer: &[u8]) -> [u8; CHECK_BYTES_LENGTH] {
    let mut sum: u32 = 0;
    let mut iter = buffer.chunks(2);
    for chunk in &mut iter {
        let lo = chunk[0] as u32;
        let hi = if chunk.len() == 2 { chunk[1] as u32 } else { 0 };
        sum += lo | (hi << 8);
    }
    let check: u16 = 0xFFFF_u32.wrapping_sub(sum % 0xFFFF) as u16;
    check.to_le_bytes()
}

/// Builds a fully framed `Command` from a command body.
pub fn compose(body: &[u8]) -> Vec<u8> {
    let total_len = WRITE_PREFIX.len() + CHECK_BYTES_LENGTH + body.len();
    let mut buffer = Vec::with_capacity(total_len);
    buffer.extend_from_slice(&WRITE_PREFIX);
    buffer.extend_from_slice(&[0u8; CHECK_BYTES_LENGTH]);
    buffer.extend_from_slice(body);

    let check = check_bytes(&buffer);
    let check_offset = WRITE_PREFIX.len();
    buffer[check_offset..check_offset + CHECK_BYTES_LENGTH].copy_from_slice(&check);
    buffer
}

/// Recomputes the word-sum over a fully composed frame (check bytes
/// included). A valid frame sums to zero mod 0xFFFF.
pub fn validate_checksum(frame: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    for chunk in frame.chunks(2) {
        let lo = chunk[0] as u32;
        let hi = if chunk.len() == 2 { chunk[1] as u32 } else { 0 };
        sum += lo | (hi << 8);
    }
    (sum % 0xFFFF) as u16
}

/// True iff `reply`'s bytes at the fixed prefix offset (read prefix + check
/// bytes) equal `marker`.
pub fn validate_prefix(reply: &[u8], marker: &[u8]) -> bool {
    let offset = READ_PREFIX_LEN + CHECK_BYTES_LENGTH;
    reply.len() >= offset + marker.len() && &reply[offset..offset + marker.len()] == marker
}

/// True iff `reply`'s trailing bytes equal `marker`.
pub fn validate_suffix(reply: &[u8], marker: &[u8]) -> bool {
    reply.len() >= marker.len() && &reply[reply.len() - marker.len()..] == marker
}

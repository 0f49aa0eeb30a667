//! Variable-body command construction: the `check` and
//! `delete` payloads, whose size and content depend on the current
//! enrollment set.

use crate::config::{CMD_CHECK_SEPARATOR_LENGTH, MAX_REGISTRY_SIZE};
use crate::markers::{CMD_CHECK_PREFIX, CMD_CHECK_SUFFIX, CMD_DELETE_PREFIX};
use crate::print::PrintId;

/// Encodes a size field as one byte if it fits, otherwise as `0x01`
/// followed by the low byte. Both `S1` and `S2` fields in both command
/// bodies follow this same rule; only the threshold at which `full_value`
/// crosses 0x100 differs between them, since it falls out of the formula
/// rather than being hard-coded.
fn encode_size_field(full_value: u32) -> Vec<u8> {
    if full_value <= 0xFF {
        vec![full_value as u8]
    } else {
        vec![(full_value >> 8) as u8, (full_value & 0xFF) as u8]
    }
}

/// Builds the variable-size "check" command body, used by both enroll
/// (duplicate detection) and identify/verify.
///
/// Panics if `registry` exceeds `MAX_REGISTRY_SIZE`.
pub fn build_check_body(registry: &[PrintId]) -> Vec<u8> {
    assert!(
        registry.len() <= MAX_REGISTRY_SIZE,
        "check body registry size {} exceeds the protocol's {}-entry limit",
        registry.len(),
        MAX_REGISTRY_SIZE
    );
    let n = registry.len() as u32;

    let mut body = Vec::new();
    body.extend_from_slice(&[0x00, 0x00]);
    body.extend(encode_size_field((n + 1) * 0x20 + 0x09));
    body.extend_from_slice(&CMD_CHECK_PREFIX);
    body.extend(encode_size_field((n + 1) * 0x20));
    body.extend_from_slice(&[0u8; CMD_CHECK_SEPARATOR_LENGTH]);
    for id in registry {
        body.extend_from_slice(id.as_bytes());
    }
    body.extend_from_slice(&CMD_CHECK_SUFFIX);
    body
}

/// Builds the variable-size "delete" command body. `targets` is either a
/// single print's `PrintId` (delete) or the full registry (clear-all); the
/// caller decides which.
///
/// Panics if `targets` exceeds `MAX_REGISTRY_SIZE` (see `build_check_body`).
pub fn build_delete_body(targets: &[PrintId]) -> Vec<u8> {
    assert!(
        targets.len() <= MAX_REGISTRY_SIZE,
        "delete body target count {} exceeds the protocol's {}-entry limit",
        targets.len(),
        MAX_REGISTRY_SIZE
    );
    let k = targets.len() as u32;

    let mut body = Vec::new();
    body.extend_from_slice(&[0x00, 0x00]);
    body.extend(encode_size_field(k * 0x20 + 0x07));
    body.extend_from_slice(&CMD_DELETE_PREFIX);
    body.extend(encode_size_field(k * 0x20));
    for id in targets {
        body.extend_from_slice(id.as_bytes());
    }
    body
}

//! The enrolled-ID registry: a host-side cache of the device's currently
//! enrolled `PrintId`s.

use crate::print::PrintId;

/// An ordered snapshot of the device's enrolled `PrintId`s. Not authoritative
/// — the device is, and this is rebuilt from a `list` reply at the start of
/// every operation that needs it.
#[derive(Debug, Clone, Default)]
pub struct EnrolledRegistry {
    ids: Vec<PrintId>,
}

impl EnrolledRegistry {
    pub fn empty() -> Self {
        EnrolledRegistry { ids: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[PrintId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrintId> {
        self.ids.iter()
    }
}

/// The framing header length a `list` reply always carries.
const LIST_FRAMING_LEN: usize = 16;
/// The effective ID payload begins two bytes into that framing block
/// — an artifact of the device's reply layout, not a typo.
const LIST_ID_PAYLOAD_OFFSET: usize = 14;

/// Parses a `list` command reply into an `EnrolledRegistry`.
pub fn parse_list_reply(reply: &[u8]) -> EnrolledRegistry {
    use crate::config::FINGERPRINT_DATA_SIZE;

    if reply.len() < LIST_FRAMING_LEN + FINGERPRINT_DATA_SIZE {
        return EnrolledRegistry::empty();
    }

    let n = (reply.len() - LIST_FRAMING_LEN) / FINGERPRINT_DATA_SIZE;
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let start = LIST_ID_PAYLOAD_OFFSET + i * FINGERPRINT_DATA_SIZE;
        let end = start + FINGERPRINT_DATA_SIZE;
        if end > reply.len() {
            break;
        }
        ids.push(PrintId::from_bytes(&reply[start..end]));
    }

    EnrolledRegistry { ids }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FINGERPRINT_DATA_SIZE;

    fn synth_list_reply(ids: &[PrintId]) -> Vec<u8> {
        let mut reply = vec![0u8; LIST_ID_PAYLOAD_OFFSET];
        for id in ids {
            reply.extend_from_slice(id.as_bytes());
        }
        // pad to account for LIST_FRAMING_LEN vs LIST_ID_PAYLOAD_OFFSET skew
        reply.extend_from_slice(&[0u8; LIST_FRAMING_LEN - LIST_ID_PAYLOAD_OFFSET]);
        reply
    }

    #[test]
    fn short_reply_yields_empty_registry() {
        let reply = vec![0u8; 15];
        let registry = parse_list_reply(&reply);
        assert!(registry.is_empty());
    }

    #[test]
    fn exact_boundary_reply_yields_empty_registry() {
        // 16 + 32 - 1 is still below the threshold.
        let reply = vec![0u8; LIST_FRAMING_LEN + FINGERPRINT_DATA_SIZE - 1];
        assert!(parse_list_reply(&reply).is_empty());
    }

    #[test]
    fn parses_n_ids_in_order() {
        let ids: Vec<PrintId> = (0..3u8)
            .map(|i| PrintId::from_bytes(&[i; FINGERPRINT_DATA_SIZE]))
            .collect();
        let reply = synth_list_reply(&ids);
        let registry = parse_list_reply(&reply);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.ids(), ids.as_slice());
    }

    #[test]
    fn round_trips_through_delete_body_ordering() {
        use crate::command::build_delete_body;

        let ids: Vec<PrintId> = (0..5u8)
            .map(|i| PrintId::from_bytes(&[i; FINGERPRINT_DATA_SIZE]))
            .collect();
        let reply = synth_list_reply(&ids);
        let registry = parse_list_reply(&reply);

        let body = build_delete_body(registry.ids());
        let expected: Vec<u8> = ids.iter().flat_map(|id| id.as_bytes().to_vec()).collect();
        assert!(body.ends_with(&expected));
    }
}

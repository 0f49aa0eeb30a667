//! The `clear-storage` operation: refresh, delete the entire registry, then
//! refresh again and verify the device reports zero enrolled prints.

use crate::command::build_delete_body;
use crate::error::DriverError;
use crate::markers::RSP_DELETE_SUCCESS_PREFIX;
use crate::transport::UsbTransport;

/// Clears every enrolled print. Fails with `DataNotFound` if the registry is
/// already empty, without sending any delete command; fails with a protocol
/// error if the post-clear refresh still reports enrolled prints.
pub fn clear_storage<T: UsbTransport>(transport: &mut T) -> Result<(), DriverError<T::Error>> {
    let registry = super::list::refresh_registry(transport)?;
    if registry.is_empty() {
        return Err(DriverError::DataNotFound);
    }

    let body = build_delete_body(registry.ids());
    let frame = crate::frame::compose(&body);
    let reply = super::exchange(transport, &frame)?;
    super::expect_prefix::<T>(&reply, &RSP_DELETE_SUCCESS_PREFIX)?;

    let post = super::list::refresh_registry(transport)?;
    if !post.is_empty() {
        return Err(DriverError::protocol("registry still non-empty after clear-storage"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FINGERPRINT_DATA_SIZE;
    use crate::print::PrintId;
    use crate::transport::fake::FakeTransport;

    fn synth_list_reply(ids: &[PrintId]) -> Vec<u8> {
        let mut reply = vec![0u8; 14];
        for id in ids {
            reply.extend_from_slice(id.as_bytes());
        }
        reply.extend_from_slice(&[0u8; 2]);
        reply
    }

    fn success_reply() -> Vec<u8> {
        let mut full = vec![0u8; 8];
        full.extend_from_slice(&RSP_DELETE_SUCCESS_PREFIX);
        full
    }

    #[test]
    fn clear_storage_on_empty_registry_fails_with_data_not_found() {
        let mut t = FakeTransport::new();
        t.push_bulk_reply(vec![0u8; 10]);
        assert!(matches!(clear_storage(&mut t), Err(DriverError::DataNotFound)));
    }

    #[test]
    fn clear_storage_succeeds_when_post_refresh_is_empty() {
        let ids: Vec<PrintId> = (0..2u8)
            .map(|i| PrintId::from_bytes(&[i; FINGERPRINT_DATA_SIZE]))
            .collect();

        let mut t = FakeTransport::new();
        t.push_bulk_reply(synth_list_reply(&ids));
        t.push_bulk_reply(success_reply());
        t.push_bulk_reply(vec![0u8; 10]);

        assert!(clear_storage(&mut t).is_ok());
    }

    #[test]
    fn clear_storage_fails_if_post_refresh_still_has_entries() {
        let ids: Vec<PrintId> = (0..2u8)
            .map(|i| PrintId::from_bytes(&[i; FINGERPRINT_DATA_SIZE]))
            .collect();

        let mut t = FakeTransport::new();
        t.push_bulk_reply(synth_list_reply(&ids));
        t.push_bulk_reply(success_reply());
        t.push_bulk_reply(synth_list_reply(&ids));

        assert!(matches!(clear_storage(&mut t), Err(DriverError::Protocol(_))));
    }
}

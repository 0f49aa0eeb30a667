//! The `list` operation: refresh the registry and
//! materialize `Print`s from it.

use crate::error::DriverError;
use crate::markers::CMD_LIST;
use crate::print::{print_from_id, Print};
use crate::registry::{parse_list_reply, EnrolledRegistry};
use crate::transport::UsbTransport;

/// Sends the `list` command and parses the reply into an `EnrolledRegistry`.
/// Called at the start of every operation that needs the current enrollment
/// set, not only the public `list` operation itself.
pub fn refresh_registry<T: UsbTransport>(
    transport: &mut T,
) -> Result<EnrolledRegistry, DriverError<T::Error>> {
    let frame = crate::frame::compose(&CMD_LIST);
    let reply = super::exchange(transport, &frame)?;
    Ok(parse_list_reply(&reply))
}

/// Runs the public `list` operation: refresh, then materialize one `Print`
/// per enrolled `PrintId`.
pub fn list<T: UsbTransport>(transport: &mut T) -> Result<Vec<Print>, DriverError<T::Error>> {
    let registry = refresh_registry(transport)?;
    Ok(registry.iter().copied().map(print_from_id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FINGERPRINT_DATA_SIZE;
    use crate::print::PrintId;
    use crate::transport::fake::FakeTransport;

    fn synth_list_reply(ids: &[PrintId]) -> Vec<u8> {
        const OFFSET: usize = 14;
        const FRAMING: usize = 16;
        let mut reply = vec![0u8; OFFSET];
        for id in ids {
            reply.extend_from_slice(id.as_bytes());
        }
        reply.extend_from_slice(&[0u8; FRAMING - OFFSET]);
        reply
    }

    #[test]
    fn list_materializes_one_print_per_id() {
        let ids: Vec<PrintId> = (0..2u8)
            .map(|i| PrintId::from_bytes(&[i; FINGERPRINT_DATA_SIZE]))
            .collect();
        let mut t = FakeTransport::new();
        t.push_bulk_reply(synth_list_reply(&ids));

        let prints = list(&mut t).unwrap();
        assert_eq!(prints.len(), 2);
    }

    #[test]
    fn list_on_empty_registry_yields_empty_vec() {
        let mut t = FakeTransport::new();
        t.push_bulk_reply(vec![0u8; 10]);
        assert!(list(&mut t).unwrap().is_empty());
    }
}

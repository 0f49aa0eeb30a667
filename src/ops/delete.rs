//! The `delete` operation: refresh, build a single-target delete body, send,
//! and expect the delete-success marker.

use crate::command::build_delete_body;
use crate::error::DriverError;
use crate::markers::RSP_DELETE_SUCCESS_PREFIX;
use crate::print::{print_id_from_print, Print};
use crate::transport::UsbTransport;

/// Deletes a single enrolled print. The registry
/// refresh is performed for symmetry with the other operations but its
/// result isn't otherwise consulted here — deletion targets a specific
/// `PrintId`, not a count.
pub fn delete<T: UsbTransport>(
    transport: &mut T,
    target: &Print,
) -> Result<(), DriverError<T::Error>> {
    super::list::refresh_registry(transport)?;

    let id = print_id_from_print(target)?;
    let body = build_delete_body(std::slice::from_ref(&id));
    let frame = crate::frame::compose(&body);
    let reply = super::exchange(transport, &frame)?;

    super::expect_prefix::<T>(&reply, &RSP_DELETE_SUCCESS_PREFIX)
}

//! `Print` / `PrintId` marshaling.
//!
//! `Print` here is a local stand-in for the generic fingerprint framework's
//! print object; it carries exactly the three attributes this driver reads
//! or writes.

use std::fmt;

use crate::config::FINGERPRINT_DATA_SIZE;
use crate::error::DriverError;

/// Opaque 32-byte identifier assigned at enroll time and stored on the
/// device.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrintId(pub [u8; FINGERPRINT_DATA_SIZE]);

impl PrintId {
    /// Builds a `PrintId` from a byte slice, zero-padding if shorter than
    /// 32 bytes and truncating if longer.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buf = [0u8; FINGERPRINT_DATA_SIZE];
        let n = bytes.len().min(FINGERPRINT_DATA_SIZE);
        buf[..n].copy_from_slice(&bytes[..n]);
        PrintId(buf)
    }

    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_DATA_SIZE] {
        &self.0
    }

    /// True if this identifier was assigned by this (or any libfprint-style)
    /// host driver, rather than by other enrollment software.
    pub fn looks_host_originated(&self) -> bool {
        self.0.starts_with(b"FP")
    }
}

impl fmt::Debug for PrintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrintId({})", hex::encode(self.0))
    }
}

/// The shape `fpi_data` is expected to decode to: a tagged wrapper carrying
/// one fixed-size 32-byte array.
#[derive(Debug, Clone)]
pub enum FpiData {
    PrintId(PrintId),
    /// Anything that doesn't match the expected tagged-array shape.
    Other(Vec<u8>),
}

/// How this print came to exist, mirroring the framework's type/origin
/// attributes set during marshaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintType {
    Raw,
}

/// The framework's fingerprint record.
#[derive(Debug, Clone)]
pub struct Print {
    pub description: String,
    pub user_id: Vec<u8>,
    pub fpi_data: FpiData,
    pub print_type: PrintType,
    pub device_stored: bool,
}

impl PartialEq for Print {
    /// Two prints are equal iff they reference the same on-device
    /// `PrintId`, matching how `egismoc_set_print_data` compares prints
    /// during gallery lookups in identify.
    fn eq(&self, other: &Self) -> bool {
        match (&self.fpi_data, &other.fpi_data) {
            (FpiData::PrintId(a), FpiData::PrintId(b)) => a == b,
            _ => false,
        }
    }
}

const UNKNOWN_DESCRIPTION_PREFIX: &str = "Unknown (not created by libfprint) ";

/// Builds a `Print` from a `PrintId` read off the device.
pub fn print_from_id(id: PrintId) -> Print {
    let user_id = id.0.to_vec();
    let description = if id.looks_host_originated() {
        String::from_utf8_lossy(&user_id).into_owned()
    } else {
        format!("{}{}", UNKNOWN_DESCRIPTION_PREFIX, hex::encode(&id.0[..4]))
    };

    Print {
        description,
        user_id,
        fpi_data: FpiData::PrintId(id),
        print_type: PrintType::Raw,
        device_stored: true,
    }
}

/// Extracts the `PrintId` backing a `Print`'s `fpi_data`. Fails with
/// `DataInvalid` if the tagged-array shape doesn't hold.
pub fn print_id_from_print<T: std::error::Error + 'static>(
    print: &Print,
) -> Result<PrintId, DriverError<T>> {
    match &print.fpi_data {
        FpiData::PrintId(id) => Ok(*id),
        FpiData::Other(_) => Err(DriverError::DataInvalid),
    }
}

/// Builds the `PrintId` for a newly enrolled print, using a host-supplied
/// user-id generator the way `egismoc.c` invokes the framework's
/// `fpi_print_generate_user_id` hook.
pub fn new_enrolled_print_id(generated_user_id: &[u8]) -> PrintId {
    PrintId::from_bytes(generated_user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_originated_description_is_the_user_id_itself() {
        let mut raw = [0u8; FINGERPRINT_DATA_SIZE];
        raw[..2].copy_from_slice(b"FP");
        raw[2..10].copy_from_slice(b"abcdefgh");
        let print = print_from_id(PrintId(raw));
        assert!(print.description.starts_with("FP"));
    }

    #[test]
    fn foreign_id_gets_fallback_description_with_hex_prefix() {
        let raw = [0xAB, 0xCD, 0xEF, 0x01, 0u8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let print = print_from_id(PrintId(raw));
        assert_eq!(print.description, "Unknown (not created by libfprint) abcdef01");
    }

    #[test]
    fn from_bytes_zero_pads_short_input() {
        let id = PrintId::from_bytes(b"FP123");
        assert_eq!(&id.0[..5], b"FP123");
        assert!(id.0[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn print_id_from_print_round_trips() {
        let id = PrintId::from_bytes(b"FPabc");
        let print = print_from_id(id);
        let extracted = print_id_from_print::<std::io::Error>(&print).unwrap();
        assert_eq!(extracted, id);
    }

    #[test]
    fn print_id_from_print_rejects_invalid_shape() {
        let print = Print {
            description: "bogus".into(),
            user_id: vec![],
            fpi_data: FpiData::Other(vec![1, 2, 3]),
            print_type: PrintType::Raw,
            device_stored: false,
        };
        assert!(print_id_from_print::<std::io::Error>(&print).is_err());
    }
}

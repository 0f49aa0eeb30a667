//! Error taxonomy surfaced to the fingerprint framework.

use thiserror::Error;

/// The soft-failure reasons a capture stage can report without terminating
/// the enrollment operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryKind {
    /// The device reported the finger was off-center.
    CenterFinger,
    /// The device reported a dirty sensor, or an unclassified capture
    /// failure that `egismoc.c` also treats as "remove and retry".
    RemoveFinger,
    /// No further detail is available.
    Generic,
}

/// The error type returned by every fallible operation in this crate.
///
/// `T` is the transport error type, generic the same way `spi-memory`'s
/// `Error<E, GPIO>` is generic over the SPI and GPIO error types rather than
/// hard-coding a single bus implementation.
#[derive(Debug, Error)]
pub enum DriverError<T: std::error::Error + 'static> {
    /// A transport-level failure: a short write, a truncated read below the
    /// read-prefix length, or a USB stack error bubbling up unchanged.
    #[error("general device error: {0}")]
    General(String),

    /// The underlying transport returned an error.
    #[error("transport error: {0}")]
    Transport(#[from] T),

    /// A reply's markers did not match any known classification, or a
    /// post-clear-storage registry refresh found leftover templates.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A `Print`'s `fpi_data` did not decode to the expected tagged
    /// 32-byte-array shape.
    #[error("print data is invalid")]
    DataInvalid,

    /// An enroll-check reply indicated the finger is already enrolled.
    #[error("fingerprint is already enrolled")]
    DataDuplicate,

    /// Enroll was attempted with the registry already at its maximum.
    #[error("no space left to enroll a new fingerprint")]
    DataFull,

    /// Identify, verify or clear-storage was invoked with an empty registry.
    #[error("no fingerprints are enrolled")]
    DataNotFound,

    /// A capture stage soft-failed; the stage counter is not advanced and
    /// the caller should prompt the user to retry.
    #[error("retry: {0:?}")]
    Retry(RetryKind),

    /// The finger-presence wait (or any in-flight transfer) was cancelled.
    #[error("operation was cancelled")]
    Cancelled,
}

impl<T: std::error::Error + 'static> DriverError<T> {
    pub fn general(msg: impl Into<String>) -> Self {
        DriverError::General(msg.into())
    }

    pub fn protocol(msg: impl Into<String>) -> Self {
        DriverError::Protocol(msg.into())
    }

    /// True for the per-stage soft failures that do not terminate the
    /// owning operation.
    pub fn is_retry(&self) -> bool {
        matches!(self, DriverError::Retry(_))
    }
}

pub type Result<T, E> = core::result::Result<T, DriverError<E>>;

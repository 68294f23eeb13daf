//! [`Database`]-related implementations.

#[cfg(feature = "memory")]
pub mod memory;

use derive_more::{Display, Error as StdError};

#[cfg(feature = "memory")]
pub use self::memory::Memory;

/// Database operation.
///
/// Implementations only store and hand out whole records: no filtering,
/// ordering or pagination happens on this side.
pub use common::Handler as Database;

/// [`Database`] error.
///
/// Reports a failure of the storage backend itself. An operation affecting
/// no records is not an error, and is reported via its result instead.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Storage backend is not available.
    #[display("Storage backend is unavailable: {_0}")]
    Unavailable(#[error(not(source))] String),
}

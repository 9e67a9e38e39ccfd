//! Failures raised by local storage adapters.

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential and report storage adapters.
    pub enum StorageError {
        /// The storage location could not be opened or created.
        Unavailable { message: String } => Unavailable, "storage unavailable: {message}",
        /// Reading or writing failed.
        Io { message: String } => InternalError, "storage I/O failed: {message}",
    }
}

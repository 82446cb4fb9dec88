use thiserror::Error;

/// Errors that can be caused while using `PairingHeap`.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Caused when using a handle whose element has already been popped.
    #[error("no live node found for the given handle")]
    InvalidHandle,

    /// Caused when using `update_elt` with a new value that is not strictly
    /// more extreme than the current one.
    #[error("new value is not more extreme than the current one")]
    NotMoreExtreme,
}

/// Generic `Result` type for `PairingHeap` methods.
pub type Result<T> = ::std::result::Result<T, Error>;

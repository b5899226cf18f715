use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    #[cfg(feature = "firmware")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    #[display("Index out of bounds")]
    IndexOutOfBounds,

    #[display("Error setting output state")]
    CannotSetOutputState,

    #[display("Error reading input state")]
    CannotReadInput,

    #[display("Tick period must divide one minute into 1 to 255 ticks")]
    InvalidTickPeriod,

    #[display("Edit repeat interval must be at least one sample")]
    InvalidEditRepeat,

    #[display("Time of day out of range")]
    TimeOutOfRange,
}

#[cfg(feature = "firmware")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}

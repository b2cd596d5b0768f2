use core::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// A stored row does not describe a valid question.
    Corrupted,
    /// Unrecoverable error from the storage backend.
    Fatal,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Corrupted => "A stored question could not be decoded.",
            Self::Fatal => "We encountered an unexpected database error on our end.",
        })
    }
}

impl From<tokio_postgres::Error> for Error {
    fn from(err: tokio_postgres::Error) -> Self {
        log::error!("database error: {err}");
        Self::Fatal
    }
}

pub type Result<T> = core::result::Result<T, Error>;

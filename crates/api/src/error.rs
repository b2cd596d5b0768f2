use core::fmt::{self, Display};
use hyper::StatusCode;
use model::Rejection;

#[derive(Debug)]
pub enum Error {
    /// The request body is not the JSON we expected.
    MalformedBody,
    /// A path segment is not valid percent-encoded UTF-8.
    MalformedPath,
    /// The candidate question failed validation.
    Rejected(Rejection),
    InvalidIdentifier,
    QuestionNotFound,
    MissingFile,
    NotFound,
    MethodNotAllowed,
    /// The store failed us. Never the client's fault.
    Storage(db::error::Error),
    Fatal,
}

impl Error {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MalformedBody | Self::MalformedPath | Self::Rejected(_) | Self::InvalidIdentifier => {
                StatusCode::BAD_REQUEST
            }
            Self::QuestionNotFound | Self::MissingFile | Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Storage(_) | Self::Fatal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Rejection> for Error {
    fn from(reason: Rejection) -> Self {
        Self::Rejected(reason)
    }
}

impl From<db::error::Error> for Error {
    fn from(err: db::error::Error) -> Self {
        Self::Storage(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MalformedBody => "Invalid request body.",
            Self::MalformedPath => "Invalid request path.",
            Self::Rejected(reason) => return reason.fmt(f),
            Self::InvalidIdentifier => "Invalid question ID.",
            Self::QuestionNotFound => "Question not found.",
            Self::MissingFile => "File not found.",
            Self::NotFound => "Resource not found.",
            Self::MethodNotAllowed => "Method not allowed.",
            Self::Storage(err) => return err.fmt(f),
            Self::Fatal => "Oops! We have encountered an unrecoverable error on our end.",
        })
    }
}

pub type Result<T> = core::result::Result<T, Error>;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not detect compression: {0}")]
    Decompress(String),

    #[error("malformed record on line {line}: expected at least {expected} tab-delimited fields, found {found}")]
    MalformedRecord {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("INFO field '{key}' of record {record} is not declared in the header")]
    UnknownInfoField { key: String, record: String },

    #[error("record {record} has {names} FORMAT names but {values} ENCODING values")]
    EncodingLengthMismatch {
        record: String,
        names: usize,
        values: usize,
    },

    #[error("cannot join {table} table with {found} rows onto {expected} rows")]
    RowCountMismatch {
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("tabular I/O error: {0}")]
    Csv(csv::Error),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(err) => Error::Io(err),
                // is_io_error() guarantees the Io kind
                _ => unreachable!(),
            }
        } else {
            Error::Csv(err)
        }
    }
}

impl From<niffler::Error> for Error {
    fn from(err: niffler::Error) -> Self {
        match err {
            niffler::Error::IOError(err) => Error::Io(err),
            other => Error::Decompress(other.to_string()),
        }
    }
}

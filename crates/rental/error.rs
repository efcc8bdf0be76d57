use thiserror::Error;

#[derive(Error, Debug)]
pub enum RentalError {
    #[error("parse error at line {line}, column `{column}`: {message}")]
    Parse {
        line: u64,
        column: String,
        message: String,
    },

    #[error("dataset is empty, no date bounds available")]
    EmptyDataset,

    #[error("unknown weekday value {0}, expected 0-6")]
    UnknownWeekday(i64),

    #[error("total of `{0}` does not fit in 64 bits")]
    Overflow(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl RentalError {
    pub fn parse(line: u64, column: &str, message: impl Into<String>) -> Self {
        RentalError::Parse {
            line,
            column: column.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RentalError>;

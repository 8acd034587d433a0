use thiserror::Error;

/// Result type for customernexus operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for customernexus operations
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// CSV reading errors, tagged with the file and 1-based line
    #[error("CSV error in {file} at line {line}: {message}")]
    Csv {
        file: String,
        line: u64,
        message: String,
    },

    /// Field normalization errors (identifiers, datetimes)
    #[error("Parse error for {field} value '{value}': {message}")]
    Parse {
        field: String,
        value: String,
        message: String,
    },

    /// Address lookup errors
    #[error("Geocoding error: {0}")]
    Geocoding(String),

    /// Node/relationship table assembly errors
    #[error("Staging error: {0}")]
    Staging(String),

    /// Graph engine errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Analytical query errors
    #[error("Query error: {0}")]
    Query(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a CSV error
    pub fn csv(file: impl Into<String>, line: u64, message: impl Into<String>) -> Self {
        Self::Csv {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Creates a parse error
    pub fn parse(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Creates a geocoding error
    pub fn geocoding(msg: impl Into<String>) -> Self {
        Self::Geocoding(msg.into())
    }

    /// Creates a staging error
    pub fn staging(msg: impl Into<String>) -> Self {
        Self::Staging(msg.into())
    }

    /// Creates a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Creates a query error
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_error_names_file_and_line() {
        let err = Error::csv("customers.csv", 7, "missing field `CIF`");
        assert_eq!(
            err.to_string(),
            "CSV error in customers.csv at line 7: missing field `CIF`"
        );
    }

    #[test]
    fn test_context_wraps_source() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let err = io.context("Failed to open transfers.csv").unwrap_err();
        assert!(err.to_string().starts_with("Failed to open transfers.csv"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

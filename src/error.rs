//! Error types for library operations.
//!
//! Every fallible operation in this crate returns [`Result`]. The menu
//! layer renders failures with [`LibraryError::user_message`] and keeps
//! looping; nothing here is fatal to the session.

use thiserror::Error;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Failure taxonomy for catalog and loan operations
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Empty or malformed user-supplied field
    #[error("invalid input for {field}: {message}")]
    InvalidInput { field: &'static str, message: String },

    /// Book id collision on add
    #[error("book '{book_id}' already exists")]
    DuplicateKey { book_id: String },

    /// Missing book or loan record
    #[error("no '{id}' record in {table}")]
    NotFound { table: &'static str, id: String },

    /// Student already holds an active loan
    #[error("{student} already has a book on loan")]
    AlreadyBorrowed { student: String },

    /// Stock exhausted
    #[error("no copies of '{book_id}' available")]
    NoCopiesAvailable { book_id: String },

    /// Store-level failure during a multi-statement update
    #[error("transaction failed: {message}")]
    TransactionFailed {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    /// Any other storage failure
    #[error("storage error")]
    Storage(#[from] rusqlite::Error),
}

impl LibraryError {
    /// Create a new invalid-input error
    pub fn invalid_input<M: Into<String>>(field: &'static str, message: M) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Create a new duplicate-key error
    pub fn duplicate_key<S: Into<String>>(book_id: S) -> Self {
        Self::DuplicateKey {
            book_id: book_id.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(table: &'static str, id: S) -> Self {
        Self::NotFound {
            table,
            id: id.into(),
        }
    }

    /// Create a new already-borrowed error
    pub fn already_borrowed<S: Into<String>>(student: S) -> Self {
        Self::AlreadyBorrowed {
            student: student.into(),
        }
    }

    /// Create a new no-copies error
    pub fn no_copies<S: Into<String>>(book_id: S) -> Self {
        Self::NoCopiesAvailable {
            book_id: book_id.into(),
        }
    }

    /// Create a new transaction error with its storage source
    pub fn transaction<M: Into<String>>(message: M, source: rusqlite::Error) -> Self {
        Self::TransactionFailed {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Get user-friendly error message for the menu boundary
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { field, message } => {
                format!("Invalid {field}: {message}")
            }
            Self::DuplicateKey { book_id } => {
                format!("Book ID '{book_id}' already exists. Try a different ID.")
            }
            Self::NotFound { table, id } => match *table {
                "books" => format!("Book ID '{id}' not found."),
                "borrowed" => "No matching borrowing record found for that student and Book ID."
                    .to_string(),
                _ => format!("'{id}' not found in {table}."),
            },
            Self::AlreadyBorrowed { student } => {
                format!("{student} has already borrowed a book. Must return first.")
            }
            Self::NoCopiesAvailable { .. } => "No copies available right now.".to_string(),
            Self::TransactionFailed { message, .. } => {
                format!("Transaction failed: {message}")
            }
            Self::Storage(err) => format!("Storage error: {err}"),
        }
    }
}

//! Catalog operations: add, list, and search books.

use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LibraryError, Result};
use crate::store::LibraryStore;

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub copies: i64,
}

impl Book {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            book_id: row.get(0)?,
            title: row.get(1)?,
            author: row.get(2)?,
            copies: row.get(3)?,
        })
    }
}

/// Book ids collide case-insensitively: "sql101" and "SQL101" are one key.
pub fn normalize_book_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

impl LibraryStore {
    /// Add a new book to the catalog.
    ///
    /// Fails with `InvalidInput` on an empty id or negative copy count and
    /// with `DuplicateKey` if the normalized id is already present.
    pub fn add_book(&self, id: &str, title: &str, author: &str, copies: i64) -> Result<Book> {
        let book_id = normalize_book_id(id);
        if book_id.is_empty() {
            return Err(LibraryError::invalid_input(
                "book id",
                "Book ID cannot be empty.",
            ));
        }
        if copies < 0 {
            return Err(LibraryError::invalid_input(
                "copies",
                "Copies must be non-negative.",
            ));
        }
        if self.find_book(&book_id)?.is_some() {
            return Err(LibraryError::duplicate_key(book_id));
        }

        let book = Book {
            book_id,
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            copies,
        };
        self.conn.execute(
            "INSERT INTO books (book_id, title, author, copies) VALUES (?1, ?2, ?3, ?4)",
            params![book.book_id, book.title, book.author, book.copies],
        )?;
        debug!("added book {}", book.book_id);
        Ok(book)
    }

    /// All books, ordered by id ascending. Empty is not an error.
    pub fn list_books(&self) -> Result<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare("SELECT book_id, title, author, copies FROM books ORDER BY book_id")?;
        let rows = stmt.query_map([], Book::from_row)?;
        let mut books = Vec::new();
        for row in rows {
            books.push(row?);
        }
        Ok(books)
    }

    /// Unified search: exact match on the uppercased id, or a
    /// case-insensitive substring match on the title. The result is the
    /// union of both predicates; a book satisfying both appears once.
    pub fn search_books(&self, term: &str) -> Result<Vec<Book>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(LibraryError::invalid_input(
                "search term",
                "Search term cannot be empty.",
            ));
        }

        let pattern = format!("%{term}%");
        let mut stmt = self.conn.prepare(
            "SELECT book_id, title, author, copies FROM books \
             WHERE book_id = ?1 OR title LIKE ?2 COLLATE NOCASE \
             ORDER BY book_id",
        )?;
        let rows = stmt.query_map(params![term.to_uppercase(), pattern], Book::from_row)?;
        let mut books = Vec::new();
        for row in rows {
            books.push(row?);
        }
        Ok(books)
    }

    /// Look up a single book by its already-normalized id
    pub(crate) fn find_book(&self, book_id: &str) -> Result<Option<Book>> {
        let book = self
            .conn
            .query_row(
                "SELECT book_id, title, author, copies FROM books WHERE book_id = ?1",
                [book_id],
                Book::from_row,
            )
            .optional()?;
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_id_normalization_uppercases_and_trims() {
        assert_eq!(normalize_book_id("  sql101 "), "SQL101");
        assert_eq!(normalize_book_id("DMBK001"), "DMBK001");
    }
}

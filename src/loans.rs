//! Loan operations: borrow, return, and the active-loan listing.
//!
//! Loan state is the presence or absence of a row in `borrowed`, keyed by
//! student name. Borrow and return each pair one copy-count update with
//! one loan-row change, committed atomically; a failed transaction rolls
//! back both statements.

use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{normalize_book_id, Book};
use crate::error::{LibraryError, Result};
use crate::store::LibraryStore;

/// An active borrowing relationship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub student: String,
    pub book_id: String,
}

/// A loan joined with its book's title, for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveLoan {
    pub student: String,
    pub book_id: String,
    pub title: String,
}

/// Student names collide case-insensitively: "john", "JOHN" and "John"
/// normalize to one key.
pub fn normalize_student(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for (i, word) in raw.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(char::to_lowercase));
        }
    }
    out
}

impl LibraryStore {
    /// Borrow one copy of a book for a student.
    ///
    /// Checks run in order: the book must exist, the student must hold no
    /// other loan, and at least one copy must be on the shelf. The
    /// copies-decrement and loan insert then commit together. Returns the
    /// loan and the book's post-borrow record.
    pub fn borrow_book(&mut self, student: &str, book_id: &str) -> Result<(Loan, Book)> {
        let student = normalize_student(student);
        let book_id = normalize_book_id(book_id);
        if student.is_empty() {
            return Err(LibraryError::invalid_input(
                "student name",
                "Student name cannot be empty.",
            ));
        }
        if book_id.is_empty() {
            return Err(LibraryError::invalid_input(
                "book id",
                "Book ID cannot be empty.",
            ));
        }

        let mut book = self
            .find_book(&book_id)?
            .ok_or_else(|| LibraryError::not_found("books", book_id.clone()))?;
        if self.loan_for_student(&student)?.is_some() {
            return Err(LibraryError::already_borrowed(student));
        }
        if book.copies < 1 {
            return Err(LibraryError::no_copies(book_id));
        }

        let tx = self.conn.transaction()?;
        let outcome = tx
            .execute(
                "UPDATE books SET copies = copies - 1 WHERE book_id = ?1",
                [&book_id],
            )
            .and_then(|_| {
                tx.execute(
                    "INSERT INTO borrowed (student_name, book_id) VALUES (?1, ?2)",
                    params![student, book_id],
                )
            });
        if let Err(err) = outcome {
            warn!("borrow transaction failed for {student}: {err}");
            // tx drops here, rolling back the decrement
            return Err(LibraryError::transaction("borrow did not commit", err));
        }
        tx.commit()
            .map_err(|err| LibraryError::transaction("borrow did not commit", err))?;

        book.copies -= 1;
        debug!("{student} borrowed {book_id}");
        Ok((Loan { student, book_id }, book))
    }

    /// Return a borrowed book.
    ///
    /// The loan row must match exactly this (student, book) pair; a loan
    /// for the same student but a different book does not count. The
    /// copies-increment and loan delete commit together.
    pub fn return_book(&mut self, student: &str, book_id: &str) -> Result<()> {
        let student = normalize_student(student);
        let book_id = normalize_book_id(book_id);
        if student.is_empty() {
            return Err(LibraryError::invalid_input(
                "student name",
                "Student name cannot be empty.",
            ));
        }
        if book_id.is_empty() {
            return Err(LibraryError::invalid_input(
                "book id",
                "Book ID cannot be empty.",
            ));
        }

        let matching: Option<String> = self
            .conn
            .query_row(
                "SELECT book_id FROM borrowed WHERE student_name = ?1 AND book_id = ?2",
                params![student, book_id],
                |row| row.get(0),
            )
            .optional()?;
        if matching.is_none() {
            return Err(LibraryError::not_found(
                "borrowed",
                format!("{student}/{book_id}"),
            ));
        }

        let tx = self.conn.transaction()?;
        let outcome = tx
            .execute(
                "UPDATE books SET copies = copies + 1 WHERE book_id = ?1",
                [&book_id],
            )
            .and_then(|_| {
                tx.execute(
                    "DELETE FROM borrowed WHERE student_name = ?1",
                    [&student],
                )
            });
        if let Err(err) = outcome {
            warn!("return transaction failed for {student}: {err}");
            return Err(LibraryError::transaction("return did not commit", err));
        }
        tx.commit()
            .map_err(|err| LibraryError::transaction("return did not commit", err))?;

        debug!("{student} returned {book_id}");
        Ok(())
    }

    /// Snapshot of every active loan with its book title, ordered by
    /// student name. Reads outside any write transaction; the returned
    /// buffer can be iterated any number of times.
    pub fn active_loans(&self) -> Result<Vec<ActiveLoan>> {
        let mut stmt = self.conn.prepare(
            "SELECT b.student_name, b.book_id, k.title \
             FROM borrowed b JOIN books k ON b.book_id = k.book_id \
             ORDER BY b.student_name",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ActiveLoan {
                student: row.get(0)?,
                book_id: row.get(1)?,
                title: row.get(2)?,
            })
        })?;
        let mut loans = Vec::new();
        for row in rows {
            loans.push(row?);
        }
        Ok(loans)
    }

    fn loan_for_student(&self, student: &str) -> Result<Option<Loan>> {
        let loan = self
            .conn
            .query_row(
                "SELECT student_name, book_id FROM borrowed WHERE student_name = ?1",
                [student],
                |row| {
                    Ok(Loan {
                        student: row.get(0)?,
                        book_id: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(loan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_names_normalize_to_title_case() {
        assert_eq!(normalize_student("john"), "John");
        assert_eq!(normalize_student("JOHN DOE"), "John Doe");
        assert_eq!(normalize_student("  mary   ann  "), "Mary Ann");
        assert_eq!(normalize_student(""), "");
    }
}

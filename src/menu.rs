//! Interactive menu loop.
//!
//! The loop is generic over its input and output handles, so a whole
//! session can be driven from in-memory buffers in tests. Operation
//! failures are rendered as messages and never end the session; only the
//! Exit choice (or end of input) does.

use std::io::{self, BufRead, Write};

use crate::catalog::Book;
use crate::error::LibraryError;
use crate::loans::ActiveLoan;
use crate::store::LibraryStore;

/// Run the menu loop until Exit is chosen or input ends
pub fn run<R: BufRead, W: Write>(
    store: &mut LibraryStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        write_menu(out)?;
        let choice = match prompt(input, out, "Enter your choice (1-6): ")? {
            Some(line) => line,
            None => break,
        };
        match choice.as_str() {
            "1" => add_books(store, input, out)?,
            "2" => view_books(store, out)?,
            "3" => search_books(store, input, out)?,
            "4" => borrow_book(store, input, out)?,
            "5" => return_book(store, input, out)?,
            "6" => {
                writeln!(out, "\nExiting the Library Manager. Goodbye!\n")?;
                break;
            }
            _ => writeln!(out, "Invalid choice, please enter a number from 1 to 6.")?,
        }
    }
    Ok(())
}

fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(40))?;
    writeln!(out, "=== Welcome to the Library Manager ===")?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out, "\t1. Add Book")?;
    writeln!(out, "\t2. View Books")?;
    writeln!(out, "\t3. Search Book")?;
    writeln!(out, "\t4. Borrow Book")?;
    writeln!(out, "\t5. Return Book")?;
    writeln!(out, "\t6. Exit")?;
    writeln!(out, "{}", "-".repeat(40))
}

/// Write a prompt and read one trimmed line; `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    text: &str,
) -> io::Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn add_books<R: BufRead, W: Write>(
    store: &mut LibraryStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "\n-- Add New Book --")?;
    loop {
        let Some(book_id) = prompt(input, out, "Book ID: ")? else {
            return Ok(());
        };
        let Some(title) = prompt(input, out, "Title: ")? else {
            return Ok(());
        };
        let Some(author) = prompt(input, out, "Author: ")? else {
            return Ok(());
        };
        let Some(copies_raw) = prompt(input, out, "Number of Copies: ")? else {
            return Ok(());
        };

        let copies: i64 = match copies_raw.parse() {
            Ok(n) => n,
            Err(_) => {
                writeln!(out, "Invalid input for copies. Please enter a whole number.")?;
                continue;
            }
        };

        match store.add_book(&book_id, &title, &author, copies) {
            Ok(book) => {
                writeln!(out, "Success: Book '{}' added to the database.", book.title)?;
            }
            Err(err @ (LibraryError::InvalidInput { .. } | LibraryError::DuplicateKey { .. })) => {
                writeln!(out, "{}", err.user_message())?;
                continue;
            }
            Err(err) => {
                // unexpected store failure aborts the entry loop, not the menu
                writeln!(out, "An unexpected error occurred: {}", err.user_message())?;
                return Ok(());
            }
        }

        match prompt(input, out, "Add another book? (y/n): ")? {
            Some(more) if more.eq_ignore_ascii_case("y") => continue,
            _ => return Ok(()),
        }
    }
}

fn view_books<W: Write>(store: &LibraryStore, out: &mut W) -> io::Result<()> {
    match store.list_books() {
        Ok(books) if books.is_empty() => writeln!(out, "\nNo books in the library."),
        Ok(books) => {
            writeln!(out, "\n--- Library Book List ---")?;
            write_book_table(out, &books)
        }
        Err(err) => writeln!(out, "{}", err.user_message()),
    }
}

fn search_books<R: BufRead, W: Write>(
    store: &LibraryStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "\n-- Unified Search --")?;
    let Some(term) = prompt(input, out, "Enter Book ID (full) or Title keyword (partial): ")?
    else {
        return Ok(());
    };
    match store.search_books(&term) {
        Ok(books) if books.is_empty() => writeln!(out, "No matching books found."),
        Ok(books) => {
            writeln!(out, "\nBooks Found:")?;
            write_book_table(out, &books)
        }
        Err(err) => writeln!(out, "{}", err.user_message()),
    }
}

fn borrow_book<R: BufRead, W: Write>(
    store: &mut LibraryStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "\n-- Borrow Book --")?;
    let Some(student) = prompt(input, out, "Student Name: ")? else {
        return Ok(());
    };
    let Some(book_id) = prompt(input, out, "Book ID: ")? else {
        return Ok(());
    };
    match store.borrow_book(&student, &book_id) {
        Ok((loan, book)) => writeln!(
            out,
            "Success: Book '{}' borrowed successfully by {}.",
            book.title, loan.student
        ),
        Err(err) => writeln!(out, "Error: {}", err.user_message()),
    }
}

fn return_book<R: BufRead, W: Write>(
    store: &mut LibraryStore,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "\n-- Return Book --")?;
    let Some(student) = prompt(input, out, "Student Name: ")? else {
        return Ok(());
    };
    let Some(book_id) = prompt(input, out, "Book ID: ")? else {
        return Ok(());
    };

    match store.return_book(&student, &book_id) {
        Ok(()) => writeln!(out, "Success: Book returned successfully by {student}.")?,
        Err(err @ LibraryError::NotFound { .. }) => {
            // no borrow record, nothing to list
            writeln!(out, "Error: {}", err.user_message())?;
            return Ok(());
        }
        Err(err) => writeln!(out, "Error: {}", err.user_message())?,
    }

    // display snapshot, independent of the transaction above
    match store.active_loans() {
        Ok(loans) => write_loan_list(out, &loans),
        Err(err) => writeln!(out, "{}", err.user_message()),
    }
}

fn write_book_table<W: Write>(out: &mut W, books: &[Book]) -> io::Result<()> {
    writeln!(
        out,
        "{:<8} {:<30} {:<20} {:<7}",
        "Book ID", "Title", "Author", "Copies"
    )?;
    writeln!(out, "{}", "-".repeat(65))?;
    for book in books {
        writeln!(
            out,
            "{:<8} {:<30} {:<20} {:<7}",
            book.book_id,
            clip(&book.title, 28),
            clip(&book.author, 18),
            book.copies
        )?;
    }
    writeln!(out, "{}", "-".repeat(65))
}

fn write_loan_list<W: Write>(out: &mut W, loans: &[ActiveLoan]) -> io::Result<()> {
    writeln!(out, "\n--- Current Borrowed Books ---")?;
    if loans.is_empty() {
        writeln!(out, "No books have been borrowed.")?;
    } else {
        for loan in loans {
            writeln!(
                out,
                "{} -> {} (Book: {})",
                loan.student, loan.book_id, loan.title
            )?;
        }
    }
    writeln!(out, "{}", "-".repeat(30))
}

fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

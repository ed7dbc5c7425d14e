//! Dummy-catalog seeding for first runs.

use rand::Rng;
use rusqlite::params;
use tracing::info;

use crate::error::{LibraryError, Result};
use crate::store::LibraryStore;

/// Number of placeholder books inserted into an empty catalog
pub const SEED_COUNT: usize = 20;

const TITLE_WORDS: [&str; 8] = [
    "The",
    "Amazing",
    "Secret",
    "Advanced",
    "Fundamentals",
    "Guide",
    "Journey",
    "Mystery",
];

const SUBJECT_WORDS: [&str; 8] = [
    "Python",
    "SQL",
    "Data",
    "Cyber",
    "Networking",
    "Cloud",
    "Algorithms",
    "Security",
];

const SURNAMES: [&str; 5] = ["Smith", "Jones", "Kaushik", "Kumar", "Patel"];

/// Seed the catalog with generated placeholder books.
///
/// Runs only when the `books` table is empty, so repeated bootstraps never
/// duplicate rows. Returns the number of books inserted (0 when the
/// catalog already has any row). All inserts commit in one transaction.
pub fn seed_if_empty(store: &mut LibraryStore) -> Result<usize> {
    if store.book_count()? > 0 {
        return Ok(0);
    }

    info!("catalog is empty, seeding {SEED_COUNT} dummy books");
    let mut rng = rand::thread_rng();

    let tx = store
        .conn
        .transaction()
        .map_err(|err| LibraryError::transaction("seeding did not commit", err))?;
    for i in 1..=SEED_COUNT {
        let book_id = format!("DMBK{i:03}");
        let title = format!(
            "{} of {}",
            TITLE_WORDS[rng.gen_range(0..TITLE_WORDS.len())],
            SUBJECT_WORDS[rng.gen_range(0..SUBJECT_WORDS.len())],
        );
        let initial = (b'A' + rng.gen_range(0..26u8)) as char;
        let author = format!("{initial}. {}", SURNAMES[rng.gen_range(0..SURNAMES.len())]);
        let copies: i64 = rng.gen_range(1..=10);

        tx.execute(
            "INSERT INTO books (book_id, title, author, copies) VALUES (?1, ?2, ?3, ?4)",
            params![book_id, title, author, copies],
        )
        .map_err(|err| LibraryError::transaction("seeding did not commit", err))?;
    }
    tx.commit()
        .map_err(|err| LibraryError::transaction("seeding did not commit", err))?;

    Ok(SEED_COUNT)
}

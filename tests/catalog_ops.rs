use library_manager::{LibraryError, LibraryStore, Result};

// Helper function to create an in-memory store for testing
fn create_test_store() -> Result<LibraryStore> {
    LibraryStore::open_in_memory()
}

#[tokio::test]
async fn test_added_book_is_immediately_visible() {
    test_added_book_is_immediately_visible_impl().unwrap();
}

fn test_added_book_is_immediately_visible_impl() -> Result<()> {
    let store = create_test_store()?;

    let book = store.add_book("rust101", "The Rust Book", "S. Klabnik", 3)?;
    assert_eq!(book.book_id, "RUST101");
    assert_eq!(book.copies, 3);

    let all = store.list_books()?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], book);

    let found = store.search_books("RUST101")?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].book_id, "RUST101");

    Ok(())
}

#[tokio::test]
async fn test_duplicate_id_is_rejected() {
    let store = create_test_store().unwrap();
    store.add_book("BK1", "First", "A. One", 1).unwrap();

    let err = store.add_book("bk1", "Second", "B. Two", 1).unwrap_err();
    assert!(matches!(err, LibraryError::DuplicateKey { book_id } if book_id == "BK1"));
    assert_eq!(store.list_books().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_input_is_rejected() {
    let store = create_test_store().unwrap();

    let err = store.add_book("   ", "No Id", "A. One", 1).unwrap_err();
    assert!(matches!(err, LibraryError::InvalidInput { field, .. } if field == "book id"));

    let err = store.add_book("BK1", "Negative", "A. One", -1).unwrap_err();
    assert!(matches!(err, LibraryError::InvalidInput { field, .. } if field == "copies"));

    assert_eq!(store.list_books().unwrap().len(), 0);
}

#[tokio::test]
async fn test_empty_catalog_lists_no_rows() {
    let store = create_test_store().unwrap();
    assert!(store.list_books().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let store = create_test_store().unwrap();
    store.add_book("ZZ9", "Last", "A. One", 1).unwrap();
    store.add_book("AA1", "First", "B. Two", 1).unwrap();
    store.add_book("MM5", "Middle", "C. Three", 1).unwrap();

    let ids: Vec<String> = store
        .list_books()
        .unwrap()
        .into_iter()
        .map(|b| b.book_id)
        .collect();
    assert_eq!(ids, vec!["AA1", "MM5", "ZZ9"]);
}

#[tokio::test]
async fn test_search_is_a_union_of_id_and_title_matches() {
    test_search_is_a_union_of_id_and_title_matches_impl().unwrap();
}

fn test_search_is_a_union_of_id_and_title_matches_impl() -> Result<()> {
    let store = create_test_store()?;
    store.add_book("SQL101", "Advanced Cloud", "K. Patel", 2)?;
    store.add_book("NET200", "NET200 Field Guide", "R. Kumar", 1)?;

    // id match alone is enough, even though "sql" is not in the title
    let by_id = store.search_books("sql")?;
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id[0].book_id, "SQL101");

    // title substring match, case-insensitive
    let by_title = store.search_books("cloud")?;
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].book_id, "SQL101");

    // a book matching both predicates appears once
    let both = store.search_books("NET200")?;
    assert_eq!(both.len(), 1);

    let none = store.search_books("quantum")?;
    assert!(none.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_search_rejects_empty_term() {
    let store = create_test_store().unwrap();
    let err = store.search_books("   ").unwrap_err();
    assert!(matches!(err, LibraryError::InvalidInput { .. }));
}

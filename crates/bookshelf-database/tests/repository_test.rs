//! Repository tests against an in-memory SQLite database.

use bookshelf_core::config::DeletedRowPolicy;
use bookshelf_core::error::Fault;
use bookshelf_core::types::{
    BulkUpdate, Criteria, FilterField, PageRequest, Patch, SortDirection,
};
use bookshelf_database::DatabasePool;
use bookshelf_database::migration::run_migrations;
use bookshelf_database::repositories::{AuthorRepository, BookRepository, Repository};
use bookshelf_entity::{Author, AuthorFilter, Book, BookFilter, NewAuthor, NewBook};
use chrono::NaiveDate;
use uuid::Uuid;

async fn setup() -> DatabasePool {
    let db = DatabasePool::connect_in_memory()
        .await
        .expect("Failed to open database");
    run_migrations(db.pool())
        .await
        .expect("Failed to run migrations");
    db
}

async fn jane_austen(authors: &Repository<Author>) -> Author {
    authors
        .create(NewAuthor {
            bio: Some("English novelist".to_string()),
            birth_date: NaiveDate::from_ymd_opt(1775, 12, 16),
            ..NewAuthor::named("Jane", "Austen")
        })
        .await
        .expect("create author")
}

#[tokio::test]
async fn test_create_then_find_one_round_trip() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());

    let created = jane_austen(&authors).await;
    assert_eq!(created.meta.created_at, created.meta.updated_at);
    assert!(created.meta.deleted_at.is_none());

    let found = authors
        .find_one(&Criteria::by_id(created.meta.id))
        .await
        .expect("find")
        .expect("present");
    assert_eq!(found.first_name, "Jane");
    assert_eq!(found.last_name, "Austen");
    assert_eq!(found.bio.as_deref(), Some("English novelist"));
    assert_eq!(found.birth_date, NaiveDate::from_ymd_opt(1775, 12, 16));
    assert_eq!(found.meta.id, created.meta.id);
    assert_eq!(found.meta.created_at, found.meta.updated_at);
}

#[tokio::test]
async fn test_find_one_absent_is_none() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let found = authors
        .find_one(&Criteria::by_id(Uuid::new_v4()))
        .await
        .expect("find");
    assert!(found.is_none());
}

#[tokio::test]
async fn test_update_missing_returns_none_and_leaves_store() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let jane = jane_austen(&authors).await;

    let result = authors
        .update(
            &Criteria::by_id(Uuid::new_v4()),
            &Patch::new().set("firstName", "Nobody"),
        )
        .await
        .expect("update");
    assert!(result.is_none());

    let all = authors.find_without_pagination(None).await.expect("list");
    assert_eq!(all, vec![jane]);
}

#[tokio::test]
async fn test_update_overwrites_only_patched_fields() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let jane = jane_austen(&authors).await;

    let updated = authors
        .update(
            &Criteria::by_id(jane.meta.id),
            &Patch::new().set("bio", "Author of Emma"),
        )
        .await
        .expect("update")
        .expect("present");

    assert_eq!(updated.bio.as_deref(), Some("Author of Emma"));
    assert_eq!(updated.first_name, jane.first_name);
    assert_eq!(updated.birth_date, jane.birth_date);
    assert_eq!(updated.meta.id, jane.meta.id);
    assert_eq!(updated.meta.created_at, jane.meta.created_at);
    assert!(updated.meta.updated_at >= updated.meta.created_at);
}

#[tokio::test]
async fn test_update_null_clears_optional_column() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let jane = jane_austen(&authors).await;

    let updated = authors
        .update(
            &Criteria::by_id(jane.meta.id),
            &Patch::new().set("bio", None::<String>),
        )
        .await
        .expect("update")
        .expect("present");
    assert!(updated.bio.is_none());
}

#[tokio::test]
async fn test_update_rejects_unknown_and_managed_columns() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let jane = jane_austen(&authors).await;
    let criteria = Criteria::by_id(jane.meta.id);

    let err = authors
        .update(&criteria, &Patch::new().set("password", "hunter2"))
        .await
        .expect_err("unknown column");
    assert_eq!(err.fault, Fault::Client);
    assert_eq!(err.to_string(), "Failed to update Author");

    let err = authors
        .update(&criteria, &Patch::new().set("id", Uuid::new_v4()))
        .await
        .expect_err("identity column");
    assert!(err.is_client());
}

#[tokio::test]
async fn test_unique_violation_on_create_is_client_fault() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let books = Repository::<Book>::new(db.pool().clone());
    let jane = jane_austen(&authors).await;

    books
        .create(NewBook::new("Emma", "9780141439587", jane.meta.id))
        .await
        .expect("create book");
    let err = books
        .create(NewBook::new("Emma (again)", "9780141439587", jane.meta.id))
        .await
        .expect_err("duplicate isbn");

    assert_eq!(err.fault, Fault::Client);
    assert_eq!(err.entity, "Book");
    assert_eq!(err.operation, "create");
    assert_eq!(books.count(None).await.expect("count"), 1);
}

#[tokio::test]
async fn test_book_with_unknown_author_is_rejected() {
    let db = setup().await;
    let books = Repository::<Book>::new(db.pool().clone());
    let err = books
        .create(NewBook::new("Orphan", "0000000000", Uuid::new_v4()))
        .await
        .expect_err("foreign key");
    assert!(err.is_client());
}

#[tokio::test]
async fn test_create_many() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());

    assert_eq!(authors.create_many(Vec::new()).await.expect("empty"), 0);

    let inserted = authors
        .create_many(vec![
            NewAuthor::named("Jane", "Austen"),
            NewAuthor::named("John", "Doe"),
            NewAuthor::named("Mary", "Shelley"),
        ])
        .await
        .expect("create many");
    assert_eq!(inserted, 3);
    assert_eq!(authors.count(None).await.expect("count"), 3);
}

#[tokio::test]
async fn test_create_many_is_all_or_nothing() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let books = Repository::<Book>::new(db.pool().clone());
    let jane = jane_austen(&authors).await;

    let err = books
        .create_many(vec![
            NewBook::new("Emma", "9780141439587", jane.meta.id),
            NewBook::new("Emma", "9780141439587", jane.meta.id),
        ])
        .await
        .expect_err("duplicate isbn in batch");
    assert_eq!(err.operation, "create multiple");
    assert_eq!(books.count(None).await.expect("count"), 0);
}

#[tokio::test]
async fn test_update_many_sums_affected_rows() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    authors
        .create_many(vec![
            NewAuthor::named("Jane", "Austen"),
            NewAuthor::named("Cassandra", "Austen"),
            NewAuthor::named("John", "Doe"),
        ])
        .await
        .expect("seed");

    let affected = authors
        .update_many(vec![
            BulkUpdate::new(
                Criteria::from(FilterField::eq("lastName", "Austen")),
                Patch::new().set("bio", "Austen family"),
            ),
            BulkUpdate::new(
                Criteria::from(FilterField::eq("firstName", "John")),
                Patch::new().set("bio", "Placeholder"),
            ),
        ])
        .await
        .expect("update many");
    assert_eq!(affected, 3);

    let austens = authors
        .count(Some(&Criteria::from(FilterField::eq("bio", "Austen family"))))
        .await
        .expect("count");
    assert_eq!(austens, 2);
}

#[tokio::test]
async fn test_update_many_empty_is_zero() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    assert_eq!(authors.update_many(Vec::new()).await.expect("empty"), 0);
}

#[tokio::test]
async fn test_update_many_rolls_back_on_failure() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let books = Repository::<Book>::new(db.pool().clone());
    let jane = jane_austen(&authors).await;
    books
        .create_many(vec![
            NewBook::new("Emma", "9780141439587", jane.meta.id),
            NewBook::new("Persuasion", "9780141439686", jane.meta.id),
        ])
        .await
        .expect("seed");
    let before = books.find_without_pagination(None).await.expect("snapshot");

    let err = books
        .update_many(vec![
            BulkUpdate::new(
                Criteria::from(FilterField::eq("title", "Emma")),
                Patch::new().set("genre", "Comedy of manners"),
            ),
            BulkUpdate::new(
                Criteria::from(FilterField::eq("title", "Persuasion")),
                Patch::new().set("isbn", "9780141439587"),
            ),
        ])
        .await
        .expect_err("unique violation");
    assert_eq!(err.fault, Fault::Client);
    assert_eq!(err.to_string(), "Failed to update multiple Book");

    let after = books.find_without_pagination(None).await.expect("snapshot");
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_delete_then_find_is_none() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let jane = jane_austen(&authors).await;
    let criteria = Criteria::by_id(jane.meta.id);

    let removed = authors.delete(&criteria).await.expect("delete");
    assert_eq!(removed, Some(jane));
    assert!(authors.find_one(&criteria).await.expect("find").is_none());
    assert!(authors.delete(&criteria).await.expect("delete").is_none());
}

#[tokio::test]
async fn test_delete_author_cascades_to_books() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let books = Repository::<Book>::new(db.pool().clone());
    let jane = jane_austen(&authors).await;
    books
        .create(NewBook::new("Emma", "9780141439587", jane.meta.id))
        .await
        .expect("create book");

    authors
        .delete(&Criteria::by_id(jane.meta.id))
        .await
        .expect("delete");
    assert_eq!(books.count(None).await.expect("count"), 0);
}

#[tokio::test]
async fn test_delete_many() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    authors
        .create_many(vec![
            NewAuthor::named("Jane", "Austen"),
            NewAuthor::named("Cassandra", "Austen"),
            NewAuthor::named("John", "Doe"),
        ])
        .await
        .expect("seed");

    let austens = Criteria::from(FilterField::eq("lastName", "Austen"));
    assert!(authors.delete_many(&austens).await.expect("delete"));
    assert!(!authors.delete_many(&austens).await.expect("delete again"));
    assert_eq!(authors.count(None).await.expect("count"), 1);
}

#[tokio::test]
async fn test_find_paginates_with_separate_total() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let drafts = (0..25)
        .map(|i| NewAuthor::named(format!("Author{i:02}"), "Example"))
        .collect();
    authors.create_many(drafts).await.expect("seed");

    let page = PageRequest::new(3, 10).sorted_by("firstName", SortDirection::Asc);
    let (items, total) = authors
        .find(&Criteria::all(), Some(&page))
        .await
        .expect("find");
    assert_eq!(total, 25);
    assert_eq!(items.len(), 5);
    assert_eq!(items[0].first_name, "Author20");
    assert_eq!(items[4].first_name, "Author24");
}

#[tokio::test]
async fn test_sort_direction() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    authors
        .create_many(vec![
            NewAuthor::named("Mary", "Shelley"),
            NewAuthor::named("Jane", "Austen"),
            NewAuthor::named("John", "Doe"),
        ])
        .await
        .expect("seed");

    let names = |items: Vec<Author>| -> Vec<String> {
        items.into_iter().map(|a| a.last_name).collect()
    };

    let asc = PageRequest::new(1, 10).sorted_by("last_name", SortDirection::Asc);
    let (items, _) = authors.find(&Criteria::all(), Some(&asc)).await.expect("asc");
    assert_eq!(names(items), ["Austen", "Doe", "Shelley"]);

    let desc = PageRequest::new(1, 10).sorted_by("lastName", SortDirection::Desc);
    let (items, _) = authors.find(&Criteria::all(), Some(&desc)).await.expect("desc");
    assert_eq!(names(items), ["Shelley", "Doe", "Austen"]);
}

#[tokio::test]
async fn test_unknown_sort_field_is_ignored() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    authors
        .create_many(vec![
            NewAuthor::named("Mary", "Shelley"),
            NewAuthor::named("Jane", "Austen"),
            NewAuthor::named("John", "Doe"),
        ])
        .await
        .expect("seed");

    let mut unsorted = PageRequest::new(1, 10);
    unsorted.sort_by = None;
    let (expected, _) = authors
        .find(&Criteria::all(), Some(&unsorted))
        .await
        .expect("unsorted");

    for bogus in ["password", "last_name; DROP TABLE authors", ""] {
        let page = PageRequest::new(1, 10).sorted_by(bogus, SortDirection::Asc);
        let (items, total) = authors
            .find(&Criteria::all(), Some(&page))
            .await
            .expect("find with unknown sort");
        assert_eq!(items, expected);
        assert_eq!(total, 3);
    }
}

#[tokio::test]
async fn test_unknown_filter_field_is_client_fault() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let err = authors
        .find(&Criteria::from(FilterField::eq("password", "x")), None)
        .await
        .expect_err("unknown field");
    assert!(err.is_client());
    assert_eq!(err.to_string(), "Failed to find collection of Author");
}

#[tokio::test]
async fn test_closed_pool_is_server_fault() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    db.close().await;

    let err = authors.count(None).await.expect_err("closed pool");
    assert_eq!(err.fault, Fault::Server);
    assert_eq!(err.to_string(), "Failed to count Author");

    let err = authors
        .find(&Criteria::all(), None)
        .await
        .expect_err("closed pool");
    assert_eq!(err.fault, Fault::Server);
}

#[tokio::test]
async fn test_books_by_author() {
    let db = setup().await;
    let authors = AuthorRepository::new(db.pool().clone(), DeletedRowPolicy::Exclude);
    let books = BookRepository::new(db.pool().clone(), DeletedRowPolicy::Exclude);

    let jane = jane_austen(authors.base()).await;
    let john = authors
        .base()
        .create(NewAuthor::named("John", "Doe"))
        .await
        .expect("create");
    let emma = books
        .base()
        .create(NewBook::new("Emma", "9780141439587", jane.meta.id))
        .await
        .expect("create book");
    books
        .base()
        .create(NewBook::new("Untitled", "0000000001", john.meta.id))
        .await
        .expect("create book");

    let filter = BookFilter {
        search: None,
        author_id: Some(jane.meta.id),
    };
    let (items, total) = books
        .search(&filter, &PageRequest::default())
        .await
        .expect("search");
    assert_eq!(total, 1);
    assert_eq!(items, vec![emma]);
}

#[tokio::test]
async fn test_book_search_matches_title_or_isbn_within_author() {
    let db = setup().await;
    let authors = AuthorRepository::new(db.pool().clone(), DeletedRowPolicy::Exclude);
    let books = BookRepository::new(db.pool().clone(), DeletedRowPolicy::Exclude);
    let jane = jane_austen(authors.base()).await;
    let john = authors
        .base()
        .create(NewAuthor::named("John", "Doe"))
        .await
        .expect("create");
    books
        .base()
        .create_many(vec![
            NewBook::new("Emma", "9780141439587", jane.meta.id),
            NewBook::new("Persuasion", "9780141439686", jane.meta.id),
            NewBook::new("Emmanuel", "1111111111", john.meta.id),
        ])
        .await
        .expect("seed");

    let search = |term: &str, author_id: Option<Uuid>| BookFilter {
        search: Some(term.to_string()),
        author_id,
    };

    let (_, total) = books
        .search(&search("EMM", None), &PageRequest::default())
        .await
        .expect("search");
    assert_eq!(total, 2);

    let (items, total) = books
        .search(&search("emm", Some(jane.meta.id)), &PageRequest::default())
        .await
        .expect("search");
    assert_eq!(total, 1);
    assert_eq!(items[0].title, "Emma");

    let (items, total) = books
        .search(&search("439686", Some(jane.meta.id)), &PageRequest::default())
        .await
        .expect("search");
    assert_eq!(total, 1);
    assert_eq!(items[0].title, "Persuasion");

    let (_, total) = books
        .search(&search("439686", Some(john.meta.id)), &PageRequest::default())
        .await
        .expect("search");
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_author_search_is_case_insensitive_contains() {
    let db = setup().await;
    let authors = AuthorRepository::new(db.pool().clone(), DeletedRowPolicy::Exclude);
    authors
        .base()
        .create_many(vec![
            NewAuthor::named("Jane", "Austen"),
            NewAuthor::named("John", "Doe"),
        ])
        .await
        .expect("seed");

    let search = |term: &str| AuthorFilter {
        search: Some(term.to_string()),
    };
    let page = PageRequest::new(1, 10);

    let (items, total) = authors.search(&search("jan"), &page).await.expect("jan");
    assert_eq!(total, 1);
    assert_eq!(items[0].first_name, "Jane");
    assert_eq!(items[0].last_name, "Austen");

    let (items, total) = authors.search(&search("J"), &page).await.expect("J");
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);

    let (_, total) = authors.search(&search("DOE"), &page).await.expect("DOE");
    assert_eq!(total, 1);

    let (_, total) = authors.search(&search("100%"), &page).await.expect("100%");
    assert_eq!(total, 0);

    let (_, total) = authors
        .search(&AuthorFilter::default(), &page)
        .await
        .expect("no search");
    assert_eq!(total, 2);
}

#[tokio::test]
async fn test_find_with_books() {
    let db = setup().await;
    let authors = AuthorRepository::new(db.pool().clone(), DeletedRowPolicy::Exclude);
    let books = BookRepository::new(db.pool().clone(), DeletedRowPolicy::Exclude);
    let jane = jane_austen(authors.base()).await;
    let emma = books
        .base()
        .create(NewBook::new("Emma", "9780141439587", jane.meta.id))
        .await
        .expect("create");
    let persuasion = books
        .base()
        .create(NewBook::new("Persuasion", "9780141439686", jane.meta.id))
        .await
        .expect("create");

    let expanded = authors
        .find_with_books(jane.meta.id)
        .await
        .expect("find")
        .expect("present");
    assert_eq!(expanded.author, jane);
    assert_eq!(expanded.books, vec![emma.clone(), persuasion]);

    let expanded = books
        .find_with_author(emma.meta.id)
        .await
        .expect("find")
        .expect("present");
    assert_eq!(expanded.author, Some(jane));

    assert!(
        authors
            .find_with_books(Uuid::new_v4())
            .await
            .expect("find")
            .is_none()
    );
}

#[tokio::test]
async fn test_soft_delete_policy() {
    let db = setup().await;
    let hiding = AuthorRepository::new(db.pool().clone(), DeletedRowPolicy::Exclude);
    let showing = AuthorRepository::new(db.pool().clone(), DeletedRowPolicy::Include);
    let jane = jane_austen(hiding.base()).await;

    let deleted = hiding
        .soft_delete(jane.meta.id)
        .await
        .expect("soft delete")
        .expect("present");
    assert!(deleted.meta.is_deleted());
    assert!(
        hiding
            .soft_delete(jane.meta.id)
            .await
            .expect("repeat")
            .is_none()
    );

    assert!(hiding.find_by_id(jane.meta.id).await.expect("find").is_none());
    let (_, total) = hiding
        .search(&AuthorFilter::default(), &PageRequest::default())
        .await
        .expect("search");
    assert_eq!(total, 0);

    assert!(showing.find_by_id(jane.meta.id).await.expect("find").is_some());
    let (_, total) = showing
        .search(&AuthorFilter::default(), &PageRequest::default())
        .await
        .expect("search");
    assert_eq!(total, 1);

    // The generic layer treats deleted_at as an ordinary column.
    assert_eq!(hiding.base().count(None).await.expect("count"), 1);
}

#[tokio::test]
async fn test_soft_deleted_author_hidden_from_book_expansion() {
    let db = setup().await;
    let authors = AuthorRepository::new(db.pool().clone(), DeletedRowPolicy::Exclude);
    let books = BookRepository::new(db.pool().clone(), DeletedRowPolicy::Exclude);
    let jane = jane_austen(authors.base()).await;
    let emma = books
        .base()
        .create(NewBook::new("Emma", "9780141439587", jane.meta.id))
        .await
        .expect("create");

    authors.soft_delete(jane.meta.id).await.expect("soft delete");
    let expanded = books
        .find_with_author(emma.meta.id)
        .await
        .expect("find")
        .expect("present");
    assert!(expanded.author.is_none());
}

#[tokio::test]
async fn test_author_search_folds_non_ascii_case() {
    let db = setup().await;
    let authors = AuthorRepository::new(db.pool().clone(), DeletedRowPolicy::Exclude);
    authors
        .base()
        .create_many(vec![
            NewAuthor::named("Émile", "Zola"),
            NewAuthor::named("Ölaf", "STRÖM"),
        ])
        .await
        .expect("seed");

    let page = PageRequest::new(1, 10);
    for (term, first_name) in [
        ("émile", "Émile"),
        ("ÉMILE", "Émile"),
        ("Émile", "Émile"),
        ("ström", "Ölaf"),
        ("STRÖM", "Ölaf"),
        ("ölaf", "Ölaf"),
    ] {
        let filter = AuthorFilter {
            search: Some(term.to_string()),
        };
        let (items, total) = authors.search(&filter, &page).await.expect("search");
        assert_eq!(total, 1, "{term}");
        assert_eq!(items[0].first_name, first_name, "{term}");
    }
}

#[tokio::test]
async fn test_search_follows_patched_names() {
    let db = setup().await;
    let authors = AuthorRepository::new(db.pool().clone(), DeletedRowPolicy::Exclude);
    let author = authors
        .base()
        .create(NewAuthor::named("Emile", "Zola"))
        .await
        .expect("create");

    authors
        .update_by_id(author.meta.id, &Patch::new().set("firstName", "Émile"))
        .await
        .expect("update")
        .expect("present");

    let page = PageRequest::new(1, 10);
    let search = |term: &str| AuthorFilter {
        search: Some(term.to_string()),
    };
    let (_, total) = authors.search(&search("ÉMILE"), &page).await.expect("new name");
    assert_eq!(total, 1);
    let (_, total) = authors.search(&search("emile"), &page).await.expect("old name");
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_book_search_folds_non_ascii_titles() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let books = BookRepository::new(db.pool().clone(), DeletedRowPolicy::Exclude);
    let zola = authors
        .create(NewAuthor::named("Émile", "Zola"))
        .await
        .expect("create");
    books
        .base()
        .create(NewBook::new("L'Œuvre", "9780192838940", zola.meta.id))
        .await
        .expect("create book");

    let filter = BookFilter {
        search: Some("l'œUVRE".to_string()),
        author_id: None,
    };
    let (_, total) = books
        .search(&filter, &PageRequest::new(1, 10))
        .await
        .expect("search");
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_create_many_spans_several_statements() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());

    let drafts: Vec<NewAuthor> = (0..5_000)
        .map(|i| NewAuthor::named(format!("Author{i}"), "Bulk"))
        .collect();
    let inserted = authors.create_many(drafts).await.expect("create many");

    assert_eq!(inserted, 5_000);
    assert_eq!(authors.count(None).await.expect("count"), 5_000);
}

#[tokio::test]
async fn test_create_many_rolls_back_every_statement() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let books = Repository::<Book>::new(db.pool().clone());
    let jane = jane_austen(&authors).await;

    // The duplicate ISBN sits in the last statement; earlier ones must not survive.
    let mut drafts: Vec<NewBook> = (0..5_000)
        .map(|i| NewBook::new(format!("Volume {i}"), format!("isbn-{i}"), jane.meta.id))
        .collect();
    drafts.push(NewBook::new("Duplicate", "isbn-0", jane.meta.id));

    let err = books.create_many(drafts).await.expect_err("duplicate isbn");
    assert_eq!(err.fault, Fault::Client);
    assert_eq!(books.count(None).await.expect("count"), 0);
}

#[tokio::test]
async fn test_conflicting_criteria_match_nothing() {
    let db = setup().await;
    let authors = Repository::<Author>::new(db.pool().clone());
    let books = Repository::<Book>::new(db.pool().clone());
    let jane = jane_austen(&authors).await;
    books
        .create(NewBook::new("Emma", "9780141439587", jane.meta.id))
        .await
        .expect("create book");

    let criteria = Criteria::from(FilterField::eq("authorId", jane.meta.id))
        .intersect(FilterField::eq("authorId", Uuid::new_v4()));
    assert_eq!(books.count(Some(&criteria)).await.expect("count"), 0);
}

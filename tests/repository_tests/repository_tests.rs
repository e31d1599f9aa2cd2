//! Tests for SquirrelRepository
//!
//! These tests verify:
//! - Id assignment (1 + max existing id)
//! - Deleted ids are never handed out again by the same repository
//! - Create/get/update/delete round trips
//! - Validation happens before any mutation
//! - Not-found handling
//! - Concurrent creates never hand out duplicate ids

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use squirrels::store::FlatFileStore;
use squirrels::{Squirrel, SquirrelError, SquirrelForm, SquirrelRepository};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_repository() -> (TempDir, SquirrelRepository) {
    let temp_dir = TempDir::new().unwrap();
    let repository = SquirrelRepository::open(temp_dir.path().join("squirrel_db.db")).unwrap();
    (temp_dir, repository)
}

fn form(name: &str, size: &str) -> SquirrelForm {
    SquirrelForm::new(name, size)
}

// =============================================================================
// Listing Tests
// =============================================================================

#[test]
fn test_new_repository_is_empty() {
    let (_temp, repo) = setup_temp_repository();

    assert!(repo.list_all().unwrap().is_empty());
    assert_eq!(repo.len().unwrap(), 0);
    assert!(repo.is_empty().unwrap());
}

#[test]
fn test_list_all_returns_created_in_order() {
    let (_temp, repo) = setup_temp_repository();

    repo.create(form("Sam", "large")).unwrap();
    repo.create(form("Furina", "small")).unwrap();

    let names: Vec<String> = repo.list_all().unwrap().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["Sam", "Furina"]);
}

// =============================================================================
// Create Tests
// =============================================================================

#[test]
fn test_create_first_squirrel_gets_id_one() {
    let (_temp, repo) = setup_temp_repository();

    let squirrel = repo.create(form("Sam", "large")).unwrap();

    assert_eq!(
        squirrel,
        Squirrel {
            id: 1,
            name: "Sam".to_string(),
            size: "large".to_string(),
        }
    );
}

#[test]
fn test_create_ids_are_one_plus_previous_max() {
    let (_temp, repo) = setup_temp_repository();

    let mut ids = Vec::new();
    for i in 0..10 {
        let before_max = repo.list_all().unwrap().iter().map(|s| s.id).max().unwrap_or(0);
        let squirrel = repo.create(form(&format!("s{}", i), "small")).unwrap();
        assert_eq!(squirrel.id, before_max + 1);
        ids.push(squirrel.id);
    }

    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_create_after_deleting_middle_keeps_counting_from_max() {
    let (_temp, repo) = setup_temp_repository();
    repo.create(form("a", "small")).unwrap();
    repo.create(form("b", "small")).unwrap();
    repo.create(form("c", "small")).unwrap();

    repo.delete_by_id(2).unwrap();
    let squirrel = repo.create(form("d", "small")).unwrap();

    assert_eq!(squirrel.id, 4);
}

#[test]
fn test_create_after_deleting_highest_does_not_reuse_id() {
    let (_temp, repo) = setup_temp_repository();
    let a = repo.create(form("a", "small")).unwrap();
    let b = repo.create(form("b", "small")).unwrap();

    repo.delete_by_id(b.id).unwrap();
    let c = repo.create(form("c", "small")).unwrap();

    assert_eq!((a.id, b.id), (1, 2));
    assert_eq!(c.id, 3);
    assert!(matches!(repo.get_by_id(b.id), Err(SquirrelError::NotFound)));
}

#[test]
fn test_create_after_deleting_everything_keeps_counting() {
    let (_temp, repo) = setup_temp_repository();
    for name in ["a", "b", "c"] {
        repo.create(form(name, "small")).unwrap();
    }
    for id in 1..=3 {
        repo.delete_by_id(id).unwrap();
    }

    assert!(repo.is_empty().unwrap());
    assert_eq!(repo.create(form("d", "small")).unwrap().id, 4);
}

#[test]
fn test_reopened_repository_counts_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("squirrel_db.db");
    {
        let repo = SquirrelRepository::open(&path).unwrap();
        repo.create(form("a", "small")).unwrap();
        repo.create(form("b", "small")).unwrap();
        repo.delete_by_id(2).unwrap();
    }

    let repo = SquirrelRepository::open(&path).unwrap();

    assert_eq!(repo.create(form("c", "small")).unwrap().id, 2);
}

#[test]
fn test_create_respects_ids_already_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("squirrel_db.db");
    let store: FlatFileStore<Squirrel> = FlatFileStore::open(&path).unwrap();
    store
        .save_all(&[Squirrel {
            id: 41,
            name: "Old".to_string(),
            size: "huge".to_string(),
        }])
        .unwrap();

    let repo = SquirrelRepository::with_store(store);
    let squirrel = repo.create(form("New", "tiny")).unwrap();

    assert_eq!(squirrel.id, 42);
}

#[test]
fn test_create_missing_name_is_validation_error() {
    let (_temp, repo) = setup_temp_repository();

    let result = repo.create(SquirrelForm {
        name: None,
        size: Some("large".to_string()),
    });

    assert!(matches!(result, Err(SquirrelError::Validation(_))));
    assert_eq!(repo.len().unwrap(), 0);
}

#[test]
fn test_create_missing_size_is_validation_error() {
    let (_temp, repo) = setup_temp_repository();

    let result = repo.create(SquirrelForm {
        name: Some("Incomplete".to_string()),
        size: None,
    });

    assert!(matches!(result, Err(SquirrelError::Validation(_))));
    assert_eq!(repo.len().unwrap(), 0);
}

#[test]
fn test_create_empty_field_is_validation_error() {
    let (_temp, repo) = setup_temp_repository();

    assert!(matches!(
        repo.create(form("", "large")),
        Err(SquirrelError::Validation(_))
    ));
    assert!(matches!(
        repo.create(form("Sam", "")),
        Err(SquirrelError::Validation(_))
    ));
    assert_eq!(repo.len().unwrap(), 0);
}

// =============================================================================
// Get Tests
// =============================================================================

#[test]
fn test_get_by_id_round_trip() {
    let (_temp, repo) = setup_temp_repository();
    let created = repo.create(form("Sam", "large")).unwrap();

    let fetched = repo.get_by_id(created.id).unwrap();

    assert_eq!(fetched, created);
}

#[test]
fn test_get_missing_id_is_not_found() {
    let (_temp, repo) = setup_temp_repository();
    repo.create(form("Sam", "large")).unwrap();

    assert!(matches!(repo.get_by_id(9999), Err(SquirrelError::NotFound)));
}

#[test]
fn test_get_reads_through_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("squirrel_db.db");
    let writer = SquirrelRepository::open(&path).unwrap();
    let reader = SquirrelRepository::open(&path).unwrap();

    let created = writer.create(form("Sam", "large")).unwrap();

    assert_eq!(reader.get_by_id(created.id).unwrap(), created);
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_update_replaces_fields_and_keeps_id() {
    let (_temp, repo) = setup_temp_repository();
    let created = repo.create(form("Sam", "large")).unwrap();

    repo.update(created.id, form("Chip", "medium")).unwrap();

    assert_eq!(
        repo.get_by_id(created.id).unwrap(),
        Squirrel {
            id: created.id,
            name: "Chip".to_string(),
            size: "medium".to_string(),
        }
    );
    assert_eq!(repo.len().unwrap(), 1);
}

#[test]
fn test_update_touches_only_target() {
    let (_temp, repo) = setup_temp_repository();
    let first = repo.create(form("Sam", "large")).unwrap();
    let second = repo.create(form("Furina", "small")).unwrap();

    repo.update(second.id, form("Dale", "tiny")).unwrap();

    assert_eq!(repo.get_by_id(first.id).unwrap(), first);
    assert_eq!(repo.get_by_id(second.id).unwrap().name, "Dale");
}

#[test]
fn test_update_missing_id_is_not_found() {
    let (_temp, repo) = setup_temp_repository();

    let result = repo.update(9999, form("Ghost", "tiny"));

    assert!(matches!(result, Err(SquirrelError::NotFound)));
}

#[test]
fn test_update_validates_before_lookup() {
    let (_temp, repo) = setup_temp_repository();

    // Missing id AND missing field: validation wins
    let result = repo.update(9999, SquirrelForm::default());

    assert!(matches!(result, Err(SquirrelError::Validation(_))));
}

#[test]
fn test_update_invalid_form_leaves_record_unchanged() {
    let (_temp, repo) = setup_temp_repository();
    let created = repo.create(form("Sam", "large")).unwrap();

    let result = repo.update(
        created.id,
        SquirrelForm {
            name: Some("Chip".to_string()),
            size: None,
        },
    );

    assert!(matches!(result, Err(SquirrelError::Validation(_))));
    assert_eq!(repo.get_by_id(created.id).unwrap(), created);
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_removes_exactly_one() {
    let (_temp, repo) = setup_temp_repository();
    let a = repo.create(form("a", "small")).unwrap();
    let b = repo.create(form("b", "small")).unwrap();
    let c = repo.create(form("c", "small")).unwrap();

    repo.delete_by_id(b.id).unwrap();

    assert_eq!(repo.len().unwrap(), 2);
    assert!(matches!(repo.get_by_id(b.id), Err(SquirrelError::NotFound)));
    assert_eq!(repo.get_by_id(a.id).unwrap(), a);
    assert_eq!(repo.get_by_id(c.id).unwrap(), c);
}

#[test]
fn test_delete_missing_id_is_not_found() {
    let (_temp, repo) = setup_temp_repository();
    repo.create(form("Sam", "large")).unwrap();

    assert!(matches!(repo.delete_by_id(9999), Err(SquirrelError::NotFound)));
    assert_eq!(repo.len().unwrap(), 1);
}

#[test]
fn test_delete_twice_is_not_found() {
    let (_temp, repo) = setup_temp_repository();
    let created = repo.create(form("Sam", "large")).unwrap();

    repo.delete_by_id(created.id).unwrap();

    assert!(matches!(
        repo.delete_by_id(created.id),
        Err(SquirrelError::NotFound)
    ));
}

// =============================================================================
// Reset / Persistence Tests
// =============================================================================

#[test]
fn test_reset_empties_repository() {
    let (_temp, repo) = setup_temp_repository();
    repo.create(form("Sam", "large")).unwrap();
    repo.create(form("Furina", "small")).unwrap();

    repo.reset().unwrap();

    assert!(repo.is_empty().unwrap());
    assert_eq!(repo.create(form("Chip", "medium")).unwrap().id, 3);
}

#[test]
fn test_data_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("squirrel_db.db");

    let created = {
        let repo = SquirrelRepository::open(&path).unwrap();
        repo.create(form("Sam", "large")).unwrap()
    };

    let repo = SquirrelRepository::open(&path).unwrap();
    assert_eq!(repo.path(), path.as_path());
    assert_eq!(repo.list_all().unwrap(), vec![created]);
}

#[test]
fn test_corrupt_file_surfaces_as_corrupt_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("squirrel_db.db");
    std::fs::write(&path, b"not a squirrel database").unwrap();

    let repo = SquirrelRepository::open(&path).unwrap();

    assert!(matches!(repo.list_all(), Err(SquirrelError::CorruptStore(_))));
    assert!(matches!(
        repo.create(form("Sam", "large")),
        Err(SquirrelError::CorruptStore(_))
    ));
    assert!(matches!(repo.get_by_id(1), Err(SquirrelError::CorruptStore(_))));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_creates_get_unique_ids() {
    let (_temp, repo) = setup_temp_repository();
    let repo = Arc::new(repo);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let repo = Arc::clone(&repo);
            thread::spawn(move || {
                (0..5)
                    .map(|i| repo.create(form(&format!("t{}-{}", t, i), "small")).unwrap().id)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(unique.len(), 40);
    assert_eq!(repo.len().unwrap(), 40);
    assert_eq!(unique, (1..=40).collect::<HashSet<u64>>());
}

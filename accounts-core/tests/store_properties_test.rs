//! Behavioural tests shared by every AccountStore implementation
//!
//! Each scenario runs through AccountService against the in-memory store,
//! an in-memory DuckDB and a DuckDB file.
//!
//! Run with: cargo test --test store_properties_test

use std::sync::Arc;

use tempfile::TempDir;

use accounts_core::adapters::{DuckDbAccountStore, InMemoryAccountStore};
use accounts_core::domain::{
    ChangeAccountRequest, CreateAccountRequest, DeleteAccountRequest, PatchAccountRequest,
};
use accounts_core::ports::AccountStore;
use accounts_core::services::AccountService;
use accounts_core::ErrorKind;

// ============================================================================
// Test Helpers
// ============================================================================

/// One service per backend; the TempDir keeps the file store alive
fn services() -> (Vec<(&'static str, AccountService)>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let file_store = DuckDbAccountStore::open(&temp_dir.path().join("test.duckdb")).unwrap();

    let stores: Vec<(&'static str, Arc<dyn AccountStore>)> = vec![
        ("memory", Arc::new(InMemoryAccountStore::new())),
        ("duckdb-memory", Arc::new(DuckDbAccountStore::open_in_memory().unwrap())),
        ("duckdb-file", Arc::new(file_store)),
    ];

    let services = stores
        .into_iter()
        .map(|(label, store)| (label, AccountService::new(store)))
        .collect();
    (services, temp_dir)
}

async fn create(service: &AccountService, name: &str, amount: i64) -> accounts_core::domain::Result<()> {
    service.create(CreateAccountRequest::new(name, amount)).await
}

// ============================================================================
// Properties
// ============================================================================

#[tokio::test]
async fn test_create_then_get_returns_same_values() {
    let (services, _dir) = services();
    for (label, service) in services {
        create(&service, "alice", 50).await.unwrap();
        let account = service.get("alice").await.unwrap();
        assert_eq!(account.name, "alice", "{}", label);
        assert_eq!(account.amount, 50, "{}", label);
    }
}

#[tokio::test]
async fn test_duplicate_create_is_already_exists() {
    let (services, _dir) = services();
    for (label, service) in services {
        create(&service, "alice", 50).await.unwrap();
        let err = create(&service, "alice", 99).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists, "{}", label);
        assert_eq!(err.to_string(), "account already exists");

        // First value wins
        assert_eq!(service.get("alice").await.unwrap().amount, 50, "{}", label);
    }
}

#[tokio::test]
async fn test_missing_account_is_not_found_everywhere() {
    let (services, _dir) = services();
    for (label, service) in services {
        let get = service.get("ghost").await.unwrap_err();
        let delete = service
            .delete(DeleteAccountRequest::new("ghost"))
            .await
            .unwrap_err();
        let amount = service
            .change_amount(PatchAccountRequest::new("ghost", 1))
            .await
            .unwrap_err();
        let rename = service
            .change_name(ChangeAccountRequest::new("ghost", "spirit"))
            .await
            .unwrap_err();

        for err in [get, delete, amount, rename] {
            assert_eq!(err.kind(), ErrorKind::NotFound, "{}", label);
            assert_eq!(err.to_string(), "account not found");
        }
    }
}

#[tokio::test]
async fn test_empty_names_are_invalid_arguments() {
    let (services, _dir) = services();
    for (label, service) in services {
        let err = create(&service, "", 1).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{}", label);
        assert_eq!(err.to_string(), "empty name");

        assert_eq!(
            service.get("").await.unwrap_err().to_string(),
            "empty name"
        );

        create(&service, "alice", 1).await.unwrap();
        let err = service
            .change_name(ChangeAccountRequest::new("alice", ""))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{}", label);
        assert_eq!(err.to_string(), "empty new name");

        // Both empty: the source name is reported
        let err = service
            .change_name(ChangeAccountRequest::new("", ""))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "empty name");
    }
}

#[tokio::test]
async fn test_delete_removes_account() {
    let (services, _dir) = services();
    for (label, service) in services {
        create(&service, "alice", 1).await.unwrap();
        service.delete(DeleteAccountRequest::new("alice")).await.unwrap();
        assert_eq!(
            service.get("alice").await.unwrap_err().kind(),
            ErrorKind::NotFound,
            "{}",
            label
        );
        // Name is free again
        create(&service, "alice", 2).await.unwrap();
    }
}

#[tokio::test]
async fn test_change_amount_overwrites() {
    let (services, _dir) = services();
    for (label, service) in services {
        create(&service, "alice", 1).await.unwrap();
        service
            .change_amount(PatchAccountRequest::new("alice", -250))
            .await
            .unwrap();
        assert_eq!(service.get("alice").await.unwrap().amount, -250, "{}", label);
    }
}

#[tokio::test]
async fn test_rename_moves_amount() {
    let (services, _dir) = services();
    for (label, service) in services {
        create(&service, "alice", 70).await.unwrap();
        service
            .change_name(ChangeAccountRequest::new("alice", "alicia"))
            .await
            .unwrap();

        assert_eq!(
            service.get("alice").await.unwrap_err().kind(),
            ErrorKind::NotFound,
            "{}",
            label
        );
        let renamed = service.get("alicia").await.unwrap();
        assert_eq!(renamed.name, "alicia", "{}", label);
        assert_eq!(renamed.amount, 70, "{}", label);
    }
}

#[tokio::test]
async fn test_rename_onto_taken_name_keeps_both() {
    let (services, _dir) = services();
    for (label, service) in services {
        create(&service, "alice", 1).await.unwrap();
        create(&service, "bob", 2).await.unwrap();

        let err = service
            .change_name(ChangeAccountRequest::new("alice", "bob"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists, "{}", label);

        assert_eq!(service.get("alice").await.unwrap().amount, 1, "{}", label);
        assert_eq!(service.get("bob").await.unwrap().amount, 2, "{}", label);
    }
}

#[tokio::test]
async fn test_rename_to_same_name_is_noop() {
    let (services, _dir) = services();
    for (label, service) in services {
        create(&service, "alice", 5).await.unwrap();
        service
            .change_name(ChangeAccountRequest::new("alice", "alice"))
            .await
            .unwrap();
        assert_eq!(service.get("alice").await.unwrap().amount, 5, "{}", label);
        assert_eq!(service.list().await.unwrap().len(), 1, "{}", label);
    }
}

/// The full alice -> alicia session from the service description
#[tokio::test]
async fn test_alice_walkthrough() {
    let (services, _dir) = services();
    for (label, service) in services {
        create(&service, "alice", 50).await.unwrap();
        assert_eq!(
            create(&service, "alice", 10).await.unwrap_err().kind(),
            ErrorKind::AlreadyExists
        );

        service
            .change_amount(PatchAccountRequest::new("alice", 75))
            .await
            .unwrap();
        service
            .change_name(ChangeAccountRequest::new("alice", "alicia"))
            .await
            .unwrap();

        let account = service.get("alicia").await.unwrap();
        assert_eq!((account.name.as_str(), account.amount), ("alicia", 75), "{}", label);

        service.delete(DeleteAccountRequest::new("alicia")).await.unwrap();
        assert!(service.list().await.unwrap().is_empty(), "{}", label);
    }
}

#[tokio::test]
async fn test_list_is_sorted_and_keys_match_names() {
    let (services, _dir) = services();
    for (label, service) in services {
        for name in ["carol", "alice", "bob"] {
            create(&service, name, 0).await.unwrap();
        }
        service
            .change_name(ChangeAccountRequest::new("carol", "aaron"))
            .await
            .unwrap();

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["aaron", "alice", "bob"], "{}", label);
        for name in &names {
            assert_eq!(&service.get(name).await.unwrap().name, name, "{}", label);
        }
    }
}

#[tokio::test]
async fn test_file_store_persists_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("accounts.duckdb");

    {
        let service = AccountService::new(Arc::new(DuckDbAccountStore::open(&db_path).unwrap()));
        create(&service, "alice", 50).await.unwrap();
        service
            .change_name(ChangeAccountRequest::new("alice", "alicia"))
            .await
            .unwrap();
    }

    // Sequential reopen runs migrations again without error
    for _ in 0..3 {
        let service = AccountService::new(Arc::new(DuckDbAccountStore::open(&db_path).unwrap()));
        let account = service.get("alicia").await.unwrap();
        assert_eq!(account.amount, 50);
    }
}

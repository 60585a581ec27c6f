//! Integration tests for request dispatch through the wire boundary

use depot::controller::Controller;
use depot::protocol::{Request, Response, WireRequest};
use depot::tree::{DepotPath, DepotTree};

fn seeded_controller() -> Controller {
    let mut tree = DepotTree::new();
    tree.add(&DepotPath::new("proj/a/x.txt"), Some("ax".to_string()))
        .unwrap();
    tree.add(&DepotPath::new("proj/b.txt"), Some("b".to_string()))
        .unwrap();
    Controller::with_tree(tree)
}

fn handle_json(controller: &mut Controller, json: &str) -> Response {
    let wire: WireRequest = serde_json::from_str(json).unwrap();
    let request = Request::try_from(wire).unwrap();
    controller.handle(request)
}

#[test]
fn test_client_info_unknown_user_message() {
    let mut controller = seeded_controller();
    let response = handle_json(
        &mut controller,
        r#"{ "type": "client", "username": "bob", "client_name": "c1" }"#,
    );
    assert!(!response.is_successful);
    assert_eq!(response.message, "User bob not found");
}

#[test]
fn test_client_create_then_info() {
    let mut controller = seeded_controller();
    let response = handle_json(
        &mut controller,
        r#"{ "type": "client", "username": "bob", "client_name": "c1", "depot_path": "/proj" }"#,
    );
    assert!(response.is_successful, "{}", response.message);

    let response = handle_json(
        &mut controller,
        r#"{ "type": "client", "username": "bob", "client_name": "c1" }"#,
    );
    assert!(response.is_successful);
    assert_eq!(response.message, "Client c1 -> /proj");
}

#[test]
fn test_client_create_rejects_missing_depot_path() {
    let mut controller = seeded_controller();
    let response = handle_json(
        &mut controller,
        r#"{ "type": "client", "username": "bob", "client_name": "c1", "depot_path": "/ghost" }"#,
    );
    assert!(!response.is_successful);
    assert_eq!(response.message, "Invalid depot path");
}

#[test]
fn test_full_sync_lists_subtree() {
    let mut controller = seeded_controller();
    handle_json(
        &mut controller,
        r#"{ "type": "client", "username": "bob", "client_name": "c1", "depot_path": "/proj" }"#,
    );

    let response = handle_json(
        &mut controller,
        r#"{ "type": "sync", "username": "bob", "client_name": "c1" }"#,
    );
    assert!(response.is_successful);
    let paths: Vec<&str> = response.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["a/x.txt", "b.txt"]);
}

#[test]
fn test_single_file_sync() {
    let mut controller = seeded_controller();
    handle_json(
        &mut controller,
        r#"{ "type": "client", "username": "bob", "client_name": "c1", "depot_path": "/proj" }"#,
    );

    let response = handle_json(
        &mut controller,
        r#"{ "type": "sync", "username": "bob", "client_name": "c1", "file_path": "a/x.txt" }"#,
    );
    assert!(response.is_successful);
    assert_eq!(response.files.len(), 1);
    assert_eq!(response.files[0].path, "a/x.txt");
    assert_eq!(response.files[0].content, "ax");
}

#[test]
fn test_single_file_sync_missing_file_message() {
    let mut controller = seeded_controller();
    handle_json(
        &mut controller,
        r#"{ "type": "client", "username": "bob", "client_name": "c1", "depot_path": "/proj" }"#,
    );

    let response = handle_json(
        &mut controller,
        r#"{ "type": "sync", "username": "bob", "client_name": "c1", "file_path": "ghost.txt" }"#,
    );
    assert!(!response.is_successful);
    assert_eq!(response.message, "Invalid file path ghost.txt");
}

#[test]
fn test_sync_for_unknown_client_message() {
    let mut controller = seeded_controller();
    handle_json(
        &mut controller,
        r#"{ "type": "client", "username": "bob", "client_name": "c1", "depot_path": "/proj" }"#,
    );

    let response = handle_json(
        &mut controller,
        r#"{ "type": "sync", "username": "bob", "client_name": "c9" }"#,
    );
    assert!(!response.is_successful);
    assert_eq!(response.message, "User bob doesn't have client c9");
}

#[test]
fn test_end_to_end_edit_and_sync() {
    let mut controller = seeded_controller();
    handle_json(
        &mut controller,
        r#"{ "type": "client", "username": "bob", "client_name": "c1", "depot_path": "/proj" }"#,
    );

    let response = handle_json(
        &mut controller,
        r#"{
            "type": "submit", "username": "bob", "client_name": "c1",
            "change_list": [ { "kind": "edit", "path": "a/x.txt", "content": "new content" } ]
        }"#,
    );
    assert!(response.is_successful, "{}", response.message);

    let response = handle_json(
        &mut controller,
        r#"{ "type": "sync", "username": "bob", "client_name": "c1", "file_path": "a/x.txt" }"#,
    );
    assert_eq!(response.files[0].content, "new content");
}

#[test]
fn test_unknown_request_type_fails_parse() {
    let wire: WireRequest = serde_json::from_str(
        r#"{ "type": "integrate", "username": "bob", "client_name": "c1" }"#,
    )
    .unwrap();
    let err = Request::try_from(wire).unwrap_err();
    assert_eq!(err.to_string(), "Unknown request type integrate");
}

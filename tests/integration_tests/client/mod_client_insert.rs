use bson::{Document, doc};
use std::sync::Arc;
use upalate_mongo::errors::DbError;
use upalate_mongo::{MongoDBClient, Namespace, Operator};

use crate::integration_tests::_support::recording_store::{Call, RecordingStore};

fn recording_client() -> (Arc<RecordingStore>, MongoDBClient<RecordingStore>) {
    let store = Arc::new(RecordingStore::new());
    let client = MongoDBClient::with_store(Arc::clone(&store), "app").unwrap();
    (store, client)
}

#[test]
fn insert_document_forwards_to_named_collection() {
    let (store, client) = recording_client();
    client.insert_document(doc! {"name": "alice", "age": 30}, "people").unwrap();
    assert_eq!(
        store.calls(),
        vec![Call::InsertOne(Namespace::new("app", "people"), doc! {"name": "alice", "age": 30})]
    );
}

#[test]
fn insert_document_rejects_empty_collection_name() {
    let (store, client) = recording_client();
    let err = client.insert_document(doc! {"a": 1}, "").unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
    assert!(store.calls().is_empty());
}

#[test]
fn insert_document_rejects_empty_document() {
    let (store, client) = recording_client();
    let err = client.insert_document(Document::new(), "people").unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
    assert!(store.calls().is_empty());
}

#[test]
fn insert_documents_is_one_batched_call() {
    let (store, client) = recording_client();
    let docs = vec![doc! {"n": 1}, doc! {"n": 2}, doc! {"n": 3}];
    client.insert_documents(docs.clone(), "nums").unwrap();
    assert_eq!(store.calls(), vec![Call::InsertMany(Namespace::new("app", "nums"), docs)]);
}

#[test]
fn insert_documents_rejects_empty_sequence() {
    let (store, client) = recording_client();
    let err = client.insert_documents(Vec::new(), "nums").unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
    assert!(store.calls().is_empty());
}

#[test]
fn insert_documents_rejects_empty_member() {
    let (store, client) = recording_client();
    let err = client.insert_documents(vec![doc! {"n": 1}, Document::new()], "nums").unwrap_err();
    match err {
        DbError::Validation(msg) => assert!(msg.contains("index 1"), "{msg}"),
        other => panic!("unexpected: {other:?}"),
    }
    assert!(store.calls().is_empty());
}

#[test]
fn every_operation_rejects_empty_collection_without_store_call() {
    let (store, client) = recording_client();
    assert!(matches!(client.insert_document(doc! {"a": 1}, ""), Err(DbError::Validation(_))));
    assert!(matches!(client.insert_documents(vec![doc! {"a": 1}], ""), Err(DbError::Validation(_))));
    assert!(matches!(client.find(Operator::All, "", "", ""), Err(DbError::Validation(_))));
    assert!(matches!(client.get_collection_size(""), Err(DbError::Validation(_))));
    assert!(store.calls().is_empty());
}

#[test]
fn reserved_collection_names_are_rejected() {
    let (store, client) = recording_client();
    for name in ["system.users", "a$b", "nul\0name"] {
        assert!(matches!(client.get_collection_size(name), Err(DbError::Validation(_))), "{name:?}");
    }
    assert!(store.calls().is_empty());
}

#[test]
fn collection_size_comes_from_store() {
    let store = Arc::new(RecordingStore::with_results(vec![doc! {"a": 1}, doc! {"a": 2}]));
    let client = MongoDBClient::with_store(Arc::clone(&store), "app").unwrap();
    assert_eq!(client.get_collection_size("things").unwrap(), 2);
    assert_eq!(store.calls(), vec![Call::Count(Namespace::new("app", "things"))]);
}

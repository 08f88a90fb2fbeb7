mod common;

use common::{temp_pool, temp_store};
use scrawl::session::{apply_edit, handle_edit};
use scrawl::models::EditMessage;
use scrawl::store::PageStore;

#[tokio::test]
async fn edit_is_persisted_and_acknowledged() {
    let (_dir, store) = temp_store().await;

    let ack = handle_edit(&store, r#"{"id":"X","slug":"p","data":"hello"}"#)
        .await
        .unwrap();
    assert_eq!(ack.message, "got it");
    assert!(ack.success);

    let records = store.lookup("p").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "X");
    assert_eq!(records[0].content, "hello");
}

#[tokio::test]
async fn empty_id_is_acknowledged_without_persisting() {
    let (_dir, store) = temp_store().await;

    let ack = handle_edit(&store, r#"{"id":"","slug":"p","data":"hello"}"#)
        .await
        .unwrap();
    assert!(ack.success);
    assert!(!store.exists("p").await.unwrap());
}

#[tokio::test]
async fn repeated_edits_keep_one_record() {
    let (_dir, store) = temp_store().await;

    for data in ["h", "he", "hel", "hell", "hello"] {
        let msg = EditMessage {
            id: "X".to_string(),
            slug: "p".to_string(),
            data: data.to_string(),
        };
        let ack = apply_edit(&store, &msg).await;
        assert!(ack.success);
    }

    let records = store.lookup("p").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].content, "hello");
}

#[tokio::test]
async fn malformed_payload_fails_decode() {
    // run() terminates the session when handle_edit returns Err.
    let (_dir, store) = temp_store().await;

    assert!(handle_edit(&store, "not json").await.is_err());
    assert!(handle_edit(&store, r#"{"id":42}"#).await.is_err());
}

#[tokio::test]
async fn failed_persist_is_acked_as_unsuccessful() {
    let (_dir, pool) = temp_pool().await;
    let store = PageStore::new(pool.clone());
    store.init().await.unwrap();

    // Kill the backend out from under the session.
    pool.close().await;

    let msg = EditMessage {
        id: "X".to_string(),
        slug: "p".to_string(),
        data: "hello".to_string(),
    };
    let ack = apply_edit(&store, &msg).await;
    assert!(!ack.success);
    assert!(ack.message.contains("save failed"));
}

use std::{thread, time::Duration};

use spotlog::management::TokenStore;

#[test]
fn test_new_store_is_empty() {
    let store = TokenStore::new();

    assert!(!store.is_ready());
    assert_eq!(store.get(), None);
    assert_eq!(store.bearer_header(), None);
}

#[test]
fn test_set_makes_token_readable() {
    let store = TokenStore::new();
    store.set("abc123");

    assert!(store.is_ready());
    // reads do not consume or decay the token
    for _ in 0..3 {
        assert_eq!(store.get().as_deref(), Some("abc123"));
        assert!(store.is_ready());
    }
    assert_eq!(store.bearer_header().as_deref(), Some("Bearer abc123"));
}

#[test]
fn test_last_write_wins() {
    let store = TokenStore::new();
    store.set("t1");
    store.set("t2");

    assert_eq!(store.get().as_deref(), Some("t2"));
}

#[test]
fn test_clones_share_the_slot() {
    let writer = TokenStore::new();
    let reader = writer.clone();

    writer.set("shared");

    assert!(reader.is_ready());
    assert_eq!(reader.get().as_deref(), Some("shared"));
}

#[test]
fn test_write_from_other_thread_is_visible() {
    let store = TokenStore::new();
    let writer = store.clone();

    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        writer.set("from-listener");
    });

    while !store.is_ready() {
        thread::sleep(Duration::from_millis(1));
    }
    assert_eq!(store.get().as_deref(), Some("from-listener"));

    handle.join().unwrap();
}

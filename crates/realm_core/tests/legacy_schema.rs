use realm_core::{
    BlockPostStore, Category, FlatPostStore, LegacyPost, LegacyPostPatch, MemoryStorage,
    NewLegacyPost, Post, Section, StoreError, ValidationError, BLOCK_POSTS_KEY, FLAT_POSTS_KEY,
};

fn flat_post(title: &str, content: &str) -> NewLegacyPost {
    NewLegacyPost {
        title: title.to_string(),
        content: content.to_string(),
        image_url: Some("https://example.com/cover.png".to_string()),
        category: Category::FirstDawn,
        section: Section::Distant,
    }
}

#[test]
fn flat_store_seeds_under_its_own_key() {
    let store = FlatPostStore::open(MemoryStorage::new()).unwrap();

    assert_eq!(store.len(), 2);
    assert!(store.storage().contains_key(FLAT_POSTS_KEY));
    assert!(!store.storage().contains_key(BLOCK_POSTS_KEY));

    let raw: serde_json::Value =
        serde_json::from_str(store.storage().get(FLAT_POSTS_KEY).unwrap()).unwrap();
    assert!(raw[0].get("imageUrl").is_some());
    assert!(raw[0].get("blocks").is_none());
}

#[test]
fn both_schemas_coexist_without_mixing() {
    let flat = FlatPostStore::open(MemoryStorage::new()).unwrap();
    let flat_posts = flat.posts().to_vec();

    let mut blocks = BlockPostStore::open(flat.into_storage()).unwrap();
    assert_eq!(blocks.len(), 2);
    blocks.delete("1").unwrap().expect("seeded block post");

    let storage = blocks.into_storage();
    let persisted_flat: Vec<LegacyPost> =
        serde_json::from_str(storage.get(FLAT_POSTS_KEY).unwrap()).unwrap();
    let persisted_blocks: Vec<Post> =
        serde_json::from_str(storage.get(BLOCK_POSTS_KEY).unwrap()).unwrap();
    assert_eq!(persisted_flat, flat_posts);
    assert_eq!(persisted_blocks.len(), 1);

    let reopened = FlatPostStore::open(storage).unwrap();
    assert_eq!(reopened.posts(), flat_posts.as_slice());
}

#[test]
fn flat_insert_requires_content() {
    let mut store = FlatPostStore::open(MemoryStorage::new()).unwrap();

    let err = store.insert(flat_post("title", "  ")).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::EmptyContent)
    ));

    let inserted = store.insert(flat_post("title", "words")).unwrap();
    assert_eq!(store.posts()[0], inserted);
    assert_eq!(store.len(), 3);
}

#[test]
fn flat_patch_can_clear_cover_image() {
    let mut store = FlatPostStore::open(MemoryStorage::new()).unwrap();
    let post = store.insert(flat_post("covered", "words")).unwrap();
    assert!(post.cover_image().is_some());

    let updated = store
        .update(
            &post.id,
            LegacyPostPatch {
                image_url: Some(None),
                ..LegacyPostPatch::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(updated.image_url, None);
    assert_eq!(updated.content, "words");

    let raw: serde_json::Value =
        serde_json::from_str(store.storage().get(FLAT_POSTS_KEY).unwrap()).unwrap();
    assert!(raw[0].get("imageUrl").is_none());
}

#[test]
fn whitespace_only_fields_written_earlier_still_load() {
    let raw = serde_json::json!([{
        "id": "k3j2h1abc",
        "title": " ",
        "content": "  ",
        "imageUrl": "",
        "category": "周身光影",
        "section": "当下",
        "timestamp": 1_700_000_000_000_i64
    }])
    .to_string();
    let storage = MemoryStorage::new().with_entry(FLAT_POSTS_KEY, raw);

    let store = FlatPostStore::open(storage).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.posts()[0].title, " ");
    assert_eq!(store.storage().write_count(), 0);
}

#[test]
fn empty_stored_content_is_rejected() {
    let raw = serde_json::json!([{
        "id": "k",
        "title": "t",
        "content": "",
        "category": "周身光影",
        "section": "当下",
        "timestamp": 1
    }])
    .to_string();
    let storage = MemoryStorage::new().with_entry(FLAT_POSTS_KEY, raw);

    let err = FlatPostStore::open(storage).err().expect("empty content must fail");
    assert!(matches!(err, StoreError::InvalidData(_)));
}

#[test]
fn writes_still_apply_the_strict_rule_to_loaded_posts() {
    let raw = serde_json::json!([{
        "id": "k",
        "title": " ",
        "content": "body",
        "category": "周身光影",
        "section": "当下",
        "timestamp": 1
    }])
    .to_string();
    let storage = MemoryStorage::new().with_entry(FLAT_POSTS_KEY, raw);
    let mut store = FlatPostStore::open(storage).unwrap();

    let err = store
        .update(
            "k",
            LegacyPostPatch {
                content: Some("new body".to_string()),
                ..LegacyPostPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Validation(ValidationError::EmptyTitle)
    ));
    assert_eq!(store.posts()[0].content, "body");
}

use realm_core::{
    BlockContent, BlockKind, Category, ContentBlock, ImageRef, Post, Section, ValidationError,
};

fn sample_post(id: &str, blocks: Vec<ContentBlock>) -> Post {
    Post {
        id: id.to_string(),
        title: format!("title {id}"),
        blocks,
        category: Category::UnreachedGrassland,
        section: Section::Distant,
        timestamp: 1_700_000_000_000,
    }
}

#[test]
fn post_serialization_uses_expected_wire_fields() {
    let post = sample_post(
        "p1",
        vec![
            ContentBlock::with_id("b1", BlockContent::Text("hello".to_string())),
            ContentBlock::with_id("b2", BlockContent::Image(ImageRef::new("https://x/y.png"))),
        ],
    );

    let json = serde_json::to_value(&post).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "p1",
            "title": "title p1",
            "blocks": [
                {"id": "b1", "type": "text", "value": "hello"},
                {"id": "b2", "type": "image", "value": "https://x/y.png"}
            ],
            "category": "未至草原",
            "section": "远方",
            "timestamp": 1_700_000_000_000_i64
        })
    );
}

#[test]
fn mixed_block_collection_roundtrips_exactly() {
    let posts = vec![
        sample_post(
            "a",
            vec![
                ContentBlock::text("第一段"),
                ContentBlock::image("data:image/png;base64,iVBORw0KGgo="),
                ContentBlock::text(""),
            ],
        ),
        sample_post("b", vec![ContentBlock::image("https://example.com/1.jpg")]),
        sample_post("c", vec![ContentBlock::text("  spaced  \n text ")]),
    ];

    let encoded = serde_json::to_string(&posts).unwrap();
    let decoded: Vec<Post> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, posts);
}

#[test]
fn unknown_block_type_is_rejected() {
    let value = serde_json::json!({"id": "b", "type": "video", "value": "x"});
    assert!(serde_json::from_value::<ContentBlock>(value).is_err());
}

#[test]
fn unknown_section_label_is_rejected() {
    let value = serde_json::json!({
        "id": "p",
        "title": "t",
        "blocks": [],
        "category": "待定",
        "section": "别处",
        "timestamp": 1
    });
    assert!(serde_json::from_value::<Post>(value).is_err());
}

#[test]
fn validate_requires_at_least_one_block() {
    let post = sample_post("p", Vec::new());
    assert_eq!(post.validate(), Err(ValidationError::NoBlocks));
}

#[test]
fn empty_block_values_are_allowed() {
    let post = sample_post("p", vec![ContentBlock::empty(BlockKind::Image)]);
    assert_eq!(post.validate(), Ok(()));
    assert_eq!(post.cover_image(), None);
    assert_eq!(post.preview_text(), None);
}

#[test]
fn card_projection_uses_first_image_and_joined_text() {
    let post = sample_post(
        "p",
        vec![
            ContentBlock::text("line one\n"),
            ContentBlock::image(""),
            ContentBlock::image("https://example.com/cover.png"),
            ContentBlock::text("line two"),
            ContentBlock::image("https://example.com/second.png"),
        ],
    );

    assert_eq!(
        post.cover_image().map(ImageRef::as_str),
        Some("https://example.com/cover.png")
    );
    assert_eq!(post.preview_text().as_deref(), Some("line one line two"));
}

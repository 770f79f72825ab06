mod common;

use common::{empty_store, present_post};
use realm_core::{
    BlockContent, BlockKind, Category, CommitError, Draft, DraftMode, ImageRef, PostPatch,
    Section, ValidationError,
};

#[test]
fn create_mode_starts_with_one_empty_text_block() {
    let draft = Draft::open(Section::Distant, None);

    assert_eq!(draft.mode(), &DraftMode::Create);
    assert_eq!(draft.title(), "");
    assert_eq!(draft.section(), Section::Distant);
    assert_eq!(draft.category(), Category::MixuanDreams);
    assert_eq!(draft.blocks().len(), 1);
    assert_eq!(draft.blocks()[0].content, BlockContent::Text(String::new()));
}

#[test]
fn edit_mode_is_seeded_from_existing_post() {
    let mut store = empty_store();
    let post = store.insert(present_post("seeded")).unwrap();

    let draft = Draft::open(Section::Distant, Some(&post));
    assert_eq!(
        draft.mode(),
        &DraftMode::Edit {
            post_id: post.id.clone()
        }
    );
    assert_eq!(draft.title(), "seeded");
    assert_eq!(draft.blocks(), post.blocks.as_slice());
    assert_eq!(draft.section(), Section::Present);
    assert_eq!(draft.category(), Category::DieyeWalks);
}

#[test]
fn block_editing_appends_updates_and_removes() {
    let mut draft = Draft::create(Section::Present);
    let text_id = draft.blocks()[0].id.clone();
    let image_id = draft.add_block(BlockKind::Image);
    let second_text_id = draft.add_block(BlockKind::Text);

    assert_eq!(draft.blocks().len(), 3);
    assert_eq!(draft.blocks()[1].id, image_id);
    assert_ne!(image_id, second_text_id);

    assert!(draft.update_block_value(&image_id, "https://example.com/x.png"));
    assert!(draft.update_block_value(&text_id, "hello"));
    assert!(!draft.update_block_value("missing", "ignored"));
    assert_eq!(
        draft.block(&image_id).unwrap().content,
        BlockContent::Image(ImageRef::new("https://example.com/x.png"))
    );

    assert!(draft.remove_block(&text_id));
    assert!(!draft.remove_block("missing"));
    let ids: Vec<&str> = draft.blocks().iter().map(|block| block.id.as_str()).collect();
    assert_eq!(ids, vec![image_id.as_str(), second_text_id.as_str()]);
}

#[test]
fn removing_the_last_block_is_a_noop() {
    let mut draft = Draft::create(Section::Present);
    let only_id = draft.blocks()[0].id.clone();

    assert!(!draft.remove_block(&only_id));
    assert_eq!(draft.blocks().len(), 1);

    let extra = draft.add_block(BlockKind::Image);
    assert!(draft.remove_block(&only_id));
    assert!(!draft.remove_block(&extra));
    assert_eq!(draft.blocks().len(), 1);
}

#[test]
fn section_switch_resets_category() {
    let mut draft = Draft::create(Section::Present);
    draft.select_category(Category::DieyeWalks).unwrap();

    draft.change_section(Section::Distant);
    assert_eq!(draft.category(), Category::MixuanDreams);

    let err = draft.select_category(Category::AroundLight).unwrap_err();
    assert_eq!(
        err,
        ValidationError::CategoryOutsideSection {
            category: Category::AroundLight,
            section: Section::Distant,
        }
    );
    assert_eq!(draft.category(), Category::MixuanDreams);
}

#[test]
fn commit_rejects_empty_title_and_leaves_store_untouched() {
    let mut store = empty_store();
    let mut draft = Draft::create(Section::Present);
    let text_id = draft.blocks()[0].id.clone();
    draft.update_block_value(&text_id, "body without title");
    draft.set_title("   ");
    let before = draft.clone();

    let err = draft.commit(&mut store).unwrap_err();
    assert!(matches!(
        err,
        CommitError::Validation(ValidationError::EmptyTitle)
    ));
    assert!(store.is_empty());
    assert_eq!(store.storage().write_count(), 0);
    assert_eq!(draft.title(), before.title());
    assert_eq!(draft.blocks(), before.blocks());
}

#[test]
fn commit_in_create_mode_prepends_post() {
    let mut store = empty_store();
    let existing = store.insert(present_post("existing")).unwrap();

    let mut draft = Draft::create(Section::Present);
    draft.set_title("fresh");
    draft.select_category(Category::AroundLight).unwrap();
    let image_id = draft.add_block(BlockKind::Image);
    draft.update_block_value(&image_id, "data:image/png;base64,AAAA");

    let committed = draft.commit(&mut store).unwrap();
    assert_eq!(committed.title, "fresh");
    assert_eq!(committed.category, Category::AroundLight);
    assert_eq!(committed.blocks, draft.blocks());
    assert_eq!(store.posts(), &[committed, existing][..]);
}

#[test]
fn commit_in_edit_mode_updates_in_place() {
    let mut store = empty_store();
    let older = store.insert(present_post("older")).unwrap();
    let newer = store.insert(present_post("newer")).unwrap();

    let mut draft = Draft::edit(&older);
    draft.set_title("older, edited");
    draft.change_section(Section::Distant);

    let committed = draft.commit(&mut store).unwrap();
    assert_eq!(committed.id, older.id);
    assert_eq!(committed.timestamp, older.timestamp);
    assert_eq!(committed.section, Section::Distant);
    assert_eq!(committed.category, Category::MixuanDreams);
    assert_eq!(store.posts(), &[newer, committed][..]);
}

#[test]
fn commit_of_vanished_post_reports_not_found() {
    let mut store = empty_store();
    let post = store.insert(present_post("doomed")).unwrap();
    let mut draft = Draft::edit(&post);
    draft.set_title("too late");

    store.delete(&post.id).unwrap();
    let err = draft.commit(&mut store).unwrap_err();
    assert!(matches!(err, CommitError::PostNotFound(id) if id == post.id));
    assert!(store.is_empty());

    let untouched = store.update(&post.id, PostPatch::default()).unwrap();
    assert!(untouched.is_none());
}

#[test]
fn late_image_read_for_removed_block_is_discarded() {
    let mut draft = Draft::create(Section::Present);
    let image_id = draft.add_block(BlockKind::Image);
    let ticket = draft.begin_image_read(&image_id).unwrap();
    assert_eq!(ticket.block_id(), image_id);

    assert!(draft.remove_block(&image_id));
    assert!(!draft.has_pending_image_read(&image_id));
    assert!(!draft.complete_image_read(ticket, ImageRef::new("data:image/png;base64,AAAA")));
    assert_eq!(draft.blocks().len(), 1);
}

#[test]
fn cancelled_image_read_is_discarded() {
    let mut draft = Draft::create(Section::Present);
    let image_id = draft.add_block(BlockKind::Image);
    let ticket = draft.begin_image_read(&image_id).unwrap();

    assert!(draft.cancel_image_read(&image_id));
    assert!(!draft.complete_image_read(ticket, ImageRef::new("late.png")));
    assert_eq!(draft.block(&image_id).unwrap().value(), "");
}

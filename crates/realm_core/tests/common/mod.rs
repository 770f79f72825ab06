#![allow(dead_code)]

use realm_core::{
    BlockPostStore, Category, Clock, ContentBlock, KeyValueStorage, MemoryStorage, NewPost,
    StorageError, StorageResult, BLOCK_POSTS_KEY,
};
use std::cell::Cell;

/// Clock that advances one second per reading, starting at `start`.
pub struct StepClock(Cell<i64>);

impl StepClock {
    pub fn starting_at(start: i64) -> Box<Self> {
        Box::new(Self(Cell::new(start)))
    }
}

impl Clock for StepClock {
    fn now_epoch_ms(&self) -> i64 {
        let now = self.0.get();
        self.0.set(now + 1_000);
        now
    }
}

/// Memory storage whose writes can be switched off.
#[derive(Default)]
pub struct FlakyStorage {
    pub inner: MemoryStorage,
    pub fail_writes: bool,
}

impl KeyValueStorage for FlakyStorage {
    fn load(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("disk full".to_string()));
        }
        self.inner.save(key, value)
    }
}

/// Storage that already holds an empty block collection, so nothing is seeded.
pub fn empty_block_storage() -> MemoryStorage {
    MemoryStorage::new().with_entry(BLOCK_POSTS_KEY, "[]")
}

pub fn empty_store() -> BlockPostStore<MemoryStorage> {
    BlockPostStore::open_with_clock(empty_block_storage(), StepClock::starting_at(1_000)).unwrap()
}

pub fn text_post(title: &str, category: Category) -> NewPost {
    NewPost::new(
        title,
        vec![ContentBlock::text(format!("{title} body"))],
        category,
        category.section(),
    )
}

pub fn present_post(title: &str) -> NewPost {
    text_post(title, Category::DieyeWalks)
}

pub fn distant_post(title: &str) -> NewPost {
    text_post(title, Category::MixuanDreams)
}

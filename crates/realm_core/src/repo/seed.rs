//! Example posts written on first start.
//!
//! Both schemas seed the same two moments, newest first.

use crate::model::block::{BlockContent, ContentBlock, ImageRef};
use crate::model::legacy::LegacyPost;
use crate::model::post::Post;
use crate::model::section::{Category, Section};

const DAY_MS: i64 = 86_400_000;

struct SeedMoment {
    id: &'static str,
    title: &'static str,
    body: &'static str,
    image_url: &'static str,
    category: Category,
    section: Section,
    age_ms: i64,
}

const SEED_MOMENTS: &[SeedMoment] = &[
    SeedMoment {
        id: "1",
        title: "众生亦我",
        body: "万象生长，不仅仅是草木的拔节，更是意志的共鸣。在这里，每一阵风都有回响，每一颗星都是引力。",
        image_url: "https://images.unsplash.com/photo-1518495973542-4542c06a5843?auto=format&fit=crop&w=800&q=80",
        category: Category::DieyeWalks,
        section: Section::Present,
        age_ms: 0,
    },
    SeedMoment {
        id: "2",
        title: "万物森罗",
        body: "在无限的原野上，我们既是观察者，也是被观察的奇迹。生命的热度，就藏在那些不可遏制的瞬间。",
        image_url: "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?auto=format&fit=crop&w=800&q=80",
        category: Category::MixuanDreams,
        section: Section::Distant,
        age_ms: DAY_MS,
    },
];

pub(crate) fn block_seed(now_ms: i64) -> Vec<Post> {
    SEED_MOMENTS
        .iter()
        .map(|seed| Post {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            blocks: vec![
                ContentBlock::with_id(
                    format!("{}-text", seed.id),
                    BlockContent::Text(seed.body.to_string()),
                ),
                ContentBlock::with_id(
                    format!("{}-image", seed.id),
                    BlockContent::Image(ImageRef::new(seed.image_url)),
                ),
            ],
            category: seed.category,
            section: seed.section,
            timestamp: now_ms - seed.age_ms,
        })
        .collect()
}

pub(crate) fn flat_seed(now_ms: i64) -> Vec<LegacyPost> {
    SEED_MOMENTS
        .iter()
        .map(|seed| LegacyPost {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            content: seed.body.to_string(),
            image_url: Some(seed.image_url.to_string()),
            category: seed.category,
            section: seed.section,
            timestamp: now_ms - seed.age_ms,
        })
        .collect()
}

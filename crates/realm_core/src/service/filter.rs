//! Board filtering and section/category selection.
//!
//! # Responsibility
//! - Project the full collection onto the active section and category.
//! - Hold the board's selection state machine.
//!
//! # Invariants
//! - Filtering is pure and preserves source order.
//! - A category selector outside the active section yields an empty result.
//! - Selecting a section always resets the category selector to `All`.

use crate::model::section::{CategoryFilter, Section, Sectioned};

/// Returns the posts shown for `section` + `filter`, in source order.
pub fn visible_posts<P: Sectioned>(
    posts: &[P],
    section: Section,
    filter: CategoryFilter,
) -> Vec<&P> {
    if !filter.is_valid_for(section) {
        return Vec::new();
    }
    posts
        .iter()
        .filter(|post| post.section() == section && filter.matches(post.category()))
        .collect()
}

/// Active section and category selector of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSelection {
    section: Section,
    category: CategoryFilter,
}

impl Default for BoardSelection {
    fn default() -> Self {
        Self::new(Section::Present)
    }
}

impl BoardSelection {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            category: CategoryFilter::All,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    pub fn select_section(&mut self, section: Section) {
        self.section = section;
        self.category = CategoryFilter::All;
    }

    pub fn select_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    /// Selectors offered for the active section: `All` first, then its categories.
    pub fn category_options(&self) -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(
                self.section
                    .categories()
                    .iter()
                    .copied()
                    .map(CategoryFilter::Only),
            )
            .collect()
    }

    pub fn visible<'a, P: Sectioned>(&self, posts: &'a [P]) -> Vec<&'a P> {
        visible_posts(posts, self.section, self.category)
    }
}

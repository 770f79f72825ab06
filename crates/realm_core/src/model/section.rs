//! Section and category vocabulary.
//!
//! # Responsibility
//! - Define the two top-level board sections and their fixed category sets.
//! - Map domain values to and from their display labels.
//!
//! # Invariants
//! - Every category belongs to exactly one section.
//! - The first category of a section is its default.
//! - Wire labels are the Chinese display labels used by the persisted schema.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Label of the "every category" selector.
pub const ALL_CATEGORIES_LABEL: &str = "全部";

/// Top-level board section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// 当下: moments from the here and now.
    #[serde(rename = "当下")]
    Present,
    /// 远方: moments from far away.
    #[serde(rename = "远方")]
    Distant,
}

const PRESENT_CATEGORIES: &[Category] = &[
    Category::QiqiPoems,
    Category::DieyeWalks,
    Category::AroundLight,
];

const DISTANT_CATEGORIES: &[Category] = &[
    Category::MixuanDreams,
    Category::UnreachedGrassland,
    Category::FirstDawn,
    Category::Pending,
];

impl Section {
    /// All sections in navigation order.
    pub const ALL: [Section; 2] = [Section::Present, Section::Distant];

    /// Fixed, ordered category set of this section.
    pub fn categories(self) -> &'static [Category] {
        match self {
            Self::Present => PRESENT_CATEGORIES,
            Self::Distant => DISTANT_CATEGORIES,
        }
    }

    /// Default category used when a draft enters this section.
    pub fn first_category(self) -> Category {
        self.categories()[0]
    }

    /// Returns whether `category` may be used inside this section.
    pub fn allows(self, category: Category) -> bool {
        category.section() == self
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Present => "当下",
            Self::Distant => "远方",
        }
    }
}

/// Post category. Categories are partitioned per section, never shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "齐七的诗")]
    QiqiPoems,
    #[serde(rename = "蝶野漫步")]
    DieyeWalks,
    #[serde(rename = "周身光影")]
    AroundLight,
    #[serde(rename = "米悬的梦")]
    MixuanDreams,
    #[serde(rename = "未至草原")]
    UnreachedGrassland,
    #[serde(rename = "晨曦初现")]
    FirstDawn,
    #[serde(rename = "待定")]
    Pending,
}

impl Category {
    /// Owning section of this category.
    pub fn section(self) -> Section {
        match self {
            Self::QiqiPoems | Self::DieyeWalks | Self::AroundLight => Section::Present,
            Self::MixuanDreams | Self::UnreachedGrassland | Self::FirstDawn | Self::Pending => {
                Section::Distant
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::QiqiPoems => "齐七的诗",
            Self::DieyeWalks => "蝶野漫步",
            Self::AroundLight => "周身光影",
            Self::MixuanDreams => "米悬的梦",
            Self::UnreachedGrassland => "未至草原",
            Self::FirstDawn => "晨曦初现",
            Self::Pending => "待定",
        }
    }
}

/// Category selector used by board filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Matches every category of the active section.
    #[default]
    All,
    /// Matches exactly one category.
    Only(Category),
}

impl CategoryFilter {
    /// Returns whether this selector is a valid choice inside `section`.
    pub fn is_valid_for(self, section: Section) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => section.allows(category),
        }
    }

    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == category,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => ALL_CATEGORIES_LABEL,
            Self::Only(category) => category.label(),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(value: Category) -> Self {
        Self::Only(value)
    }
}

/// Anything placed on the board under a section and category.
pub trait Sectioned {
    fn section(&self) -> Section;
    fn category(&self) -> Category;
}

/// Error returned when a display label does not name a known value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub label: String,
}

impl Display for UnknownLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} label `{}`", self.kind, self.label)
    }
}

impl Error for UnknownLabel {}

impl FromStr for Section {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.label() == s.trim())
            .ok_or_else(|| UnknownLabel {
                kind: "section",
                label: s.to_string(),
            })
    }
}

impl FromStr for Category {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .flat_map(|section| section.categories().iter().copied())
            .find(|category| category.label() == s.trim())
            .ok_or_else(|| UnknownLabel {
                kind: "category",
                label: s.to_string(),
            })
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == ALL_CATEGORIES_LABEL || trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed.parse::<Category>().map(Self::Only)
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Display for CategoryFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CategoryFilter, Section};

    #[test]
    fn every_category_belongs_to_the_section_that_lists_it() {
        for section in Section::ALL {
            for category in section.categories() {
                assert_eq!(category.section(), section);
            }
        }
    }

    #[test]
    fn first_category_follows_configured_order() {
        assert_eq!(Section::Present.first_category(), Category::QiqiPoems);
        assert_eq!(Section::Distant.first_category(), Category::MixuanDreams);
    }

    #[test]
    fn labels_parse_back_to_values() {
        assert_eq!("远方".parse::<Section>().unwrap(), Section::Distant);
        assert_eq!("晨曦初现".parse::<Category>().unwrap(), Category::FirstDawn);
        assert_eq!("全部".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert!("山海".parse::<Category>().is_err());
    }

    #[test]
    fn filter_validity_is_section_scoped() {
        assert!(CategoryFilter::All.is_valid_for(Section::Distant));
        assert!(CategoryFilter::Only(Category::DieyeWalks).is_valid_for(Section::Present));
        assert!(!CategoryFilter::Only(Category::DieyeWalks).is_valid_for(Section::Distant));
    }
}

//! Card and category types

use serde::{Deserialize, Serialize};

/// One storytelling tactic or structure from the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub example: String,
}

impl Card {
    /// True if the card belongs to `category` (exact, case-sensitive)
    pub fn is_in(&self, category: &str) -> bool {
        self.category == category
    }

    /// True if the card belongs to `category`, ignoring case
    pub fn is_in_ignore_case(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// The seven fixed card groupings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Concept,
    Explore,
    Character,
    Function,
    Structure,
    Style,
    Organize,
}

impl Category {
    /// Canonical catalogue order
    pub const ALL: [Category; 7] = [
        Category::Concept,
        Category::Explore,
        Category::Character,
        Category::Function,
        Category::Structure,
        Category::Style,
        Category::Organize,
    ];

    /// Categories drawn by every sample
    pub const SAMPLE_CORE: [Category; 3] =
        [Category::Concept, Category::Structure, Category::Style];

    /// Categories appended to the core sample when a full sample is requested
    pub const SAMPLE_EXTENSION: [Category; 4] = [
        Category::Explore,
        Category::Character,
        Category::Function,
        Category::Organize,
    ];

    /// Name as stored in the catalogue
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Concept => "Concept",
            Category::Explore => "Explore",
            Category::Character => "Character",
            Category::Function => "Function",
            Category::Structure => "Structure",
            Category::Style => "Style",
            Category::Organize => "Organize",
        }
    }

    /// Categories drawn for a sample, in draw order
    pub fn sample_order(full: bool) -> Vec<Category> {
        let mut order = Category::SAMPLE_CORE.to_vec();
        if full {
            order.extend(Category::SAMPLE_EXTENSION);
        }
        order
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Catalog record structures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cover used when a book is added without any images.
pub const DEFAULT_COVER: &str =
    "https://images.unsplash.com/photo-1544716278-ca5e3f4abd8c?w=300&h=400&fit=crop";

/// Book identifier. New books take their creation timestamp in milliseconds.
pub type BookId = u64;

labeled_enum! {
    /// Fixed set of shelving categories.
    pub enum Category {
        ComputerScience => "Computer Science",
        SoftwareEngineering => "Software Engineering",
        DataScience => "Data Science",
        ArtificialIntelligence => "Artificial Intelligence",
        Programming => "Programming",
        Statistics => "Statistics",
        Mathematics => "Mathematics",
        Others => "Others",
    }
}

labeled_enum! {
    /// Physical condition of the copies.
    pub enum Condition {
        Excellent => "Excellent",
        Good => "Good",
        Fair => "Fair",
        Poor => "Poor",
        Damaged => "Damaged",
    }
}

labeled_enum! {
    /// Shelf status shown next to the title.
    pub enum BookStatus {
        Available => "Available",
        Unavailable => "Unavailable",
    }
}

impl Default for BookStatus {
    fn default() -> Self {
        BookStatus::Available
    }
}

/// A title held by the library.
///
/// `available` never exceeds `quantity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,

    pub title: String,

    pub author: String,

    pub category: Category,

    /// Free-text tags, kept in insertion order
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub isbn: String,

    /// Total copies owned
    pub quantity: u32,

    /// Copies not currently lent out
    pub available: u32,

    pub condition: Condition,

    /// Shelf location code, e.g. `A-001`
    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub cover_images: Vec<String>,

    #[serde(default)]
    pub description: String,

    pub published_year: i32,

    #[serde(default)]
    pub pages: u32,

    /// Average reader rating, 0 to 5
    #[serde(default)]
    pub rating: f32,

    /// Number of times lent out; only ever grows
    #[serde(default)]
    pub borrow_count: u32,

    #[serde(default)]
    pub last_borrowed: Option<NaiveDate>,

    #[serde(default)]
    pub added_date: Option<NaiveDate>,

    #[serde(default)]
    pub status: BookStatus,
}

impl Book {
    /// Whether any copy can be lent right now.
    pub fn is_available(&self) -> bool {
        self.available > 0
    }

    /// Recompute `status` from the copy count.
    pub fn refresh_status(&mut self) {
        self.status = if self.is_available() {
            BookStatus::Available
        } else {
            BookStatus::Unavailable
        };
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Fields an administrator fills in when adding a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub isbn: String,
    pub quantity: u32,
    pub condition: Condition,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub cover_images: Vec<String>,
    #[serde(default)]
    pub description: String,
    pub published_year: i32,
    #[serde(default)]
    pub pages: u32,
}

impl NewBook {
    /// Blank form, as presented before the admin types anything.
    pub fn blank(current_year: i32) -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            category: None,
            tags: Vec::new(),
            isbn: String::new(),
            quantity: 1,
            condition: Condition::Good,
            location: String::new(),
            cover_images: Vec::new(),
            description: String::new(),
            published_year: current_year,
            pages: 0,
        }
    }
}

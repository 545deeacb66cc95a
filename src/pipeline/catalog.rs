//! Catalog search, filter and sort.
//!
//! Queries never mutate the catalog; they return references into it in
//! display order. Sorting is stable, so books with equal keys keep their
//! catalog order.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::AppError;
use crate::models::{Book, Category, Condition};
use crate::utils::{contains_ignore_case, locale_compare};

/// Which screen is searching. The two differ in the secondary fields the
/// search text is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
    /// Borrower browse view: title, author or any tag
    #[default]
    Browse,
    /// Admin catalog view: title, author or ISBN
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Author,
    Rating,
    Popularity,
    Newest,
    Available,
}

impl SortKey {
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortKey::Title => locale_compare(&a.title, &b.title),
            SortKey::Author => locale_compare(&a.author, &b.author),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Popularity => b.borrow_count.cmp(&a.borrow_count),
            SortKey::Newest => b.published_year.cmp(&a.published_year),
            SortKey::Available => b.available.cmp(&a.available),
        }
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "author" => Ok(SortKey::Author),
            "rating" => Ok(SortKey::Rating),
            "popularity" | "borrowcount" => Ok(SortKey::Popularity),
            "newest" | "publishedyear" => Ok(SortKey::Newest),
            "available" => Ok(SortKey::Available),
            other => Err(AppError::validation(format!("unknown sort key '{other}'"))),
        }
    }
}

/// Search text plus the optional filters. `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub search: String,
    pub category: Option<Category>,
    pub condition: Option<Condition>,
    pub tag: Option<String>,
    pub sort: Option<SortKey>,
    pub scope: SearchScope,
}

impl CatalogQuery {
    pub fn matches(&self, book: &Book) -> bool {
        let search = self.search.as_str();
        let text_hit = contains_ignore_case(&book.title, search)
            || contains_ignore_case(&book.author, search)
            || match self.scope {
                SearchScope::Browse => book.tags.iter().any(|t| contains_ignore_case(t, search)),
                SearchScope::Admin => book.isbn.contains(search),
            };

        text_hit
            && self.category.is_none_or(|c| book.category == c)
            && self.condition.is_none_or(|c| book.condition == c)
            && self.tag.as_deref().is_none_or(|t| book.has_tag(t))
    }

    /// Filter then sort. Without a sort key the catalog order is kept.
    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        let mut hits: Vec<&Book> = books.iter().filter(|b| self.matches(b)).collect();
        if let Some(key) = self.sort {
            hits.sort_by(|a, b| key.compare(a, b));
        }
        hits
    }
}

/// Every distinct tag, in the order first seen.
pub fn all_tags(books: &[Book]) -> Vec<&str> {
    let mut tags: Vec<&str> = Vec::new();
    for tag in books.iter().flat_map(|b| b.tags.iter()) {
        if !tags.contains(&tag.as_str()) {
            tags.push(tag);
        }
    }
    tags
}

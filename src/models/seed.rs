//! Seed data: the sample catalog and member roster.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::book::{Book, BookStatus, Category, Condition};
use super::borrower::{
    BorrowRecord, Borrower, BorrowerStatus, Membership, Notification, NotificationType,
    RecordStatus,
};
use crate::error::{AppError, Result};
use crate::pipeline::validate::validate_student_id;

/// Root seed data structure: the state a fresh library starts from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub books: Vec<Book>,

    #[serde(default)]
    pub borrowers: Vec<Borrower>,
}

impl Seed {
    /// Load seed data from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load seed data or return the built-in sample if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Seed load failed from {:?}: {}. Using built-in sample data.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate record invariants before the seed is used.
    pub fn validate(&self) -> Result<()> {
        let mut book_ids = HashSet::new();
        for book in &self.books {
            if !book_ids.insert(book.id) {
                return Err(AppError::validation(format!("Duplicate book id {}", book.id)));
            }
            if book.available > book.quantity {
                return Err(AppError::validation(format!(
                    "Book {} has {} available but only {} owned",
                    book.id, book.available, book.quantity
                )));
            }
        }

        let mut borrower_ids = HashSet::new();
        for borrower in &self.borrowers {
            if !borrower_ids.insert(borrower.id) {
                return Err(AppError::validation(format!(
                    "Duplicate borrower id {}",
                    borrower.id
                )));
            }
            if !validate_student_id(&borrower.student_id) {
                return Err(AppError::validation(format!(
                    "Borrower {} has malformed student ID '{}'",
                    borrower.id, borrower.student_id
                )));
            }
        }
        Ok(())
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn book(
    id: u64,
    title: &str,
    author: &str,
    category: Category,
    tags: &[&str],
    isbn: &str,
    (quantity, available): (u32, u32),
    condition: Condition,
    location: &str,
    covers: &[&str],
    description: &str,
    (published_year, pages): (i32, u32),
    (rating, borrow_count): (f32, u32),
    (last_borrowed, added_date): (NaiveDate, NaiveDate),
) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        category,
        tags: strings(tags),
        isbn: isbn.to_string(),
        quantity,
        available,
        condition,
        location: location.to_string(),
        cover_images: strings(covers),
        description: description.to_string(),
        published_year,
        pages,
        rating,
        borrow_count,
        last_borrowed: Some(last_borrowed),
        added_date: Some(added_date),
        status: BookStatus::Available,
    }
}

fn sample_books() -> Vec<Book> {
    vec![
        book(
            1,
            "The Art of Computer Programming, Volume 1",
            "Donald E. Knuth",
            Category::ComputerScience,
            &["algorithms", "programming", "mathematics"],
            "978-0201896831",
            (5, 3),
            Condition::Good,
            "A-001",
            &[
                "https://images.unsplash.com/photo-1544716278-ca5e3f4abd8c?w=300&h=400&fit=crop",
                "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=300&h=400&fit=crop",
            ],
            "Fundamental algorithms and analysis of algorithms",
            (1997, 672),
            (4.8, 45),
            (date(2024, 1, 10), date(2023, 1, 15)),
        ),
        book(
            2,
            "Clean Code: A Handbook of Agile Software Craftsmanship",
            "Robert C. Martin",
            Category::SoftwareEngineering,
            &["clean code", "best practices", "software development"],
            "978-0132350884",
            (8, 6),
            Condition::Excellent,
            "B-015",
            &[
                "https://images.unsplash.com/photo-1481627834876-b7833e8f5570?w=300&h=400&fit=crop",
                "https://images.unsplash.com/photo-1456324504439-367cee3b3c32?w=300&h=400&fit=crop",
            ],
            "A handbook of agile software craftsmanship principles",
            (2008, 464),
            (4.7, 38),
            (date(2024, 1, 12), date(2023, 2, 20)),
        ),
        book(
            3,
            "Introduction to Algorithms",
            "Thomas H. Cormen",
            Category::ComputerScience,
            &["algorithms", "data structures", "computer science"],
            "978-0262033848",
            (6, 4),
            Condition::Good,
            "A-025",
            &["https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=300&h=400&fit=crop"],
            "Comprehensive introduction to algorithms and data structures",
            (2009, 1312),
            (4.9, 62),
            (date(2024, 1, 8), date(2023, 1, 10)),
        ),
        book(
            4,
            "Data Science from Scratch",
            "Joel Grus",
            Category::DataScience,
            &["data science", "python", "machine learning"],
            "978-1492041139",
            (4, 2),
            Condition::Fair,
            "C-008",
            &["https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=300&h=400&fit=crop"],
            "First principles approach to data science",
            (2019, 406),
            (4.5, 32),
            (date(2024, 1, 15), date(2023, 3, 5)),
        ),
        book(
            5,
            "Artificial Intelligence: A Modern Approach",
            "Stuart Russell, Peter Norvig",
            Category::ArtificialIntelligence,
            &["AI", "machine learning", "neural networks"],
            "978-0134610993",
            (7, 5),
            Condition::Excellent,
            "D-012",
            &["https://images.unsplash.com/photo-1555255707-c07966088b7b?w=300&h=400&fit=crop"],
            "Comprehensive introduction to artificial intelligence",
            (2020, 1152),
            (4.8, 28),
            (date(2024, 1, 5), date(2023, 4, 12)),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn loan(
    id: u64,
    book_id: u64,
    book_title: &str,
    borrowed_date: NaiveDate,
    due_date: NaiveDate,
    returned_date: Option<NaiveDate>,
    status: RecordStatus,
    renewal_count: u32,
    fine: u32,
) -> BorrowRecord {
    BorrowRecord {
        id,
        book_id,
        book_title: book_title.to_string(),
        borrowed_date,
        due_date,
        returned_date,
        status,
        renewal_count,
        fine,
    }
}

fn notice(id: u64, kind: NotificationType, message: &str, on: NaiveDate, read: bool) -> Notification {
    Notification {
        id,
        kind,
        title: String::new(),
        message: message.to_string(),
        date: Some(on),
        time: None,
        read,
    }
}

fn sample_borrowers() -> Vec<Borrower> {
    vec![
        Borrower {
            id: 1,
            student_id: "2021001".into(),
            name: "Arjun Sharma".into(),
            email: "arjun.sharma@college.edu".into(),
            phone: "+91 9876543210".into(),
            department: "BSC-IT".into(),
            year: "3rd".into(),
            semester: "Sem 5".into(),
            status: BorrowerStatus::Active,
            membership: Membership::Premium,
            joined_date: Some(date(2021, 7, 1)),
            last_activity: Some(date(2024, 1, 15)),
            total_borrowed: 25,
            currently_borrowed: 2,
            overdue_count: 0,
            fines: 0,
            max_books_allowed: 5,
            borrowing_history: vec![
                loan(
                    1,
                    1,
                    "The Art of Computer Programming",
                    date(2024, 1, 10),
                    date(2024, 2, 10),
                    None,
                    RecordStatus::Borrowed,
                    0,
                    0,
                ),
                loan(
                    2,
                    2,
                    "Clean Code",
                    date(2024, 1, 5),
                    date(2024, 2, 5),
                    None,
                    RecordStatus::Borrowed,
                    1,
                    0,
                ),
            ],
            notifications: vec![notice(
                1,
                NotificationType::Reminder,
                "Book 'Clean Code' is due in 3 days",
                date(2024, 1, 13),
                false,
            )],
            wishlist: Vec::new(),
        },
        Borrower {
            id: 2,
            student_id: "2022003".into(),
            name: "Priya Patel".into(),
            email: "priya.patel@college.edu".into(),
            phone: "+91 9876543211".into(),
            department: "BSC-DS".into(),
            year: "2nd".into(),
            semester: "Sem 4".into(),
            status: BorrowerStatus::Active,
            membership: Membership::Standard,
            joined_date: Some(date(2022, 7, 1)),
            last_activity: Some(date(2024, 1, 12)),
            total_borrowed: 18,
            currently_borrowed: 1,
            overdue_count: 1,
            fines: 120,
            max_books_allowed: 3,
            borrowing_history: vec![loan(
                3,
                4,
                "Data Science from Scratch",
                date(2023, 12, 15),
                date(2024, 1, 15),
                None,
                RecordStatus::Overdue,
                0,
                120,
            )],
            notifications: vec![notice(
                2,
                NotificationType::Overdue,
                "Book 'Data Science from Scratch' is 3 days overdue. Fine: ₹120",
                date(2024, 1, 18),
                false,
            )],
            wishlist: Vec::new(),
        },
        Borrower {
            id: 3,
            student_id: "2023005".into(),
            name: "Rahul Verma".into(),
            email: "rahul.verma@college.edu".into(),
            phone: "+91 9876543212".into(),
            department: "BSC-AIML".into(),
            year: "1st".into(),
            semester: "Sem 2".into(),
            status: BorrowerStatus::Inactive,
            membership: Membership::Standard,
            joined_date: Some(date(2023, 7, 1)),
            last_activity: Some(date(2023, 12, 20)),
            total_borrowed: 5,
            currently_borrowed: 0,
            overdue_count: 0,
            fines: 0,
            max_books_allowed: 3,
            borrowing_history: vec![loan(
                4,
                5,
                "Artificial Intelligence: A Modern Approach",
                date(2023, 12, 1),
                date(2023, 12, 31),
                Some(date(2023, 12, 20)),
                RecordStatus::Returned,
                0,
                0,
            )],
            notifications: Vec::new(),
            wishlist: Vec::new(),
        },
        Borrower {
            id: 4,
            student_id: "2020007".into(),
            name: "Sneha Krishnan".into(),
            email: "sneha.krishnan@college.edu".into(),
            phone: "+91 9876543213".into(),
            department: "BCA".into(),
            year: "3rd".into(),
            semester: "Sem 6".into(),
            status: BorrowerStatus::Suspended,
            membership: Membership::Standard,
            joined_date: Some(date(2020, 7, 1)),
            last_activity: Some(date(2023, 11, 15)),
            total_borrowed: 42,
            currently_borrowed: 0,
            overdue_count: 3,
            fines: 450,
            max_books_allowed: 0,
            borrowing_history: Vec::new(),
            notifications: vec![notice(
                3,
                NotificationType::Suspension,
                "Account suspended due to excessive fines. Please contact administration.",
                date(2023, 11, 20),
                true,
            )],
            wishlist: Vec::new(),
        },
    ]
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            books: sample_books(),
            borrowers: sample_borrowers(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_is_valid() {
        let seed = Seed::default();
        assert!(seed.validate().is_ok());
        assert_eq!(seed.books.len(), 5);
        assert_eq!(seed.borrowers.len(), 4);
    }

    #[test]
    fn test_validate_rejects_available_above_quantity() {
        let mut seed = Seed::default();
        seed.books[0].available = seed.books[0].quantity + 1;
        assert!(seed.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_book_ids() {
        let mut seed = Seed::default();
        seed.books[1].id = seed.books[0].id;
        assert!(seed.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_malformed_student_id() {
        let mut seed = Seed::default();
        seed.borrowers[0].student_id = "21-001".to_string();
        assert!(seed.validate().is_err());
    }

    #[test]
    fn test_parses_hand_written_toml_seed() {
        let seed: Seed = toml::from_str(
            r#"
            [[books]]
            id = 10
            title = "Linear Algebra Done Right"
            author = "Sheldon Axler"
            category = "Mathematics"
            tags = ["linear algebra"]
            quantity = 2
            available = 2
            condition = "Good"
            publishedYear = 2015

            [[borrowers]]
            id = 7
            studentId = "2024010"
            name = "Meera Iyer"
            status = "Active"
            membership = "Faculty"
            maxBooksAllowed = 10

            [[borrowers.borrowingHistory]]
            id = 1
            bookId = 10
            borrowedDate = "2024-03-01"
            dueDate = "2024-03-31"
            status = "borrowed"
            "#,
        )
        .unwrap();

        assert!(seed.validate().is_ok());
        assert_eq!(seed.books[0].category, Category::Mathematics);
        assert_eq!(seed.books[0].borrow_count, 0);
        let record = &seed.borrowers[0].borrowing_history[0];
        assert_eq!(record.status, RecordStatus::Borrowed);
        assert_eq!(record.returned_date, None);
    }
}

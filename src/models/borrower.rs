//! Borrower, loan and notification records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::book::BookId;

pub type BorrowerId = u64;

labeled_enum! {
    /// Account standing. Active and Suspended flip via admin action;
    /// Inactive is only ever seeded.
    pub enum BorrowerStatus {
        Active => "Active",
        Inactive => "Inactive",
        Suspended => "Suspended",
    }
}

labeled_enum! {
    /// Membership tier, which sets the borrowing limit.
    pub enum Membership {
        Standard => "Standard",
        Premium => "Premium",
        Faculty => "Faculty",
    }
}

labeled_enum! {
    /// Loan state. Both transitions out of `borrowed` are one-way.
    pub enum RecordStatus {
        Borrowed => "borrowed",
        Returned => "returned",
        Overdue => "overdue",
    }
}

labeled_enum! {
    pub enum NotificationType {
        Due => "due",
        Available => "available",
        Overdue => "overdue",
        Reminder => "reminder",
        Suspension => "suspension",
    }
}

/// A single loan of one copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRecord {
    pub id: u64,

    /// Weak reference; deleting the book leaves the record in place
    pub book_id: BookId,

    /// Title captured when the loan was made
    #[serde(default)]
    pub book_title: String,

    pub borrowed_date: NaiveDate,

    pub due_date: NaiveDate,

    #[serde(default)]
    pub returned_date: Option<NaiveDate>,

    pub status: RecordStatus,

    #[serde(default)]
    pub renewal_count: u32,

    /// Late fine attached to this loan
    #[serde(default)]
    pub fine: u32,
}

impl BorrowRecord {
    /// Whether the copy is still out (borrowed or overdue).
    pub fn is_open(&self) -> bool {
        self.status != RecordStatus::Returned
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,

    #[serde(rename = "type")]
    pub kind: NotificationType,

    #[serde(default)]
    pub title: String,

    pub message: String,

    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Relative time label such as "2 hours ago"
    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    pub read: bool,
}

/// A library member with borrowing privileges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Borrower {
    pub id: BorrowerId,

    /// Seven-digit student number
    pub student_id: String,

    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub department: String,

    #[serde(default)]
    pub year: String,

    #[serde(default)]
    pub semester: String,

    pub status: BorrowerStatus,

    pub membership: Membership,

    #[serde(default)]
    pub joined_date: Option<NaiveDate>,

    #[serde(default)]
    pub last_activity: Option<NaiveDate>,

    #[serde(default)]
    pub total_borrowed: u32,

    #[serde(default)]
    pub currently_borrowed: u32,

    #[serde(default)]
    pub overdue_count: u32,

    /// Accumulated unpaid fines
    #[serde(default)]
    pub fines: u32,

    /// Borrowing capacity; zero while suspended
    pub max_books_allowed: u32,

    #[serde(default)]
    pub borrowing_history: Vec<BorrowRecord>,

    #[serde(default)]
    pub notifications: Vec<Notification>,

    /// Books of interest, not borrowed
    #[serde(default)]
    pub wishlist: Vec<BookId>,
}

impl Borrower {
    pub fn record(&self, record_id: u64) -> Option<&BorrowRecord> {
        self.borrowing_history.iter().find(|r| r.id == record_id)
    }

    pub fn record_mut(&mut self, record_id: u64) -> Option<&mut BorrowRecord> {
        self.borrowing_history.iter_mut().find(|r| r.id == record_id)
    }

    /// Loans that are still out.
    pub fn open_records(&self) -> impl Iterator<Item = &BorrowRecord> {
        self.borrowing_history.iter().filter(|r| r.is_open())
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub(crate) fn next_notification_id(&self) -> u64 {
        self.notifications.iter().map(|n| n.id).max().unwrap_or(0) + 1
    }

    /// Append an unread notification dated `today`.
    pub fn notify(
        &mut self,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        today: NaiveDate,
    ) {
        let id = self.next_notification_id();
        self.notifications.push(Notification {
            id,
            kind,
            title: title.into(),
            message: message.into(),
            date: Some(today),
            time: None,
            read: false,
        });
    }
}

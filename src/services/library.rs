// src/services/library.rs

//! Circulation service.
//!
//! Holds the catalog and the borrower roster in memory and applies every
//! state-changing action the two portals offer: catalog edits, borrowing,
//! returns, renewals, the overdue sweep and account administration.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::error::{AppError, Result};
use crate::models::{
    Book, BookId, BookStatus, BorrowRecord, Borrower, BorrowerId, BorrowerStatus, Config,
    DEFAULT_COVER, NewBook, NotificationType, RecordStatus, Seed,
};
use crate::pipeline::{
    BorrowerQuery, CatalogQuery, RosterStats, all_tags, can_renew,
    due::{days_late, days_until_due, late_fine, sweep_borrower},
    renewal::renewed_due_date,
};

/// Which reminder an administrator sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderKind {
    Return,
    Renewal,
}

/// In-memory library state plus the rules that mutate it.
pub struct Library {
    books: Vec<Book>,
    borrowers: Vec<Borrower>,
    config: Arc<Config>,
}

impl Library {
    pub fn new(seed: Seed, config: Arc<Config>) -> Self {
        Self {
            books: seed.books,
            borrowers: seed.borrowers,
            config,
        }
    }

    /// Copy of the current state, in the shape it is persisted in.
    pub fn snapshot(&self) -> Seed {
        Seed {
            books: self.books.clone(),
            borrowers: self.borrowers.clone(),
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn borrowers(&self) -> &[Borrower] {
        &self.borrowers
    }

    pub fn book(&self, id: BookId) -> Result<&Book> {
        self.books
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found("Book", id))
    }

    pub fn borrower(&self, id: BorrowerId) -> Result<&Borrower> {
        self.borrowers
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found("Borrower", id))
    }

    pub fn borrower_by_student_id(&self, student_id: &str) -> Result<&Borrower> {
        self.borrowers
            .iter()
            .find(|b| b.student_id == student_id)
            .ok_or_else(|| AppError::not_found("Student", student_id))
    }

    fn book_index(&self, id: BookId) -> Result<usize> {
        self.books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::not_found("Book", id))
    }

    fn borrower_mut(&mut self, id: BorrowerId) -> Result<&mut Borrower> {
        self.borrowers
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found("Borrower", id))
    }

    pub fn search_catalog(&self, query: &CatalogQuery) -> Vec<&Book> {
        query.apply(&self.books)
    }

    pub fn search_roster(&self, query: &BorrowerQuery) -> Vec<&Borrower> {
        query.apply(&self.borrowers)
    }

    pub fn stats(&self) -> RosterStats {
        RosterStats::collect(&self.borrowers)
    }

    pub fn all_tags(&self) -> Vec<&str> {
        all_tags(&self.books)
    }

    // ---- Catalog administration ----

    /// Add a book from the admin form.
    ///
    /// The id is the creation timestamp in milliseconds, bumped past the
    /// largest existing id when two books land in the same millisecond.
    pub fn add_book(&mut self, form: NewBook, now: DateTime<Utc>) -> Result<&Book> {
        let title = form.title.trim();
        let author = form.author.trim();
        let Some(category) = form.category else {
            return Err(AppError::validation("Please fill in all required fields"));
        };
        if title.is_empty() || author.is_empty() {
            return Err(AppError::validation("Please fill in all required fields"));
        }
        if form.quantity == 0 {
            return Err(AppError::validation("Quantity must be at least 1"));
        }

        let stamp = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let next_free = self.books.iter().map(|b| b.id + 1).max().unwrap_or(0);
        let id = stamp.max(next_free);

        let tags = form
            .tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        let cover_images = if form.cover_images.is_empty() {
            vec![DEFAULT_COVER.to_string()]
        } else {
            form.cover_images
        };

        let book = Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            category,
            tags,
            isbn: form.isbn,
            quantity: form.quantity,
            available: form.quantity,
            condition: form.condition,
            location: form.location,
            cover_images,
            description: form.description,
            published_year: form.published_year,
            pages: form.pages,
            rating: 0.0,
            borrow_count: 0,
            last_borrowed: None,
            added_date: Some(now.date_naive()),
            status: BookStatus::Available,
        };
        log::info!("Added book {} \"{}\"", book.id, book.title);
        self.books.push(book);

        let last = self.books.len() - 1;
        Ok(&self.books[last])
    }

    pub fn delete_book(&mut self, id: BookId) -> Result<Book> {
        let index = self.book_index(id)?;
        let book = self.books.remove(index);
        log::info!("Deleted book {} \"{}\"", book.id, book.title);
        Ok(book)
    }

    /// Delete every selected book; ids not in the catalog are skipped.
    pub fn bulk_delete(&mut self, ids: &[BookId]) -> Result<usize> {
        if ids.is_empty() {
            return Err(AppError::validation("No books selected"));
        }
        let before = self.books.len();
        self.books.retain(|b| !ids.contains(&b.id));
        let removed = before - self.books.len();
        log::info!("Bulk delete removed {} of {} selected books", removed, ids.len());
        Ok(removed)
    }

    // ---- Circulation ----

    fn next_record_id(&self) -> u64 {
        self.borrowers
            .iter()
            .flat_map(|b| b.borrowing_history.iter())
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Lend one copy of a book.
    pub fn borrow(
        &mut self,
        borrower_id: BorrowerId,
        book_id: BookId,
        now: DateTime<Utc>,
    ) -> Result<BorrowRecord> {
        let today = now.date_naive();
        let book_index = self.book_index(book_id)?;
        let record_id = self.next_record_id();
        let loan_days = self.config.policy.loan_period_days;

        let borrower = self.borrower(borrower_id)?;
        if borrower.status != BorrowerStatus::Active {
            return Err(AppError::circulation(format!(
                "{} cannot borrow while {}",
                borrower.name,
                borrower.status.as_str().to_lowercase()
            )));
        }
        // The tier limit caps whatever the account record says
        let limit = borrower
            .max_books_allowed
            .min(self.config.membership.limit_for(borrower.membership));
        let open = borrower.open_records().count() as u32;
        if open >= limit {
            return Err(AppError::circulation(format!(
                "{} has reached the limit of {} books",
                borrower.name, limit
            )));
        }
        if borrower.open_records().any(|r| r.book_id == book_id) {
            return Err(AppError::circulation(format!(
                "{} already has a copy of this book",
                borrower.name
            )));
        }

        let book = &mut self.books[book_index];
        if !book.is_available() {
            return Err(AppError::Unavailable(book.title.clone()));
        }
        book.available -= 1;
        book.borrow_count += 1;
        book.last_borrowed = Some(today);
        book.refresh_status();

        let record = BorrowRecord {
            id: record_id,
            book_id,
            book_title: book.title.clone(),
            borrowed_date: today,
            due_date: today + Duration::days(i64::from(loan_days)),
            returned_date: None,
            status: RecordStatus::Borrowed,
            renewal_count: 0,
            fine: 0,
        };

        let borrower = self.borrower_mut(borrower_id)?;
        borrower.currently_borrowed += 1;
        borrower.total_borrowed += 1;
        borrower.last_activity = Some(today);
        borrower.borrowing_history.push(record.clone());

        log::info!(
            "{} borrowed \"{}\", due {}",
            borrower.student_id,
            record.book_title,
            record.due_date
        );
        Ok(record)
    }

    /// Return a loan, charging any late fine.
    pub fn return_book(
        &mut self,
        borrower_id: BorrowerId,
        record_id: u64,
        now: DateTime<Utc>,
    ) -> Result<BorrowRecord> {
        let today = now.date_naive();
        let fine_per_day = self.config.policy.fine_per_day;

        let borrower = self.borrower_mut(borrower_id)?;
        let record = borrower
            .record_mut(record_id)
            .ok_or_else(|| AppError::not_found("Loan", record_id))?;
        if !record.is_open() {
            return Err(AppError::circulation("This book has already been returned"));
        }

        let fine = late_fine(days_late(record.due_date, today), fine_per_day);
        let added = fine.saturating_sub(record.fine);
        record.fine = record.fine.max(fine);
        record.status = RecordStatus::Returned;
        record.returned_date = Some(today);
        let returned = record.clone();

        borrower.fines = borrower.fines.saturating_add(added);
        borrower.currently_borrowed = borrower.currently_borrowed.saturating_sub(1);
        borrower.last_activity = Some(today);
        log::info!(
            "{} returned \"{}\" (fine ₹{})",
            borrower.student_id,
            returned.book_title,
            returned.fine
        );

        match self.books.iter_mut().find(|b| b.id == returned.book_id) {
            Some(book) => {
                book.available = (book.available + 1).min(book.quantity);
                book.refresh_status();
            }
            None => log::debug!("Returned book {} is no longer in the catalog", returned.book_id),
        }
        Ok(returned)
    }

    /// Push a loan's due date back by one renewal period.
    pub fn renew(
        &mut self,
        borrower_id: BorrowerId,
        record_id: u64,
        now: DateTime<Utc>,
    ) -> Result<BorrowRecord> {
        let policy = &self.config.policy;
        let (max_renewals, renewal_days) = (policy.max_renewals, policy.renewal_period_days);

        let borrower = self.borrower_mut(borrower_id)?;
        let record = borrower
            .record_mut(record_id)
            .ok_or_else(|| AppError::not_found("Loan", record_id))?;
        match record.status {
            RecordStatus::Returned => {
                return Err(AppError::circulation("Returned books cannot be renewed"));
            }
            RecordStatus::Overdue => {
                return Err(AppError::circulation("Overdue books cannot be renewed"));
            }
            RecordStatus::Borrowed if days_until_due(record.due_date, now) < 0 => {
                return Err(AppError::circulation("Overdue books cannot be renewed"));
            }
            RecordStatus::Borrowed => {}
        }
        if !can_renew(record.renewal_count, max_renewals) {
            return Err(AppError::circulation(format!(
                "Maximum renewals ({}) reached",
                max_renewals
            )));
        }

        record.due_date = renewed_due_date(record.due_date, renewal_days);
        record.renewal_count += 1;
        let renewed = record.clone();
        borrower.last_activity = Some(now.date_naive());

        log::info!(
            "{} renewed \"{}\" until {} ({}/{})",
            borrower.student_id,
            renewed.book_title,
            renewed.due_date,
            renewed.renewal_count,
            max_renewals
        );
        Ok(renewed)
    }

    /// Flip lapsed loans to overdue across the whole roster.
    ///
    /// Safe to run on every read: loans already overdue only have their
    /// fine brought up to date. Returns the number of newly overdue loans.
    pub fn sweep_overdue(&mut self, now: DateTime<Utc>) -> usize {
        let fine_per_day = self.config.policy.fine_per_day;
        let flipped: usize = self
            .borrowers
            .iter_mut()
            .map(|b| sweep_borrower(b, now, fine_per_day).len())
            .sum();
        if flipped > 0 {
            log::info!("Overdue sweep flagged {} loan(s)", flipped);
        } else {
            log::debug!("Overdue sweep found nothing new");
        }
        flipped
    }

    // ---- Borrower administration ----

    pub fn suspend(&mut self, borrower_id: BorrowerId, today: NaiveDate) -> Result<()> {
        let borrower = self.borrower_mut(borrower_id)?;
        borrower.status = BorrowerStatus::Suspended;
        borrower.max_books_allowed = 0;
        borrower.notify(
            NotificationType::Suspension,
            "Account Suspended",
            "Account suspended. Please contact administration.",
            today,
        );
        log::info!("Suspended {}", borrower.student_id);
        Ok(())
    }

    /// Reactivate an account with the reactivation limit, capped by its tier.
    pub fn activate(&mut self, borrower_id: BorrowerId) -> Result<()> {
        let config = Arc::clone(&self.config);
        let borrower = self.borrower_mut(borrower_id)?;
        let limit = config
            .policy
            .reactivated_limit
            .min(config.membership.limit_for(borrower.membership));
        borrower.status = BorrowerStatus::Active;
        borrower.max_books_allowed = limit;
        log::info!("Activated {} with a limit of {}", borrower.student_id, limit);
        Ok(())
    }

    /// Clear a borrower's fine balance. Returns the amount waived.
    pub fn waive_fine(&mut self, borrower_id: BorrowerId) -> Result<u32> {
        let borrower = self.borrower_mut(borrower_id)?;
        let waived = std::mem::take(&mut borrower.fines);
        log::info!("Waived ₹{} for {}", waived, borrower.student_id);
        Ok(waived)
    }

    pub fn send_reminder(
        &mut self,
        borrower_id: BorrowerId,
        kind: ReminderKind,
        today: NaiveDate,
    ) -> Result<()> {
        let borrower = self.borrower_mut(borrower_id)?;
        let (title, message) = match kind {
            ReminderKind::Return => (
                "Return Reminder",
                "Please return your borrowed books by their due dates.",
            ),
            ReminderKind::Renewal => (
                "Renewal Reminder",
                "Your loans are due soon. Renew them to keep reading.",
            ),
        };
        borrower.notify(NotificationType::Reminder, title, message, today);
        log::info!("Sent {:?} reminder to {}", kind, borrower.student_id);
        Ok(())
    }

    // ---- Borrower self-service ----

    /// Add or remove a book from the wishlist. Returns `true` when added.
    pub fn toggle_wishlist(&mut self, borrower_id: BorrowerId, book_id: BookId) -> Result<bool> {
        self.book(book_id)?;
        let borrower = self.borrower_mut(borrower_id)?;
        match borrower.wishlist.iter().position(|id| *id == book_id) {
            Some(index) => {
                borrower.wishlist.remove(index);
                Ok(false)
            }
            None => {
                borrower.wishlist.push(book_id);
                Ok(true)
            }
        }
    }

    pub fn mark_read(&mut self, borrower_id: BorrowerId, notification_id: u64) -> Result<()> {
        let borrower = self.borrower_mut(borrower_id)?;
        let notification = borrower
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| AppError::not_found("Notification", notification_id))?;
        notification.read = true;
        Ok(())
    }

    pub fn mark_all_read(&mut self, borrower_id: BorrowerId) -> Result<()> {
        let borrower = self.borrower_mut(borrower_id)?;
        borrower.notifications.iter_mut().for_each(|n| n.read = true);
        Ok(())
    }

    pub fn unread_count(&self, borrower_id: BorrowerId) -> Result<usize> {
        Ok(self.borrower(borrower_id)?.unread_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Condition};
    use chrono::TimeZone;

    fn library() -> Library {
        Library::new(Seed::default(), Arc::new(Config::default()))
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Sheldon Axler".to_string(),
            category: Some(Category::Mathematics),
            tags: vec![" linear algebra ".to_string(), "".to_string()],
            ..NewBook::blank(2024)
        }
    }

    #[test]
    fn test_add_book_fills_defaults() {
        let mut lib = library();
        let now = at(2024, 3, 1);
        let book = lib.add_book(new_book("Linear Algebra Done Right"), now).unwrap();

        assert_eq!(book.id, now.timestamp_millis() as u64);
        assert_eq!(book.available, book.quantity);
        assert_eq!(book.tags, vec!["linear algebra"]);
        assert_eq!(book.cover_images, vec![DEFAULT_COVER]);
        assert_eq!(book.borrow_count, 0);
        assert_eq!(book.condition, Condition::Good);
        assert_eq!(lib.books().len(), 6);
    }

    #[test]
    fn test_add_book_ids_stay_unique_within_a_millisecond() {
        let mut lib = library();
        let now = at(2024, 3, 1);
        let first = lib.add_book(new_book("One"), now).unwrap().id;
        let second = lib.add_book(new_book("Two"), now).unwrap().id;
        assert_eq!(second, first + 1);
    }

    #[test]
    fn test_add_book_requires_fields() {
        let mut lib = library();
        let mut form = new_book("Untitled");
        form.category = None;
        assert!(matches!(
            lib.add_book(form, at(2024, 3, 1)),
            Err(AppError::Validation(_))
        ));
        assert!(lib.add_book(new_book("   "), at(2024, 3, 1)).is_err());
        assert_eq!(lib.books().len(), 5);
    }

    #[test]
    fn test_delete_and_bulk_delete() {
        let mut lib = library();
        assert_eq!(lib.delete_book(2).unwrap().id, 2);
        assert!(matches!(lib.delete_book(2), Err(AppError::NotFound { .. })));

        assert!(lib.bulk_delete(&[]).is_err());
        assert_eq!(lib.bulk_delete(&[1, 3, 99]).unwrap(), 2);
        let left: Vec<_> = lib.books().iter().map(|b| b.id).collect();
        assert_eq!(left, vec![4, 5]);
    }

    #[test]
    fn test_borrow_and_return_keep_copy_counts() {
        let mut lib = library();
        let now = at(2024, 1, 20);
        let record = lib.borrow(1, 3, now).unwrap();

        assert_eq!(record.id, 5);
        assert_eq!(record.due_date, NaiveDate::from_ymd_opt(2024, 2, 19).unwrap());
        assert_eq!(lib.book(3).unwrap().available, 3);
        assert_eq!(lib.book(3).unwrap().borrow_count, 63);
        assert_eq!(lib.borrower(1).unwrap().currently_borrowed, 3);

        let returned = lib.return_book(1, record.id, at(2024, 2, 1)).unwrap();
        assert_eq!(returned.status, RecordStatus::Returned);
        assert_eq!(returned.fine, 0);
        assert_eq!(lib.book(3).unwrap().available, 4);
        assert_eq!(lib.borrower(1).unwrap().currently_borrowed, 2);

        assert!(lib.return_book(1, record.id, at(2024, 2, 2)).is_err());
    }

    #[test]
    fn test_late_return_charges_fine() {
        let mut lib = library();
        let returned = lib.return_book(1, 2, at(2024, 2, 8)).unwrap();
        assert_eq!(returned.fine, 120);
        assert_eq!(lib.borrower(1).unwrap().fines, 120);
    }

    #[test]
    fn test_return_after_sweep_does_not_double_charge() {
        let mut lib = library();
        assert_eq!(lib.sweep_overdue(at(2024, 2, 8)), 1);
        assert_eq!(lib.borrower(1).unwrap().fines, 120);

        let returned = lib.return_book(1, 2, at(2024, 2, 9)).unwrap();
        assert_eq!(returned.fine, 160);
        assert_eq!(lib.borrower(1).unwrap().fines, 160);
    }

    #[test]
    fn test_return_never_exceeds_quantity() {
        let mut lib = library();
        // Seeded loan of book 4 while the shelf count is already restored
        lib.books.iter_mut().find(|b| b.id == 4).unwrap().available = 4;
        lib.return_book(2, 3, at(2024, 1, 20)).unwrap();
        let book = lib.book(4).unwrap();
        assert_eq!(book.available, book.quantity);
    }

    #[test]
    fn test_borrow_rules() {
        let mut lib = library();
        let now = at(2024, 1, 20);

        // Suspended and inactive members cannot borrow
        assert!(matches!(lib.borrow(4, 1, now), Err(AppError::Circulation(_))));
        assert!(matches!(lib.borrow(3, 1, now), Err(AppError::Circulation(_))));
        // Already holding a copy
        assert!(matches!(lib.borrow(1, 1, now), Err(AppError::Circulation(_))));

        // No copies left
        lib.books.iter_mut().find(|b| b.id == 5).unwrap().available = 0;
        assert!(matches!(lib.borrow(2, 5, now), Err(AppError::Unavailable(_))));

        // Standard limit of 3 with one loan already out
        lib.borrow(2, 1, now).unwrap();
        lib.borrow(2, 2, now).unwrap();
        assert!(matches!(lib.borrow(2, 3, now), Err(AppError::Circulation(_))));
    }

    #[test]
    fn test_available_never_exceeds_quantity_under_churn() {
        let mut lib = library();
        let now = at(2024, 1, 20);
        for _ in 0..4 {
            let record = lib.borrow(2, 5, now).unwrap();
            lib.return_book(2, record.id, now).unwrap();
        }
        let book = lib.book(5).unwrap();
        assert!(book.available <= book.quantity);
        assert_eq!(book.available, 5);
        assert_eq!(book.borrow_count, 32);
    }

    #[test]
    fn test_renewal_cap() {
        let mut lib = library();
        let now = at(2024, 1, 20);

        // Clean Code has one renewal already, the cap is two
        let renewed = lib.renew(1, 2, now).unwrap();
        assert_eq!(renewed.renewal_count, 2);
        assert_eq!(renewed.due_date, NaiveDate::from_ymd_opt(2024, 2, 19).unwrap());
        assert!(matches!(lib.renew(1, 2, now), Err(AppError::Circulation(_))));

        // Returned and overdue loans are not renewable
        assert!(lib.renew(3, 4, now).is_err());
        assert!(lib.renew(2, 3, now).is_err());
    }

    #[test]
    fn test_past_due_loan_cannot_be_renewed_before_sweep() {
        let mut lib = library();
        // Clean Code fell due on 2024-02-05 and no sweep has run yet
        let late = at(2024, 3, 5);
        assert!(matches!(lib.renew(1, 2, late), Err(AppError::Circulation(_))));

        let record = lib.borrower(1).unwrap().record(2).unwrap().clone();
        assert_eq!(record.due_date, NaiveDate::from_ymd_opt(2024, 2, 5).unwrap());
        assert_eq!(record.renewal_count, 1);

        lib.sweep_overdue(late);
        assert_eq!(lib.borrower(1).unwrap().record(2).unwrap().fine, 29 * 40);
    }

    #[test]
    fn test_membership_tier_caps_borrowing() {
        let mut config = Config::default();
        config.membership.premium = 1;
        config.membership.standard = 2;
        let mut lib = Library::new(Seed::default(), Arc::new(config));
        let now = at(2024, 1, 20);

        // Arjun is Premium with two loans out and a stored limit of 5
        assert!(matches!(lib.borrow(1, 5, now), Err(AppError::Circulation(_))));

        // Sneha is Standard; reactivation gives min(3, 2)
        lib.activate(4).unwrap();
        assert_eq!(lib.borrower(4).unwrap().max_books_allowed, 2);
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let mut lib = library();
        let now = at(2024, 2, 8);
        assert_eq!(lib.sweep_overdue(now), 1);
        let after_first = lib.snapshot();
        assert_eq!(lib.sweep_overdue(now), 0);
        assert_eq!(lib.snapshot().borrowers, after_first.borrowers);
    }

    #[test]
    fn test_suspend_and_activate() {
        let mut lib = library();
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();

        lib.suspend(1, today).unwrap();
        let arjun = lib.borrower(1).unwrap();
        assert_eq!(arjun.status, BorrowerStatus::Suspended);
        assert_eq!(arjun.max_books_allowed, 0);
        assert_eq!(arjun.notifications.last().unwrap().kind, NotificationType::Suspension);

        lib.activate(4).unwrap();
        let sneha = lib.borrower(4).unwrap();
        assert_eq!(sneha.status, BorrowerStatus::Active);
        assert_eq!(sneha.max_books_allowed, 3);
    }

    #[test]
    fn test_waive_fine_and_reminders() {
        let mut lib = library();
        assert_eq!(lib.waive_fine(4).unwrap(), 450);
        assert_eq!(lib.borrower(4).unwrap().fines, 0);

        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        lib.send_reminder(3, ReminderKind::Renewal, today).unwrap();
        let rahul = lib.borrower(3).unwrap();
        assert_eq!(rahul.notifications.len(), 1);
        assert_eq!(rahul.notifications[0].kind, NotificationType::Reminder);
        assert_eq!(rahul.notifications[0].title, "Renewal Reminder");
    }

    #[test]
    fn test_wishlist_toggle() {
        let mut lib = library();
        assert!(lib.toggle_wishlist(1, 5).unwrap());
        assert_eq!(lib.borrower(1).unwrap().wishlist, vec![5]);
        assert!(!lib.toggle_wishlist(1, 5).unwrap());
        assert!(lib.borrower(1).unwrap().wishlist.is_empty());
        assert!(lib.toggle_wishlist(1, 42).is_err());
    }

    #[test]
    fn test_notifications_read_state() {
        let mut lib = library();
        assert_eq!(lib.unread_count(1).unwrap(), 1);
        lib.mark_read(1, 1).unwrap();
        assert_eq!(lib.unread_count(1).unwrap(), 0);
        assert!(lib.mark_read(1, 99).is_err());

        lib.mark_all_read(2).unwrap();
        assert_eq!(lib.unread_count(2).unwrap(), 0);
    }

    #[test]
    fn test_lookups_and_stats() {
        let lib = library();
        assert_eq!(lib.borrower_by_student_id("2022003").unwrap().id, 2);
        assert!(lib.borrower_by_student_id("9999999").is_err());
        assert_eq!(lib.stats().suspended, 1);
        assert_eq!(lib.all_tags().len(), 13);

        let query = CatalogQuery {
            search: "data".into(),
            ..Default::default()
        };
        assert_eq!(lib.search_catalog(&query).len(), 2);
        let query = BorrowerQuery {
            status: Some(BorrowerStatus::Suspended),
            ..Default::default()
        };
        assert_eq!(lib.search_roster(&query)[0].name, "Sneha Krishnan");
    }
}

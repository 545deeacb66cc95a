//! Borrower roster search and summary figures.

use crate::models::{Borrower, BorrowerStatus, Membership};
use crate::utils::contains_ignore_case;

/// Search text plus exact-match filters. `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct BorrowerQuery {
    pub search: String,
    pub status: Option<BorrowerStatus>,
    pub membership: Option<Membership>,
}

impl BorrowerQuery {
    /// Name and email match case-insensitively; the student ID is a plain
    /// substring match.
    pub fn matches(&self, borrower: &Borrower) -> bool {
        let search = self.search.as_str();
        let text_hit = contains_ignore_case(&borrower.name, search)
            || borrower.student_id.contains(search)
            || contains_ignore_case(&borrower.email, search);

        text_hit
            && self.status.is_none_or(|s| borrower.status == s)
            && self.membership.is_none_or(|m| borrower.membership == m)
    }

    pub fn apply<'a>(&self, borrowers: &'a [Borrower]) -> Vec<&'a Borrower> {
        borrowers.iter().filter(|b| self.matches(b)).collect()
    }
}

/// Headline numbers for the borrower management screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub suspended: usize,
    pub premium: usize,
    pub total_fines: u64,
    pub total_overdue: u64,
}

impl RosterStats {
    pub fn collect<'a>(borrowers: impl IntoIterator<Item = &'a Borrower>) -> Self {
        borrowers.into_iter().fold(Self::default(), |mut stats, b| {
            stats.total += 1;
            match b.status {
                BorrowerStatus::Active => stats.active += 1,
                BorrowerStatus::Inactive => stats.inactive += 1,
                BorrowerStatus::Suspended => stats.suspended += 1,
            }
            if b.membership == Membership::Premium {
                stats.premium += 1;
            }
            stats.total_fines += u64::from(b.fines);
            stats.total_overdue += u64::from(b.overdue_count);
            stats
        })
    }
}

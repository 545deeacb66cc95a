//! Pure derivations over library state.
//!
//! - `catalog` / `roster`: search, filter and sort
//! - `due` / `renewal`: loan timing rules and the overdue sweep
//! - `badges`, `strength`, `gamification`: display classifications
//! - `validate`: field formats and form checks

pub mod badges;
pub mod catalog;
pub mod due;
pub mod gamification;
pub mod renewal;
pub mod roster;
pub mod strength;
pub mod validate;

use std::str::FromStr;

pub use badges::{Availability, fine_badge, ratio_badge};
pub use catalog::{CatalogQuery, SearchScope, SortKey, all_tags};
pub use due::{DueStatus, classify, days_until_due};
pub use gamification::{Level, gamification_level};
pub use renewal::can_renew;
pub use roster::{BorrowerQuery, RosterStats};
pub use strength::{Strength, password_score, password_strength};
pub use validate::{Field, FieldErrors, FormKind, check_field};

/// Parse a filter value where the sentinel `all` (or nothing) means no filter.
pub fn parse_filter<T: FromStr>(value: Option<&str>) -> std::result::Result<Option<T>, T::Err> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_parse_filter_sentinel() {
        assert_eq!(parse_filter::<Category>(None).unwrap(), None);
        assert_eq!(parse_filter::<Category>(Some("all")).unwrap(), None);
        assert_eq!(
            parse_filter::<Category>(Some("data science")).unwrap(),
            Some(Category::DataScience)
        );
        assert!(parse_filter::<Category>(Some("poetry")).is_err());
    }
}

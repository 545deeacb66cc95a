//! Availability and fine badges.

use std::fmt;

/// Shelf availability as shown to borrowers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Unavailable,
    FewLeft,
    Available,
}

impl Availability {
    pub fn from_count(available: u32) -> Self {
        match available {
            0 => Availability::Unavailable,
            1..=2 => Availability::FewLeft,
            _ => Availability::Available,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Availability::Unavailable => "Unavailable",
            Availability::FewLeft => "Few Left",
            Availability::Available => "Available",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw copies-on-shelf ratio used on the admin grid.
pub fn ratio_badge(available: u32, quantity: u32) -> String {
    format!("{available}/{quantity}")
}

pub fn fine_badge(fines: u32) -> String {
    if fines > 0 {
        format!("₹{fines} Fine")
    } else {
        "No Fines".to_string()
    }
}

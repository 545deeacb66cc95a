//! Reading-points levels.

/// Where a point total sits on the level ladder.
///
/// `progress` is points above the level's lower bound, not a fraction of
/// the level's width; the top level always reports 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
    pub level: u8,
    pub title: &'static str,
    pub progress: u32,
}

/// (exclusive upper bound, level, title, lower bound)
const LADDER: [(u32, u8, &str, u32); 4] = [
    (100, 1, "Book Explorer", 0),
    (300, 2, "Avid Reader", 100),
    (600, 3, "Book Scholar", 300),
    (1000, 4, "Library Champion", 600),
];

const TOP_LEVEL: Level = Level {
    level: 5,
    title: "Master Bibliophile",
    progress: 100,
};

pub fn gamification_level(points: u32) -> Level {
    LADDER
        .iter()
        .find(|(upper, ..)| points < *upper)
        .map(|&(_, level, title, lower)| Level {
            level,
            title,
            progress: points - lower,
        })
        .unwrap_or(TOP_LEVEL)
}

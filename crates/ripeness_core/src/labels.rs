//! Class labels of the ripeness model and the label-to-grade table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Class names in model output order.
pub const CLASS_NAMES: [&str; 9] = [
    "RottenBanana_3",
    "GreenApple_1",
    "GreenOrange_1",
    "FreshOrange_2",
    "RedApple_2",
    "RottenApple_3",
    "GreenBanana_2",
    "RottenOrange_3",
    "YellowBanana_1",
];

/// Fruit family recognised from a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fruit {
    Apple,
    Banana,
    Orange,
    Unknown,
}

impl fmt::Display for Fruit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Fruit::Apple => "Apple",
            Fruit::Banana => "Banana",
            Fruit::Orange => "Orange",
            Fruit::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// Fruit, ripeness grade and condition derived from a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FruitInfo {
    pub fruit: Fruit,
    /// 1 = unripe, 2 = ripe, 3 = rotten, 0 = unknown.
    pub grade: u8,
    pub condition: &'static str,
}

impl FruitInfo {
    pub const UNKNOWN: FruitInfo = FruitInfo::new(Fruit::Unknown, 0, "Cannot classify");

    const fn new(fruit: Fruit, grade: u8, condition: &'static str) -> Self {
        Self {
            fruit,
            grade,
            condition,
        }
    }
}

/// Map a classifier label to its fruit, grade and condition.
///
/// Matching is by substring, per fruit family, in a fixed order: the color or
/// state keyword is checked first and the family falls back to unripe. Labels
/// that match no family (or are absent/empty) yield [`FruitInfo::UNKNOWN`].
///
/// The table is kept exactly as trained against: `GreenBanana` reports grade 3
/// with condition "Unripe", and the orange ripe branch looks for
/// `"OrangeOrange"`, which no known label contains, so `FreshOrange_2` lands
/// on the unripe fallback.
pub fn fruit_info(label: Option<&str>) -> FruitInfo {
    let label = match label {
        Some(l) if !l.is_empty() => l,
        _ => return FruitInfo::UNKNOWN,
    };

    if label.contains("Banana") {
        if label.contains("Yellow") {
            return FruitInfo::new(Fruit::Banana, 2, "Ripe");
        }
        if label.contains("Green") {
            return FruitInfo::new(Fruit::Banana, 3, "Unripe");
        }
        if label.contains("Rotten") {
            return FruitInfo::new(Fruit::Banana, 3, "Rotten");
        }
        return FruitInfo::new(Fruit::Banana, 1, "Unripe");
    }

    if label.contains("Apple") {
        if label.contains("Red") {
            return FruitInfo::new(Fruit::Apple, 2, "Ripe");
        }
        if label.contains("Rotten") {
            return FruitInfo::new(Fruit::Apple, 3, "Rotten");
        }
        return FruitInfo::new(Fruit::Apple, 1, "Unripe");
    }

    if label.contains("Orange") {
        if label.contains("OrangeOrange") {
            return FruitInfo::new(Fruit::Orange, 2, "Ripe");
        }
        if label.contains("Rotten") {
            return FruitInfo::new(Fruit::Orange, 3, "Rotten");
        }
        return FruitInfo::new(Fruit::Orange, 1, "Unripe");
    }

    FruitInfo::UNKNOWN
}

/// One column of the reference gallery: a label folder and its caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeReference {
    pub label: &'static str,
    pub caption: &'static str,
}

const CAPTIONS: [&str; 3] = ["Grade 1 – Unripe", "Grade 2 – Ripe", "Grade 3 – Rotten"];

/// Reference folders shown for a fruit, ordered unripe, ripe, rotten.
pub fn reference_labels(fruit: Fruit) -> Option<[GradeReference; 3]> {
    let labels = match fruit {
        Fruit::Banana => ["GreenBanana_2", "YellowBanana_1", "RottenBanana_3"],
        Fruit::Apple => ["GreenApple_1", "RedApple_2", "RottenApple_3"],
        Fruit::Orange => ["GreenOrange_1", "FreshOrange_2", "RottenOrange_3"],
        Fruit::Unknown => return None,
    };
    Some([0, 1, 2].map(|i| GradeReference {
        label: labels[i],
        caption: CAPTIONS[i],
    }))
}

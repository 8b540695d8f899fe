//! Review domain entity and score aggregation

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// The six rating axes of a review, each on a 0–5 scale with one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingAxes {
    pub clean: Decimal,
    pub communication: Decimal,
    pub checkin: Decimal,
    pub accuracy: Decimal,
    pub location: Decimal,
    pub value: Decimal,
}

impl RatingAxes {
    pub fn uniform(score: Decimal) -> Self {
        Self {
            clean: score,
            communication: score,
            checkin: score,
            accuracy: score,
            location: score,
            value: score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewAuthor {
    pub name: String,
    pub profile_image: String,
}

#[derive(Debug, Clone)]
pub struct Review {
    pub id: i32,
    pub author: ReviewAuthor,
    pub ratings: RatingAxes,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Per-axis averages over a set of reviews; all zero when there are none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisAverages {
    pub clean: Decimal,
    pub accuracy: Decimal,
    pub communication: Decimal,
    pub location: Decimal,
    pub checkin: Decimal,
    pub value: Decimal,
}

/// One axis as shown on the detail page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisGrade {
    /// Rounded to one decimal
    pub average: Decimal,
    /// The exact average normalized to 0–100
    pub grade_value: i64,
}

impl AxisAverages {
    pub fn from_ratings(ratings: &[RatingAxes]) -> Self {
        if ratings.is_empty() {
            return Self::uniform(Decimal::ZERO);
        }
        let count = Decimal::from(ratings.len() as u64);
        let mean = |pick: fn(&RatingAxes) -> Decimal| {
            ratings.iter().map(pick).sum::<Decimal>() / count
        };
        Self {
            clean: mean(|r| r.clean),
            accuracy: mean(|r| r.accuracy),
            communication: mean(|r| r.communication),
            location: mean(|r| r.location),
            checkin: mean(|r| r.checkin),
            value: mean(|r| r.value),
        }
    }

    fn uniform(score: Decimal) -> Self {
        Self {
            clean: score,
            accuracy: score,
            communication: score,
            location: score,
            checkin: score,
            value: score,
        }
    }

    /// Axes in the order the detail page lists them.
    pub fn in_display_order(&self) -> [Decimal; 6] {
        [
            self.clean,
            self.accuracy,
            self.communication,
            self.location,
            self.checkin,
            self.value,
        ]
    }

    /// Mean of the six axis averages
    pub fn overall(&self) -> Decimal {
        self.in_display_order().iter().sum::<Decimal>() / Decimal::from(6)
    }

    pub fn grades(&self) -> [AxisGrade; 6] {
        self.in_display_order().map(|average| AxisGrade {
            average: fixed_scale(average, 1),
            grade_value: grade_value(average),
        })
    }
}

/// `round(average * 100 / 5)`, rounding half to even.
pub fn grade_value(average: Decimal) -> i64 {
    (average * Decimal::from(100) / Decimal::from(5))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_i64()
        .unwrap_or_default()
}

/// Round half to even and pad to exactly `scale` decimals, so `5` renders
/// as `5.00` for `scale = 2`.
pub fn fixed_scale(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(scale);
    rounded
}

/// Catalog grade of a listing: `"0"` without reviews, otherwise the overall
/// average with two decimals.
pub fn listing_grade(ratings: &[RatingAxes]) -> String {
    if ratings.is_empty() {
        return "0".to_string();
    }
    fixed_scale(AxisAverages::from_ratings(ratings).overall(), 2).to_string()
}

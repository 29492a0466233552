use serde::ser::{Serialize, SerializeMap, Serializer};

/// Bucket labels, in column order `field_rate_1` .. `field_rate_10`.
pub const LABELS: [&str; 10] = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"];

// ═══════════════════════════════════════════════════════════════
//  Histogram
// ═══════════════════════════════════════════════════════════════

/// Ten-bucket rating histogram. Index 0 holds label "1".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingHistogram([u32; 10]);

impl RatingHistogram {
    /// Build from the ten `field_rate_N` columns, in label order.
    pub fn from_columns(counts: [u32; 10]) -> Self {
        Self(counts)
    }

    /// Count for a bucket label `"1"` .. `"10"`.
    pub fn get(&self, label: &str) -> Option<u32> {
        LABELS.iter().position(|l| *l == label).map(|i| self.0[i])
    }

    /// `(label, count)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        LABELS.iter().copied().zip(self.0.iter().copied())
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }

    /// Σ label × count.
    pub fn weighted_sum(&self) -> u64 {
        self.0
            .iter()
            .zip(1u64..)
            .map(|(&c, label)| label * u64::from(c))
            .sum()
    }
}

impl Serialize for RatingHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(LABELS.len()))?;
        for (label, count) in self.iter() {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}

// ═══════════════════════════════════════════════════════════════
//  Score
// ═══════════════════════════════════════════════════════════════

/// Weighted score. Unrated subjects report integer `0`, not `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Unrated,
    /// Score in tenths, e.g. `62` is 6.2.
    Tenths(u64),
}

impl Score {
    pub fn as_f64(&self) -> f64 {
        match self {
            Score::Unrated => 0.0,
            Score::Tenths(t) => *t as f64 / 10.0,
        }
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Score::Unrated => serializer.serialize_u64(0),
            Score::Tenths(_) => serializer.serialize_f64(self.as_f64()),
        }
    }
}

/// `numerator / denominator` in tenths, rounding half to even on the exact quotient.
fn round_tenths_half_even(numerator: u64, denominator: u64) -> u64 {
    let scaled = numerator * 10;
    let q = scaled / denominator;
    let r = scaled % denominator;
    match (2 * r).cmp(&denominator) {
        std::cmp::Ordering::Less => q,
        std::cmp::Ordering::Greater => q + 1,
        std::cmp::Ordering::Equal => q + (q & 1),
    }
}

// ═══════════════════════════════════════════════════════════════
//  Rating
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Rating {
    pub rank: u32,
    pub score: Score,
    pub count: RatingHistogram,
    pub total: u64,
}

impl Rating {
    pub fn from_histogram(rank: u32, count: RatingHistogram) -> Self {
        let total = count.total();
        let score = if total == 0 {
            Score::Unrated
        } else {
            Score::Tenths(round_tenths_half_even(count.weighted_sum(), total))
        };
        Self { rank, score, count, total }
    }
}

/// Reduce the ten rating columns into a weighted score.
pub fn compute_rating(rank: u32, counts: [u32; 10]) -> Rating {
    Rating::from_histogram(rank, RatingHistogram::from_columns(counts))
}

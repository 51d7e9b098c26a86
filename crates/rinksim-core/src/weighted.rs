// Weighted random choice over (item, weight) pairs.
//
// All weighted draws in the simulator (starting goalie, assisters, goal
// minute) go through the same cumulative scan: draw `u` uniformly from
// `[0, total)` and take the first item whose running weight exceeds `u`.
// Keeping one scan order means a fixed seed replays the same season.

use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    #[error("weighted table has no entries")]
    Empty,

    #[error("weight at index {index} must be finite and >= 0, got {weight}")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("weights sum to zero")]
    ZeroTotal,
}

/// Non-finite and negative weights never win a draw.
fn usable(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Index selected by a draw already scaled to `[0, total)`.
///
/// Returns the first index whose cumulative weight strictly exceeds `draw`.
/// If round-off leaves the draw uncovered, the last positive-weight index is
/// returned. `None` only when no weight is positive.
pub fn index_at(weights: &[f64], draw: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    let mut last = None;
    for (i, &w) in weights.iter().enumerate() {
        let w = usable(w);
        if w == 0.0 {
            continue;
        }
        cumulative += w;
        if cumulative > draw {
            return Some(i);
        }
        last = Some(i);
    }
    last
}

/// Draw an index proportionally to `weights`.
pub fn choose_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().copied().map(usable).sum();
    if !(total > 0.0 && total.is_finite()) {
        return None;
    }
    let draw = rng.gen_range(0.0..total);
    index_at(weights, draw)
}

/// Draw an item proportionally to `weight(item)`.
pub fn choose_weighted<'a, T, R, F>(items: &'a [T], weight: F, rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> f64,
{
    let weights: Vec<f64> = items.iter().map(weight).collect();
    choose_index(&weights, rng).map(|i| &items[i])
}

// ---------------------------------------------------------------------------
// Precomputed table for static distributions
// ---------------------------------------------------------------------------

/// A fixed categorical distribution with precomputed cumulative weights.
///
/// Sampling is a binary search over the running totals and selects the same
/// item `choose_index` would for the same draw.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    items: Vec<T>,
    weights: Vec<f64>,
    cumulative: Vec<f64>,
}

impl<T> WeightedTable<T> {
    /// Build a table. Zero-weight entries are dropped since they can never
    /// be drawn; negative or non-finite weights are rejected.
    pub fn new<I>(entries: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut items = Vec::new();
        let mut weights = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0.0;
        let mut seen = 0usize;

        for (index, (item, weight)) in entries.into_iter().enumerate() {
            seen += 1;
            if !weight.is_finite() || weight < 0.0 {
                return Err(WeightError::InvalidWeight { index, weight });
            }
            if weight == 0.0 {
                continue;
            }
            total += weight;
            items.push(item);
            weights.push(weight);
            cumulative.push(total);
        }

        if seen == 0 {
            return Err(WeightError::Empty);
        }
        if items.is_empty() {
            return Err(WeightError::ZeroTotal);
        }

        Ok(WeightedTable {
            items,
            weights,
            cumulative,
        })
    }

    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries with positive weight, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.items.iter().zip(self.weights.iter().copied())
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        let draw = rng.gen_range(0.0..self.total());
        let idx = self.cumulative.partition_point(|&c| c <= draw);
        &self.items[idx.min(self.items.len() - 1)]
    }
}

// Goal timestamps drawn from a minute-of-game histogram.

use rand::Rng;
use rinksim_core::weighted::WeightedTable;

use crate::error::SimError;
use crate::model::GameClock;

/// Regulation minutes: 0 through 59.
pub const REGULATION_MINUTES: u32 = 60;

/// Relative frequency of goals by minute of regulation.
#[derive(Debug, Clone)]
pub struct GoalMinuteWeights {
    table: WeightedTable<u8>,
}

impl GoalMinuteWeights {
    /// Build from `(minute, weight)` pairs with minutes in `0..=59`.
    pub fn new<I>(weights: I) -> Result<Self, SimError>
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        let mut entries = Vec::new();
        for (minute, weight) in weights {
            if minute >= REGULATION_MINUTES {
                return Err(SimError::InvalidGoalMinute { minute });
            }
            entries.push((minute as u8, weight));
        }
        let table = WeightedTable::new(entries)?;
        Ok(GoalMinuteWeights { table })
    }

    /// Build from the published histogram, which labels minutes 1 through
    /// 60. Label `n` is minute `n - 1`; anything outside 1..=60 is ignored.
    pub fn from_minute_labels<I>(labels: I) -> Result<Self, SimError>
    where
        I: IntoIterator<Item = (i64, f64)>,
    {
        Self::new(labels.into_iter().filter_map(|(label, weight)| {
            let minute = label - 1;
            (0..REGULATION_MINUTES as i64)
                .contains(&minute)
                .then_some((minute as u32, weight))
        }))
    }

    /// Flat histogram over all sixty minutes.
    #[cfg(test)]
    pub(crate) fn uniform() -> Self {
        Self::new((0..REGULATION_MINUTES).map(|m| (m, 1.0))).unwrap()
    }

    pub fn draw_minute<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        *self.table.sample(rng)
    }

    /// Minute from the histogram, second uniform over 0..=59.
    pub fn draw_clock<R: Rng + ?Sized>(&self, rng: &mut R) -> GameClock {
        let minute = self.draw_minute(rng);
        let second = rng.gen_range(0..60u8);
        GameClock { minute, second }
    }

    /// Minutes with a positive weight.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

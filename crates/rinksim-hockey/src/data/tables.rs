// Goal-minute histogram and injury catalog (JSON).

use std::collections::BTreeMap;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::{open, DataError};
use crate::error::SimError;
use crate::injury::{InjuryCatalogEntry, InjuryModel};
use crate::timing::GoalMinuteWeights;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let file = open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| DataError::Json {
        path: path.display().to_string(),
        source: e,
    })
}

/// Build goal-minute weights from a `{"1": 120, "2": 95, ...}` object.
/// Non-numeric labels or counts are skipped.
pub fn goal_minutes_from_map(raw: &BTreeMap<String, Value>) -> Result<GoalMinuteWeights, SimError> {
    let labels = raw.iter().filter_map(|(label, count)| {
        let minute = label.trim().parse::<i64>().ok();
        let weight = count.as_f64();
        if minute.is_none() || weight.is_none() {
            debug!("ignoring goal-minute entry {label:?}: {count}");
        }
        Some((minute?, weight?))
    });
    GoalMinuteWeights::from_minute_labels(labels)
}

pub fn load_goal_minutes(path: &Path) -> Result<GoalMinuteWeights, DataError> {
    let raw: BTreeMap<String, Value> = read_json(path)?;
    Ok(goal_minutes_from_map(&raw)?)
}

/// Load and validate the injury catalog (`[{name, minGames, maxGames}]`).
pub fn load_injury_catalog(path: &Path) -> Result<InjuryModel, DataError> {
    let entries: Vec<InjuryCatalogEntry> = read_json(path)?;
    Ok(InjuryModel::new(entries)?)
}

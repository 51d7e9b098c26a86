// Schedule CSV loading.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{open, DataError};
use crate::model::ScheduledGame;

/// Date formats seen in schedule exports.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y"];

/// Schedule row. Column names vary between exports, so the id and date
/// columns accept several spellings.
#[derive(Debug, Deserialize)]
struct RawScheduleRow {
    #[serde(default, rename = "gameId", alias = "GameId", alias = "id")]
    game_id: Option<String>,
    #[serde(default, alias = "Date", alias = "gameDate")]
    date: Option<String>,
    #[serde(default, alias = "Team")]
    team: String,
    #[serde(default, alias = "Opponent")]
    opponent: String,
    #[serde(default, alias = "Away")]
    away: Option<String>,
}

/// Lenient boolean: `true/1/yes/y/t/away/@` are true, anything else false.
fn parse_away(value: Option<&str>) -> bool {
    match value {
        Some(v) => matches!(
            v.trim().to_lowercase().as_str(),
            "true" | "1" | "yes" | "y" | "t" | "away" | "@"
        ),
        None => false,
    }
}

/// Parse a schedule date, ignoring any time-of-day suffix.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let day = value
        .trim()
        .split(['T', ' '])
        .next()
        .unwrap_or_default();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(day, fmt).ok())
}

pub(crate) fn load_schedule_from_reader<R: Read>(rdr: R) -> Result<Vec<ScheduledGame>, DataError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut games = Vec::new();
    for result in reader.deserialize::<RawScheduleRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed schedule row: {}", e);
                continue;
            }
        };

        let game_id = match raw.game_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                debug!(
                    "skipping schedule row without a game id ({} vs {})",
                    raw.team, raw.opponent
                );
                continue;
            }
        };

        let date_str = raw.date.unwrap_or_default();
        let date = parse_date(&date_str).ok_or_else(|| DataError::InvalidDate {
            game_id: game_id.clone(),
            value: date_str.clone(),
        })?;

        games.push(ScheduledGame {
            game_id,
            date,
            team: raw.team.trim().to_string(),
            opponent: raw.opponent.trim().to_string(),
            away: parse_away(raw.away.as_deref()),
        });
    }
    Ok(games)
}

/// Load schedule rows in file order. Deduplication and date ordering are
/// left to [`crate::season::Schedule`].
pub fn load_schedule(path: &Path) -> Result<Vec<ScheduledGame>, DataError> {
    let file = open(path)?;
    load_schedule_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_standard_columns() {
        let csv_data = "\
gameId,date,team,opponent,away
2024020001,2024-10-04,NJD,BUF,false
2024020002,2024-10-05,BUF,NJD,true";

        let games = load_schedule_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].game_id, "2024020001");
        assert_eq!(games[0].date, NaiveDate::from_ymd_opt(2024, 10, 4).unwrap());
        assert_eq!(games[0].home_team(), "NJD");
        assert!(games[1].away);
        assert_eq!(games[1].home_team(), "NJD");
    }

    #[test]
    fn accepts_column_aliases() {
        let csv_data = "\
GameId,Date,team,opponent,away
77,20241012,TOR,MTL,@";
        let games = load_schedule_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(games[0].game_id, "77");
        assert_eq!(games[0].date, NaiveDate::from_ymd_opt(2024, 10, 12).unwrap());
        assert!(games[0].away);

        let csv_data = "\
id,gameDate,team,opponent,away
78,10/13/2024,TOR,OTT,";
        let games = load_schedule_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(games[0].game_id, "78");
        assert_eq!(games[0].date, NaiveDate::from_ymd_opt(2024, 10, 13).unwrap());
        assert!(!games[0].away);
    }

    #[test]
    fn away_flag_is_lenient() {
        for truthy in ["true", "TRUE", "1", "yes", "Y", "t", "Away", "@"] {
            assert!(parse_away(Some(truthy)), "{truthy}");
        }
        for falsy in ["false", "0", "no", "n", "f", "home", "", "maybe"] {
            assert!(!parse_away(Some(falsy)), "{falsy}");
        }
        assert!(!parse_away(None));
    }

    #[test]
    fn timestamp_suffix_ignored() {
        assert_eq!(
            parse_date("2024-10-08T23:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 10, 8)
        );
        assert_eq!(parse_date("2024-10-08 19:00"), NaiveDate::from_ymd_opt(2024, 10, 8));
    }

    #[test]
    fn rows_without_id_skipped() {
        let csv_data = "\
gameId,date,team,opponent,away
,2024-10-04,NJD,BUF,false
  ,2024-10-04,NJD,BUF,false
5,2024-10-06,SEA,VGK,0";
        let games = load_schedule_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].game_id, "5");
    }

    #[test]
    fn duplicate_rows_are_kept_for_schedule() {
        let csv_data = "\
gameId,date,team,opponent,away
5,2024-10-06,SEA,VGK,0
5,2024-10-06,VGK,SEA,1";
        let games = load_schedule_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(games.len(), 2);
    }

    #[test]
    fn bad_date_fails_fast() {
        let csv_data = "\
gameId,date,team,opponent,away
9,next tuesday,SEA,VGK,0";
        let err = load_schedule_from_reader(csv_data.as_bytes()).unwrap_err();
        match err {
            DataError::InvalidDate { game_id, value } => {
                assert_eq!(game_id, "9");
                assert_eq!(value, "next tuesday");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn missing_date_fails_fast() {
        let csv_data = "\
gameId,date,team,opponent,away
9,,SEA,VGK,0";
        assert!(matches!(
            load_schedule_from_reader(csv_data.as_bytes()),
            Err(DataError::InvalidDate { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_schedule(Path::new("/nonexistent/schedule.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}

//! Historical results store
//!
//! Loads the match table once at startup and reduces it to per-team mean
//! goals at home and away. The resulting [`Aggregator`] is an immutable
//! snapshot shared read-only by every request.

#[cfg(test)]
mod tests;

use crate::config::DatasetConfig;
use crate::error::{PredictError, Result};
use crate::model::GoalProfileSource;
use crate::types::{MatchRecord, Venue};
use csv::StringRecord;
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::path::Path;

/// Cell values treated as absent
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Mean goals per team for one venue role
#[derive(Debug, Clone)]
struct VenueMeans {
    by_team: HashMap<String, f64>,
    fallback: f64,
}

impl VenueMeans {
    fn from_samples<'a>(samples: impl Iterator<Item = (&'a str, f64)>) -> Self {
        let mut totals: HashMap<&str, (f64, u32)> = HashMap::new();
        for (team, goals) in samples {
            let entry = totals.entry(team).or_insert((0.0, 0));
            entry.0 += goals;
            entry.1 += 1;
        }

        let by_team: HashMap<String, f64> = totals
            .into_iter()
            .map(|(team, (sum, count))| (team.to_string(), sum / count as f64))
            .collect();

        // Every team weighs equally in the fallback, however many fixtures it has
        let fallback = if by_team.is_empty() {
            0.0
        } else {
            by_team.values().sum::<f64>() / by_team.len() as f64
        };

        Self { by_team, fallback }
    }

    fn get(&self, team: &str) -> f64 {
        self.by_team.get(team).copied().unwrap_or(self.fallback)
    }
}

/// Per-team goal profiles derived from the historical table
#[derive(Debug, Clone)]
pub struct Aggregator {
    home: VenueMeans,
    away: VenueMeans,
    teams: Vec<String>,
    records: usize,
}

impl Aggregator {
    /// Read the CSV described by `config` and aggregate it
    pub fn load(config: &DatasetConfig) -> Result<Self> {
        let path = config.resolved_path();
        let file = File::open(&path)?;
        let (records, dropped) = read_records(file, config)?;

        tracing::info!(
            "Loaded {} match records from {} ({} incomplete rows dropped)",
            records.len(),
            path.display(),
            dropped
        );
        if records.is_empty() {
            tracing::warn!(
                "No complete rows in {}; every fixture will use zero goal rates",
                path.display()
            );
        }

        let aggregator = Self::from_records(&records);
        tracing::info!(
            "Profiles built for {} teams (fallback home mean {:.3}, away mean {:.3})",
            aggregator.teams.len(),
            aggregator.home.fallback,
            aggregator.away.fallback
        );
        Ok(aggregator)
    }

    /// Convenience for loading straight from a path with default column names
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        let config = DatasetConfig {
            path: path.as_ref().to_string_lossy().into_owned(),
            ..DatasetConfig::default()
        };
        Self::load(&config)
    }

    pub fn from_records(records: &[MatchRecord]) -> Self {
        let home = VenueMeans::from_samples(
            records
                .iter()
                .map(|r| (r.home_team.as_str(), r.home_goals)),
        );
        let away = VenueMeans::from_samples(
            records
                .iter()
                .map(|r| (r.away_team.as_str(), r.away_goals)),
        );

        let teams: BTreeSet<&str> = records
            .iter()
            .flat_map(|r| [r.home_team.as_str(), r.away_team.as_str()])
            .collect();

        Self {
            home,
            away,
            teams: teams.into_iter().map(str::to_string).collect(),
            records: records.len(),
        }
    }

    /// Historical mean goals of `team` in the given role. Teams with no
    /// history in that role get the fallback mean for the role.
    pub fn team_goal_profile(&self, team: &str, venue: Venue) -> f64 {
        match venue {
            Venue::Home => self.home.get(team),
            Venue::Away => self.away.get(team),
        }
    }

    pub fn fallback_mean(&self, venue: Venue) -> f64 {
        match venue {
            Venue::Home => self.home.fallback,
            Venue::Away => self.away.fallback,
        }
    }

    /// All team names seen at either venue, sorted and deduplicated
    pub fn list_teams(&self) -> &[String] {
        &self.teams
    }

    /// Number of complete records aggregated
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }
}

impl GoalProfileSource for Aggregator {
    fn team_goal_profile(&self, team: &str, venue: Venue) -> f64 {
        Aggregator::team_goal_profile(self, team, venue)
    }
}

/// Column positions of the four required fields
struct Columns {
    home_team: usize,
    away_team: usize,
    home_goals: usize,
    away_goals: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord, config: &DatasetConfig) -> Result<Self> {
        let header_map: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().trim_start_matches('\u{feff}'), idx))
            .collect();

        let find = |name: &str| {
            header_map
                .get(name)
                .copied()
                .ok_or_else(|| PredictError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            home_team: find(&config.home_team_column)?,
            away_team: find(&config.away_team_column)?,
            home_goals: find(&config.home_goals_column)?,
            away_goals: find(&config.away_goals_column)?,
        })
    }
}

/// Parse every complete row. Returns the records and the number of rows
/// dropped for missing fields. A row with more fields than the header is
/// an error.
pub fn read_records<R: std::io::Read>(
    reader: R,
    config: &DatasetConfig,
) -> Result<(Vec<MatchRecord>, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = Columns::resolve(&headers, config)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        if row.len() > headers.len() {
            return Err(PredictError::MalformedRow {
                line,
                expected: headers.len(),
                found: row.len(),
            });
        }

        let home_team = cell(&row, columns.home_team);
        let away_team = cell(&row, columns.away_team);
        let home_goals = cell(&row, columns.home_goals);
        let away_goals = cell(&row, columns.away_goals);

        let (Some(home_team), Some(away_team), Some(home_goals), Some(away_goals)) =
            (home_team, away_team, home_goals, away_goals)
        else {
            tracing::debug!("Dropping incomplete row at line {}", line);
            dropped += 1;
            continue;
        };

        records.push(MatchRecord {
            home_team: home_team.to_string(),
            away_team: away_team.to_string(),
            home_goals: parse_goals(home_goals, line, &config.home_goals_column)?,
            away_goals: parse_goals(away_goals, line, &config.away_goals_column)?,
        });
    }

    Ok((records, dropped))
}

fn cell(row: &StringRecord, idx: usize) -> Option<&str> {
    row.get(idx).filter(|value| !MISSING_MARKERS.contains(value))
}

fn parse_goals(value: &str, line: u64, column: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(goals) if goals.is_finite() && goals >= 0.0 => Ok(goals),
        _ => Err(PredictError::InvalidGoals {
            line,
            column: column.to_string(),
            value: value.to_string(),
        }),
    }
}

//! Core types shared across the service

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A completed historical fixture
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub home_team: String,
    pub away_team: String,
    pub home_goals: f64,
    pub away_goals: f64,
}

impl MatchRecord {
    pub fn new(
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_goals: f64,
        away_goals: f64,
    ) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_goals,
            away_goals,
        }
    }
}

/// Role a team plays in a fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Venue {
    Home,
    Away,
}

/// Markets offered by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "1x2")]
    MatchResult,
    #[serde(rename = "over25")]
    OverUnder,
    #[serde(rename = "btts")]
    BothTeamsScore,
    #[serde(rename = "spread")]
    Spread,
}

impl Market {
    pub const ALL: [Market; 4] = [
        Market::MatchResult,
        Market::OverUnder,
        Market::BothTeamsScore,
        Market::Spread,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Market::MatchResult => "1x2",
            Market::OverUnder => "over25",
            Market::BothTeamsScore => "btts",
            Market::Spread => "spread",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMarket(pub String);

impl fmt::Display for UnknownMarket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown market '{}'", self.0)
    }
}

impl std::error::Error for UnknownMarket {}

impl FromStr for Market {
    type Err = UnknownMarket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Market::ALL
            .into_iter()
            .find(|market| market.code() == s)
            .ok_or_else(|| UnknownMarket(s.to_string()))
    }
}

/// Outcome picked within the 1x2 market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Home,
    Draw,
    Away,
}

impl Selection {
    /// Case-insensitive parse; anything unrecognised selects the home win
    pub fn parse_or_home(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "draw" => Selection::Draw,
            "away" => Selection::Away,
            _ => Selection::Home,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Selection::Home => "home",
            Selection::Draw => "draw",
            Selection::Away => "away",
        };
        f.write_str(label)
    }
}

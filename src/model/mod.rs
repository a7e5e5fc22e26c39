//! Poisson goal model
//!
//! Home and away goal counts are treated as independent Poisson variables
//! whose rates are the teams' historical scoring means. Market probabilities
//! are read off the joint distribution truncated at `max_goals` per side.

pub mod poisson;

use crate::types::{Selection, Venue};

/// Default truncation of the score grid
pub const DEFAULT_MAX_GOALS: u8 = 6;

/// Default goal line for the over/under market
pub const DEFAULT_GOAL_LINE: f64 = 2.5;

/// Anything that can report a team's mean goals for a venue role
pub trait GoalProfileSource: Send + Sync {
    fn team_goal_profile(&self, team: &str, venue: Venue) -> f64;
}

/// Poisson rates for one fixture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}

impl ExpectedGoals {
    pub fn new(home: f64, away: f64) -> Self {
        Self { home, away }
    }

    /// Home side's home scoring mean against the away side's away scoring mean
    pub fn for_fixture(
        source: &impl GoalProfileSource,
        home_team: &str,
        away_team: &str,
    ) -> Self {
        Self {
            home: source.team_goal_profile(home_team, Venue::Home),
            away: source.team_goal_profile(away_team, Venue::Away),
        }
    }
}

/// Three-way match result probabilities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeProbabilities {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl OutcomeProbabilities {
    pub fn get(&self, selection: Selection) -> f64 {
        match selection {
            Selection::Home => self.home,
            Selection::Draw => self.draw,
            Selection::Away => self.away,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverUnderSide {
    Over,
    Under,
}

/// Truncated joint distribution of (home goals, away goals)
#[derive(Debug, Clone)]
pub struct ScoreGrid {
    home: Vec<f64>,
    away: Vec<f64>,
}

impl ScoreGrid {
    /// Build the grid for `0..=max_goals` on each side. `max_goals` is capped
    /// at [`poisson::MAX_K`].
    pub fn new(expected: ExpectedGoals, max_goals: u8) -> Self {
        let max_goals = max_goals.min(poisson::MAX_K);
        Self {
            home: (0..=max_goals).map(|k| poisson::pmf(k, expected.home)).collect(),
            away: (0..=max_goals).map(|k| poisson::pmf(k, expected.away)).collect(),
        }
    }

    pub fn max_goals(&self) -> u8 {
        (self.home.len() - 1) as u8
    }

    /// Every (home goals, away goals, probability) cell
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8, f64)> + '_ {
        self.home.iter().enumerate().flat_map(move |(gh, &ph)| {
            self.away
                .iter()
                .enumerate()
                .map(move |(ga, &pa)| (gh as u8, ga as u8, ph * pa))
        })
    }

    /// Home/draw/away buckets rescaled to sum to 1, compensating for the
    /// mass lost beyond `max_goals`.
    pub fn match_outcome(&self) -> OutcomeProbabilities {
        let (mut home, mut draw, mut away) = (0.0, 0.0, 0.0);
        for (gh, ga, prob) in self.iter() {
            if gh > ga {
                home += prob;
            } else if gh == ga {
                draw += prob;
            } else {
                away += prob;
            }
        }
        let total = home + draw + away;
        OutcomeProbabilities {
            home: home / total,
            draw: draw / total,
            away: away / total,
        }
    }

    /// Over/under on total goals. Truncated mass is not redistributed, so
    /// the over side absorbs it.
    pub fn over_under(&self, threshold: f64, side: OverUnderSide) -> f64 {
        let line = threshold.trunc();
        let at_most: f64 = self
            .iter()
            .filter(|&(gh, ga, _)| f64::from(gh) + f64::from(ga) <= line)
            .map(|(_, _, prob)| prob)
            .sum();
        let over = 1.0 - at_most;
        match side {
            OverUnderSide::Over => over,
            OverUnderSide::Under => 1.0 - over,
        }
    }

    /// Both sides score at least once, within the grid
    pub fn both_teams_score(&self) -> f64 {
        self.iter()
            .filter(|&(gh, ga, _)| gh > 0 && ga > 0)
            .map(|(_, _, prob)| prob)
            .sum()
    }
}

pub fn match_outcome_probabilities(
    mu_home: f64,
    mu_away: f64,
    max_goals: u8,
) -> OutcomeProbabilities {
    ScoreGrid::new(ExpectedGoals::new(mu_home, mu_away), max_goals).match_outcome()
}

pub fn over_under_probability(
    mu_home: f64,
    mu_away: f64,
    threshold: f64,
    side: OverUnderSide,
    max_goals: u8,
) -> f64 {
    ScoreGrid::new(ExpectedGoals::new(mu_home, mu_away), max_goals).over_under(threshold, side)
}

pub fn both_teams_score_probability(mu_home: f64, mu_away: f64, max_goals: u8) -> f64 {
    ScoreGrid::new(ExpectedGoals::new(mu_home, mu_away), max_goals).both_teams_score()
}

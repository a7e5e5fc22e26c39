//! Market pricing and betting verdicts
//!
//! Maps a market request onto the goal model, then compares the model
//! probability with the caller's decimal odds.


use crate::config::{ModelConfig, VerdictConfig};
use crate::model::{ExpectedGoals, OutcomeProbabilities, OverUnderSide, ScoreGrid};
use crate::types::{Market, Selection};
use rust_decimal::prelude::*;
use serde::Serialize;

/// Recommendation attached to every prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pick {
    #[serde(rename = "A favor")]
    Back,
    #[serde(rename = "En contra")]
    Oppose,
    #[serde(rename = "No apostar")]
    Pass,
}

impl Pick {
    /// Positive EV backs the selection before the probability cut-offs apply
    pub fn assess(prob: f64, ev: Option<f64>, thresholds: &VerdictConfig) -> Self {
        if ev.is_some_and(|ev| ev > 0.0) || prob >= thresholds.favour_threshold {
            Pick::Back
        } else if prob <= thresholds.against_threshold {
            Pick::Oppose
        } else {
            Pick::Pass
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Pick::Back => "A favor",
            Pick::Oppose => "En contra",
            Pick::Pass => "No apostar",
        }
    }
}

/// Priced market, unrounded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub prob: f64,
    pub ev: Option<f64>,
    pub pick: Pick,
}

impl Prediction {
    /// Probability as sent over the wire (4 decimals)
    pub fn rounded_prob(&self) -> f64 {
        round_dp(self.prob, 4)
    }

    /// Expected value as sent over the wire (3 decimals)
    pub fn rounded_ev(&self) -> Option<f64> {
        self.ev.map(|ev| round_dp(ev, 3))
    }
}

/// Expected return per unit staked at decimal `odds`
pub fn expected_value(prob: f64, odds: Option<f64>) -> Option<f64> {
    odds.filter(|&odds| odds > 0.0).map(|odds| prob * odds - 1.0)
}

/// Model probability for `market`. `None` stands for an unrecognised market,
/// which is priced like the 1x2 home win, as is `spread`.
pub fn market_probability(
    expected: ExpectedGoals,
    market: Option<Market>,
    selection: Selection,
    model: &ModelConfig,
) -> f64 {
    let grid = ScoreGrid::new(expected, model.max_goals);
    match market {
        Some(Market::MatchResult) => grid.match_outcome().get(selection),
        Some(Market::OverUnder) => grid.over_under(model.over_under_threshold, OverUnderSide::Over),
        Some(Market::BothTeamsScore) => grid.both_teams_score(),
        Some(Market::Spread) | None => grid.match_outcome().home,
    }
}

/// Price `market` for a fixture and attach the verdict
pub fn price_market(
    expected: ExpectedGoals,
    market: Option<Market>,
    selection: Selection,
    odds: Option<f64>,
    model: &ModelConfig,
    verdict: &VerdictConfig,
) -> Prediction {
    let prob = market_probability(expected, market, selection, model);
    let ev = expected_value(prob, odds);
    let pick = Pick::assess(prob, ev, verdict);
    Prediction { prob, ev, pick }
}

/// Full 1x2 breakdown, for display
pub fn outcome_breakdown(expected: ExpectedGoals, model: &ModelConfig) -> OutcomeProbabilities {
    ScoreGrid::new(expected, model.max_goals).match_outcome()
}

/// Half-even rounding on the exact binary value of `value`
fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

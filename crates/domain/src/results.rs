//! Match result ranking and prize assignment.
//!
//! Players are ordered by kills, then by ACS (average combat score), both
//! descending. Players tied on both keep the order they were reported in.
//! Final positions run 1..=N and the top three positions take the
//! first/second/third amounts of a [`PrizeSplit`].

use serde::{Deserialize, Serialize};

use crate::prize::PrizeSplit;

/// One row of a scoreboard as reported for a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub player_id: String,
    pub kills: u32,
    pub acs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResult {
    pub final_position: u32,
    pub player_id: String,
    pub kills: u32,
    pub acs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeAward {
    pub final_position: u32,
    pub player_id: String,
    pub prize: i64,
}

pub fn rank_results(mut results: Vec<PlayerResult>) -> Vec<RankedResult> {
    // stable, so full ties keep reporting order
    results.sort_by(|a, b| b.kills.cmp(&a.kills).then(b.acs.cmp(&a.acs)));

    results
        .into_iter()
        .zip(1u32..)
        .map(|(result, final_position)| RankedResult {
            final_position,
            player_id: result.player_id,
            kills: result.kills,
            acs: result.acs,
        })
        .collect()
}

/// Map the podium onto the split. With fewer than three ranked players the
/// unclaimed places are simply not awarded.
pub fn award_prizes(ranked: &[RankedResult], split: &PrizeSplit) -> Vec<PrizeAward> {
    ranked
        .iter()
        .filter_map(|result| {
            let prize = match result.final_position {
                1 => split.first,
                2 => split.second,
                3 => split.third,
                _ => return None,
            };
            Some(PrizeAward {
                final_position: result.final_position,
                player_id: result.player_id.clone(),
                prize,
            })
        })
        .collect()
}

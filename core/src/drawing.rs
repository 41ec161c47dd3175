//! The drawing record
//!
//! The engine hands back a `Drawing` with empty action lists. Tournament
//! flow (protects, bans, pocket picks, redraws, winners) fills them in
//! afterwards.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use parity_scale_codec::{Decode, DecodeAll, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::config::ConfigState;
use crate::eligibility::eligible_pairs;
use crate::error::{DrawError, DrawResult};
use crate::projection::{project_chart, EligibleChart};
use crate::rng::DrawRng;

/// Prefix of every drawn card id
pub const DRAWN_CHART_ID_PREFIX: &str = "drawn_chart:";
/// Prefix of every drawing id
pub const DRAWING_ID_PREFIX: &str = "drawing:";

/// Symbols in the random part of a drawn card id
const DRAWN_CHART_ID_LEN: usize = 5;

/// Generate a drawn card id that `taken` does not already claim
pub(crate) fn fresh_chart_id<R, F>(rng: &mut R, taken: F) -> String
where
    R: DrawRng,
    F: Fn(&str) -> bool,
{
    loop {
        let id = format!("{}{}", DRAWN_CHART_ID_PREFIX, rng.gen_id(DRAWN_CHART_ID_LEN));
        if !taken(&id) {
            return id;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Player {
    One,
    Two,
}

/// One physical card in a drawing
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
pub struct DrawnChart {
    pub id: String,
    #[serde(flatten)]
    pub chart: EligibleChart,
}

impl DrawnChart {
    pub fn new(id: String, chart: EligibleChart) -> Self {
        Self { id, chart }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerActionOnChart {
    pub player: Player,
    pub chart_id: String,
}

/// A replacement chart chosen by a player for one drawn card
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PocketPick {
    pub player: Player,
    pub chart_id: String,
    pub pick: EligibleChart,
}

#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player2: Option<String>,
    pub charts: Vec<DrawnChart>,
    pub bans: Vec<PlayerActionOnChart>,
    pub protects: Vec<PlayerActionOnChart>,
    pub pocket_picks: Vec<PocketPick>,
    pub winners: Vec<PlayerActionOnChart>,
}

impl Drawing {
    /// A fresh drawing with no actions recorded
    pub fn new(id: String, charts: Vec<DrawnChart>) -> Self {
        Self {
            id,
            title: None,
            player1: None,
            player2: None,
            charts,
            bans: Vec::new(),
            protects: Vec::new(),
            pocket_picks: Vec::new(),
            winners: Vec::new(),
        }
    }

    pub fn chart(&self, chart_id: &str) -> Option<&DrawnChart> {
        self.charts.iter().find(|c| c.id == chart_id)
    }

    pub fn is_banned(&self, chart_id: &str) -> bool {
        self.bans.iter().any(|a| a.chart_id == chart_id)
    }

    pub fn is_protected(&self, chart_id: &str) -> bool {
        self.protects.iter().any(|a| a.chart_id == chart_id)
    }

    pub fn pocket_pick_for(&self, chart_id: &str) -> Option<&PocketPick> {
        self.pocket_picks.iter().find(|p| p.chart_id == chart_id)
    }

    pub fn winner(&self, chart_id: &str) -> Option<Player> {
        self.winners
            .iter()
            .find(|w| w.chart_id == chart_id)
            .map(|w| w.player)
    }

    /// Protect a chart from bans
    pub fn protect(&mut self, player: Player, chart_id: &str) -> DrawResult<()> {
        self.ensure_unclaimed(chart_id)?;
        self.protects.push(PlayerActionOnChart {
            player,
            chart_id: chart_id.to_string(),
        });
        Ok(())
    }

    pub fn ban(&mut self, player: Player, chart_id: &str) -> DrawResult<()> {
        self.ensure_unclaimed(chart_id)?;
        self.bans.push(PlayerActionOnChart {
            player,
            chart_id: chart_id.to_string(),
        });
        Ok(())
    }

    /// Replace a drawn chart with a player's pick
    pub fn pocket_pick(&mut self, player: Player, chart_id: &str, pick: EligibleChart) -> DrawResult<()> {
        self.ensure_unclaimed(chart_id)?;
        self.pocket_picks.push(PocketPick {
            player,
            chart_id: chart_id.to_string(),
            pick,
        });
        Ok(())
    }

    /// Record who won a chart; `None` clears the result
    pub fn set_winner(&mut self, player: Option<Player>, chart_id: &str) -> DrawResult<()> {
        self.ensure_drawn(chart_id)?;
        self.winners.retain(|w| w.chart_id != chart_id);
        if let Some(player) = player {
            self.winners.push(PlayerActionOnChart {
                player,
                chart_id: chart_id.to_string(),
            });
        }
        Ok(())
    }

    /// Swap a drawn card for another chart from the eligible pool.
    ///
    /// Charts already in the drawing are never picked. Returns `Ok(false)`
    /// and leaves the card alone when the pool has nothing left.
    pub fn redraw_chart<R: DrawRng>(
        &mut self,
        catalog: &Catalog,
        config: &ConfigState,
        chart_id: &str,
        rng: &mut R,
    ) -> DrawResult<bool> {
        self.ensure_unclaimed(chart_id)?;

        let mut pool: Vec<_> = eligible_pairs(config, catalog)
            .filter(|(chart_ref, _, _)| !self.charts.iter().any(|c| c.chart.chart_ref == *chart_ref))
            .collect();
        if pool.is_empty() {
            log::debug!("redraw of {} skipped, no eligible chart left", chart_id);
            return Ok(false);
        }
        let (chart_ref, song, chart) = pool.swap_remove(rng.gen_range(pool.len()));
        let replacement = project_chart(catalog, chart_ref, song, chart);

        let charts = &self.charts;
        let id = fresh_chart_id(rng, |id| charts.iter().any(|c| c.id == id));
        let Some(slot) = self.charts.iter_mut().find(|c| c.id == chart_id) else {
            return Err(DrawError::UnknownChart {
                chart_id: chart_id.to_string(),
            });
        };
        log::debug!("redrew {} as {} ({})", chart_id, id, chart_ref);
        *slot = DrawnChart::new(id, replacement);
        self.winners.retain(|w| w.chart_id != chart_id);
        Ok(true)
    }

    /// Compact binary form sent to a synced peer
    pub fn encode_sync(&self) -> Vec<u8> {
        self.encode()
    }

    pub fn decode_sync(mut bytes: &[u8]) -> DrawResult<Self> {
        Self::decode_all(&mut bytes).map_err(|_| DrawError::SyncDecode)
    }

    fn ensure_drawn(&self, chart_id: &str) -> DrawResult<()> {
        if self.chart(chart_id).is_none() {
            return Err(DrawError::UnknownChart {
                chart_id: chart_id.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_unclaimed(&self, chart_id: &str) -> DrawResult<()> {
        self.ensure_drawn(chart_id)?;
        if self.is_banned(chart_id) || self.is_protected(chart_id) || self.pocket_pick_for(chart_id).is_some() {
            return Err(DrawError::ChartAlreadyClaimed {
                chart_id: chart_id.to_string(),
            });
        }
        Ok(())
    }
}

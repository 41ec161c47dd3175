//! Chart projection
//!
//! Turns a raw (song, chart) pair into the display-ready record that cards
//! are rendered from. Pure: the same inputs always give the same record.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Chart, ChartRef, Song};
use crate::config::UNCOLORED;

/// Abbreviation lookup key for charts without a color tag
pub const UNCOLORED_ABBR_KEY: &str = "UNC";

/// A chart resolved against its catalog, ready to be drawn
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibleChart {
    pub chart_ref: ChartRef,
    pub name: String,
    pub name_translation: Option<String>,
    pub artist: String,
    pub artist_translation: Option<String>,
    pub jacket: String,
    pub bpm: String,
    pub level: u32,
    pub draw_group: Option<u32>,
    /// Chart flags followed by song flags
    pub flags: Vec<String>,
    pub diff_abbr: String,
    pub diff_color: String,
    pub mtg_color_abbr: Option<String>,
    pub mtg_color_color: Option<String>,
}

impl EligibleChart {
    /// Bucketing key: the draw group when set and non-zero, else the level
    pub fn level_metric(&self) -> u32 {
        match self.draw_group {
            Some(group) if group != 0 => group,
            _ => self.level,
        }
    }
}

/// Resolve a chart's display fields against the catalog tables
pub fn project_chart(catalog: &Catalog, chart_ref: ChartRef, song: &Song, chart: &Chart) -> EligibleChart {
    let mut flags = chart.flags.clone();
    for flag in &song.flags {
        if !flags.contains(flag) {
            flags.push(flag.clone());
        }
    }

    let (mtg_color_abbr, mtg_color_color) = if catalog.uses_mtg_color() {
        let abbr_key = chart.mtg_color.as_deref().unwrap_or(UNCOLORED_ABBR_KEY);
        let color_key = chart.mtg_color.as_deref().unwrap_or(UNCOLORED);
        (
            catalog.mtg_color_abbr(abbr_key).map(ToString::to_string),
            Some(catalog.mtg_color_color(color_key).unwrap_or_default().to_string()),
        )
    } else {
        (None, None)
    };

    EligibleChart {
        chart_ref,
        name: song.name.clone(),
        name_translation: song.name_translation.clone(),
        artist: song.artist.clone(),
        artist_translation: song.artist_translation.clone(),
        jacket: chart.jacket.clone().unwrap_or_else(|| song.jacket.clone()),
        bpm: song.bpm.clone(),
        level: chart.lvl,
        draw_group: chart.draw_group,
        flags,
        diff_abbr: catalog.diff_abbr(&chart.diff_class).unwrap_or_default().to_string(),
        diff_color: catalog.difficulty_color(&chart.diff_class).unwrap_or_default().to_string(),
        mtg_color_abbr,
        mtg_color_color,
    }
}

//! Catalog model
//!
//! A catalog is built once by the import tooling and only read afterwards.
//! Field names follow the JSON files the importers write.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::eligibility::level_metric;

/// Locale used to resolve display abbreviations
pub const DEFAULT_LOCALE: &str = "en";

/// Position of a chart inside a catalog (song index, chart index)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
pub struct ChartRef {
    pub song: u32,
    pub chart: u32,
}

impl fmt::Display for ChartRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "song #{} chart #{}", self.song, self.chart)
    }
}

/// A keyed display color, used for difficulty classes and color tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyColor {
    pub key: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMeta {
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub difficulties: Vec<KeyColor>,
    /// Secondary color axis, only present for packs that use it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtg_color: Option<Vec<KeyColor>>,
    pub lvl_max: u32,
    #[serde(default)]
    pub uses_draw_groups: bool,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<u64>,
}

/// Initial config values shipped with a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDefaults {
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub difficulties: Vec<String>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default = "default_lower_bound")]
    pub lower_lvl_bound: u32,
    #[serde(default)]
    pub upper_lvl_bound: u32,
}

fn default_lower_bound() -> u32 {
    1
}

/// Free-form translated string or nested table of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum I18nValue {
    Text(String),
    Table(BTreeMap<String, I18nValue>),
}

/// Display strings for one locale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct I18nDict {
    /// Difficulty class abbreviations
    #[serde(rename = "$abbr", default)]
    pub abbr: BTreeMap<String, String>,
    /// Color tag abbreviations
    #[serde(rename = "$mtgAbbr", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mtg_abbr: BTreeMap<String, String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, I18nValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    /// Numeric difficulty ("feet")
    pub lvl: u32,
    pub style: String,
    pub diff_class: String,
    /// Organizer assigned tier, overrides `lvl` for bucketing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_group: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jacket: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtg_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_translation: Option<String>,
    #[serde(default)]
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist_translation: Option<String>,
    #[serde(default)]
    pub jacket: String,
    #[serde(default)]
    pub bpm: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
    #[serde(default)]
    pub charts: Vec<Chart>,
}

/// The full game data for one pack or game version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub meta: CatalogMeta,
    pub defaults: CatalogDefaults,
    #[serde(default)]
    pub i18n: BTreeMap<String, I18nDict>,
    #[serde(default)]
    pub songs: Vec<Song>,
}

/// Non-fatal data issues found while checking a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogProblem {
    /// Chart level must be positive
    ZeroLevel { chart: ChartRef },
    /// Level metric has no bucket, so the chart can never be drawn
    LevelAboveMax { chart: ChartRef, metric: u32, lvl_max: u32 },
    /// Chart style is not listed in `meta.styles`
    UnknownStyle { chart: ChartRef, style: String },
    /// Chart difficulty class is not listed in `meta.difficulties`
    UnknownDifficulty { chart: ChartRef, diff_class: String },
    /// Tiered catalog chart without a draw group, falls back to its level
    MissingDrawGroup { chart: ChartRef },
}

impl fmt::Display for CatalogProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogProblem::ZeroLevel { chart } => write!(f, "{}: level is 0", chart),
            CatalogProblem::LevelAboveMax { chart, metric, lvl_max } => {
                write!(f, "{}: level metric {} exceeds lvlMax {}", chart, metric, lvl_max)
            }
            CatalogProblem::UnknownStyle { chart, style } => {
                write!(f, "{}: style '{}' is not declared in meta", chart, style)
            }
            CatalogProblem::UnknownDifficulty { chart, diff_class } => {
                write!(f, "{}: difficulty '{}' is not declared in meta", chart, diff_class)
            }
            CatalogProblem::MissingDrawGroup { chart } => {
                write!(f, "{}: tiered catalog chart has no draw group", chart)
            }
        }
    }
}

impl Catalog {
    /// Parse a catalog from its JSON form
    #[cfg(feature = "std")]
    pub fn from_json_str(json: &str) -> crate::error::DrawResult<Self> {
        serde_json::from_str(json).map_err(|e| crate::error::DrawError::InvalidCatalog {
            reason: alloc::format!("{}", e),
        })
    }

    /// Parse a catalog from raw JSON bytes
    #[cfg(feature = "std")]
    pub fn from_json_slice(json: &[u8]) -> crate::error::DrawResult<Self> {
        serde_json::from_slice(json).map_err(|e| crate::error::DrawError::InvalidCatalog {
            reason: alloc::format!("{}", e),
        })
    }

    /// Display strings for the default locale
    pub fn strings(&self) -> Option<&I18nDict> {
        self.i18n.get(DEFAULT_LOCALE)
    }

    pub fn diff_abbr(&self, diff_class: &str) -> Option<&str> {
        self.strings()?.abbr.get(diff_class).map(String::as_str)
    }

    pub fn difficulty_color(&self, diff_class: &str) -> Option<&str> {
        self.meta
            .difficulties
            .iter()
            .find(|d| d.key == diff_class)
            .map(|d| d.color.as_str())
    }

    /// Whether this catalog uses the secondary color axis
    pub fn uses_mtg_color(&self) -> bool {
        self.meta.mtg_color.is_some()
    }

    pub fn mtg_color_abbr(&self, mtg_color: &str) -> Option<&str> {
        self.strings()?.mtg_abbr.get(mtg_color).map(String::as_str)
    }

    pub fn mtg_color_color(&self, mtg_color: &str) -> Option<&str> {
        self.meta
            .mtg_color
            .as_ref()?
            .iter()
            .find(|c| c.key == mtg_color)
            .map(|c| c.color.as_str())
    }

    /// Look up a chart and its song by position
    pub fn chart(&self, chart_ref: ChartRef) -> Option<(&Song, &Chart)> {
        let song = self.songs.get(chart_ref.song as usize)?;
        let chart = song.charts.get(chart_ref.chart as usize)?;
        Some((song, chart))
    }

    /// All charts in catalog order with their positions
    pub fn charts(&self) -> impl Iterator<Item = (ChartRef, &Song, &Chart)> + '_ {
        self.songs.iter().enumerate().flat_map(|(song_idx, song)| {
            song.charts.iter().enumerate().map(move |(chart_idx, chart)| {
                let chart_ref = ChartRef {
                    song: song_idx as u32,
                    chart: chart_idx as u32,
                };
                (chart_ref, song, chart)
            })
        })
    }

    pub fn chart_count(&self) -> usize {
        self.songs.iter().map(|s| s.charts.len()).sum()
    }

    /// Check the catalog for data that will silently never be drawn
    pub fn problems(&self) -> Vec<CatalogProblem> {
        let mut problems = Vec::new();
        for (chart_ref, _, chart) in self.charts() {
            if chart.lvl == 0 {
                problems.push(CatalogProblem::ZeroLevel { chart: chart_ref });
            }
            let metric = level_metric(chart);
            if metric > self.meta.lvl_max {
                problems.push(CatalogProblem::LevelAboveMax {
                    chart: chart_ref,
                    metric,
                    lvl_max: self.meta.lvl_max,
                });
            }
            if !self.meta.styles.is_empty() && !self.meta.styles.contains(&chart.style) {
                problems.push(CatalogProblem::UnknownStyle {
                    chart: chart_ref,
                    style: chart.style.clone(),
                });
            }
            if !self.meta.difficulties.is_empty() && self.difficulty_color(&chart.diff_class).is_none() {
                problems.push(CatalogProblem::UnknownDifficulty {
                    chart: chart_ref,
                    diff_class: chart.diff_class.clone(),
                });
            }
            if self.meta.uses_draw_groups && chart.draw_group.is_none() {
                problems.push(CatalogProblem::MissingDrawGroup { chart: chart_ref });
            }
        }
        problems
    }
}

mod config;
mod projection;

use alloc::collections::{BTreeMap, VecDeque};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use crate::catalog::{Catalog, CatalogDefaults, CatalogMeta, Chart, I18nDict, KeyColor, Song};
use crate::config::{ConfigState, UNCOLORED};
use crate::rng::DrawRng;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

/// Replays a fixed script of raw values, then yields 0 forever.
///
/// `gen_range(n)` reduces each value mod n, so small script values read
/// as indexes.
struct SequenceRng {
    values: VecDeque<u32>,
}

impl SequenceRng {
    fn new(values: &[u32]) -> Self {
        Self {
            values: values.iter().copied().collect(),
        }
    }
}

impl DrawRng for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        self.values.pop_front().unwrap_or(0)
    }
}

fn create_chart(lvl: u32, diff_class: &str) -> Chart {
    Chart {
        lvl,
        style: "single".to_string(),
        diff_class: diff_class.to_string(),
        draw_group: None,
        flags: vec![],
        jacket: None,
        mtg_color: None,
    }
}

fn create_song(name: &str, charts: Vec<Chart>) -> Song {
    Song {
        name: name.to_string(),
        name_translation: None,
        artist: format!("{} Artist", name),
        artist_translation: None,
        jacket: format!("{}.jpg", name.to_lowercase()),
        bpm: "150".to_string(),
        flags: vec![],
        charts,
    }
}

fn create_catalog(songs: Vec<Song>, lvl_max: u32) -> Catalog {
    let mut abbr = BTreeMap::new();
    abbr.insert("basic".to_string(), "BSP".to_string());
    abbr.insert("expert".to_string(), "ESP".to_string());
    abbr.insert("challenge".to_string(), "CSP".to_string());

    let mut i18n = BTreeMap::new();
    i18n.insert(
        "en".to_string(),
        I18nDict {
            abbr,
            ..I18nDict::default()
        },
    );

    Catalog {
        meta: CatalogMeta {
            styles: vec!["single".to_string(), "double".to_string()],
            difficulties: vec![
                key_color("basic", "#ffaa00"),
                key_color("expert", "#ff0044"),
                key_color("challenge", "#cc00ff"),
            ],
            mtg_color: None,
            lvl_max,
            uses_draw_groups: false,
            flags: vec![],
            menu_parent: None,
            last_updated: None,
        },
        defaults: CatalogDefaults {
            style: "single".to_string(),
            difficulties: vec!["expert".to_string(), "challenge".to_string()],
            flags: vec![],
            lower_lvl_bound: 1,
            upper_lvl_bound: lvl_max,
        },
        i18n,
        songs,
    }
}

fn key_color(key: &str, color: &str) -> KeyColor {
    KeyColor {
        key: key.to_string(),
        color: color.to_string(),
    }
}

fn create_config(lower_bound: u32, upper_bound: u32, chart_count: u32) -> ConfigState {
    ConfigState {
        style: "single".to_string(),
        difficulties: ["basic", "expert", "challenge"]
            .iter()
            .map(|d| d.to_string())
            .collect(),
        mtg_color: [UNCOLORED.to_string()].into_iter().collect(),
        lower_bound,
        upper_bound,
        chart_count,
        force_distribution: false,
        ..ConfigState::default()
    }
}

/// Catalog with `per_level[i]` single-chart songs at level `i + 1`.
///
/// Songs are named `L{level}-{n}` so tests can read levels off names.
fn ladder_catalog(per_level: &[usize]) -> Catalog {
    let mut songs = Vec::new();
    for (i, &count) in per_level.iter().enumerate() {
        let level = i as u32 + 1;
        for n in 0..count {
            songs.push(create_song(
                &format!("L{}-{}", level, n),
                vec![create_chart(level, "expert")],
            ));
        }
    }
    create_catalog(songs, per_level.len() as u32)
}

fn weights(pairs: &[(u32, u32)]) -> BTreeMap<u32, u32> {
    pairs.iter().copied().collect()
}

fn names(charts: &[crate::drawing::DrawnChart]) -> Vec<String> {
    charts.iter().map(|c| c.chart.name.clone()).collect()
}

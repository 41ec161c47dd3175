//! Repeated draws for eyeballing the level distribution

use std::collections::BTreeMap;

use cardraw_core::buckets::group_level;
use cardraw_core::eligibility::eligible_charts;
use cardraw_core::{draw_with_rng, Catalog, ConfigState, XorShiftRng};
use rayon::prelude::*;
use serde::Serialize;

/// Per-level outcome of a batch of draws
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialReport {
    pub trials: u64,
    pub charts_drawn: u64,
    /// Draws that came back short of the requested count
    pub short_draws: u64,
    pub levels: Vec<LevelRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRow {
    pub level: u32,
    pub drawn: u64,
    pub drawn_share: f64,
    pub eligible: u64,
    pub eligible_share: f64,
}

#[derive(Default)]
struct Tally {
    charts: u64,
    short: u64,
    per_level: BTreeMap<u32, u64>,
}

impl Tally {
    fn merge(mut self, other: Tally) -> Tally {
        self.charts += other.charts;
        self.short += other.short;
        for (level, n) in other.per_level {
            *self.per_level.entry(level).or_insert(0) += n;
        }
        self
    }
}

/// Seed for trial `index`, spread so neighbouring trials do not correlate
fn trial_seed(base: u64, index: u64) -> u64 {
    let mut z = base.wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Run `trials` independent draws in parallel
pub fn run_trials(catalog: &Catalog, config: &ConfigState, trials: u64, seed: u64) -> TrialReport {
    let grouping = config.grouping_threshold();
    let requested = config.chart_count as usize;

    let tally = (0..trials)
        .into_par_iter()
        .map(|index| {
            let mut rng = XorShiftRng::seed_from_u64(trial_seed(seed, index));
            let drawing = draw_with_rng(catalog, config, &mut rng);
            let mut tally = Tally {
                charts: drawing.charts.len() as u64,
                short: u64::from(drawing.charts.len() < requested),
                per_level: BTreeMap::new(),
            };
            for card in &drawing.charts {
                let level = group_level(card.chart.level_metric(), grouping);
                *tally.per_level.entry(level).or_insert(0) += 1;
            }
            tally
        })
        .reduce(Tally::default, Tally::merge);

    let mut eligible: BTreeMap<u32, u64> = BTreeMap::new();
    for chart in eligible_charts(config, catalog) {
        let level = group_level(chart.level_metric(), grouping);
        if (1..=catalog.meta.lvl_max).contains(&level) {
            *eligible.entry(level).or_insert(0) += 1;
        }
    }
    let eligible_total: u64 = eligible.values().sum();

    let mut levels: Vec<u32> = eligible.keys().chain(tally.per_level.keys()).copied().collect();
    levels.sort_unstable();
    levels.dedup();

    let levels = levels
        .into_iter()
        .map(|level| {
            let drawn = tally.per_level.get(&level).copied().unwrap_or(0);
            let pool = eligible.get(&level).copied().unwrap_or(0);
            LevelRow {
                level,
                drawn,
                drawn_share: share(drawn, tally.charts),
                eligible: pool,
                eligible_share: share(pool, eligible_total),
            }
        })
        .collect();

    TrialReport {
        trials,
        charts_drawn: tally.charts,
        short_draws: tally.short,
        levels,
    }
}

fn share(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

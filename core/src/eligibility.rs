//! Eligibility filtering
//!
//! Decides which catalog charts may appear in a draw for a given config.
//! Everything here is lazy and walks the catalog once, in order.

use crate::catalog::{Catalog, Chart, ChartRef, Song};
use crate::config::{ConfigState, UNCOLORED};
use crate::projection::{project_chart, EligibleChart};

/// Bucketing key for a chart.
///
/// A draw group of 0 counts as unset and falls back to the level.
pub fn level_metric(chart: &Chart) -> u32 {
    match chart.draw_group {
        Some(group) if group != 0 => group,
        _ => chart.lvl,
    }
}

/// True if every song flag is accepted.
///
/// Pocket picks skip the check when the config leaves them unconstrained.
pub fn song_is_valid(config: &ConfigState, song: &Song, for_pocket_pick: bool) -> bool {
    if for_pocket_pick && !config.constrain_pocket_picks {
        return true;
    }
    song.flags.iter().all(|f| config.flags.contains(f))
}

/// True if the chart matches style, difficulty, color, level bounds and flags.
///
/// Unconstrained pocket picks only need to match the style.
pub fn chart_is_valid(config: &ConfigState, chart: &Chart, for_pocket_pick: bool) -> bool {
    if for_pocket_pick && !config.constrain_pocket_picks {
        return chart.style == config.style;
    }
    let metric = level_metric(chart);
    chart.style == config.style
        && config.difficulties.contains(&chart.diff_class)
        && config
            .mtg_color
            .contains(chart.mtg_color.as_deref().unwrap_or(UNCOLORED))
        && metric >= config.lower_bound
        && metric <= config.upper_bound
        && chart.flags.iter().all(|f| config.flags.contains(f))
}

fn matching_pairs<'a>(
    config: &'a ConfigState,
    catalog: &'a Catalog,
    for_pocket_pick: bool,
) -> impl Iterator<Item = (ChartRef, &'a Song, &'a Chart)> + 'a {
    catalog
        .charts()
        .filter(move |(_, song, _)| song_is_valid(config, song, for_pocket_pick))
        .filter(move |(_, _, chart)| chart_is_valid(config, chart, for_pocket_pick))
}

/// Charts that satisfy every active constraint, in catalog order
pub fn eligible_pairs<'a>(
    config: &'a ConfigState,
    catalog: &'a Catalog,
) -> impl Iterator<Item = (ChartRef, &'a Song, &'a Chart)> + 'a {
    matching_pairs(config, catalog, false)
}

/// Eligible charts, projected for display
pub fn eligible_charts<'a>(
    config: &'a ConfigState,
    catalog: &'a Catalog,
) -> impl Iterator<Item = EligibleChart> + 'a {
    eligible_pairs(config, catalog)
        .map(move |(chart_ref, song, chart)| project_chart(catalog, chart_ref, song, chart))
}

/// Charts a player may choose as a pocket pick
pub fn pocket_pick_options<'a>(
    config: &'a ConfigState,
    catalog: &'a Catalog,
) -> impl Iterator<Item = EligibleChart> + 'a {
    matching_pairs(config, catalog, true)
        .map(move |(chart_ref, song, chart)| project_chart(catalog, chart_ref, song, chart))
}

//! Draw entry points
//!
//! Wires the pipeline together: filter, project, bucket, plan, sample,
//! shuffle. A draw never fails; an exhausted pool just yields fewer cards.

use alloc::format;
use alloc::vec::Vec;

use crate::buckets::LevelBuckets;
use crate::catalog::Catalog;
use crate::config::ConfigState;
use crate::distribution::DrawPlan;
use crate::drawing::{DrawnChart, Drawing, DRAWING_ID_PREFIX};
use crate::eligibility::eligible_charts;
use crate::rng::{DrawRng, XorShiftRng};
use crate::sampler::Sampler;

/// Symbols in the random part of a drawing id
const DRAWING_ID_LEN: usize = 10;

/// Draw a set of charts using OS entropy
#[cfg(feature = "std")]
pub fn draw(catalog: &Catalog, config: &ConfigState) -> Drawing {
    let mut rng = XorShiftRng::from_entropy();
    draw_with_rng(catalog, config, &mut rng)
}

/// Draw a set of charts with a caller supplied random source.
///
/// The first value from `rng` seeds the id generator; every later value
/// goes to level picks, chart picks and the final shuffle, in that order.
pub fn draw_with_rng<R: DrawRng>(catalog: &Catalog, config: &ConfigState, rng: &mut R) -> Drawing {
    let mut ids = XorShiftRng::seed_from_u64(rng.next_u32() as u64);

    let buckets = LevelBuckets::build(catalog, config, eligible_charts(config, catalog));
    let plan = DrawPlan::build(config, &buckets);
    log::debug!(
        "draw: {} eligible charts, {} levels choosable, {} required picks",
        buckets.total(),
        plan.distribution.levels().count(),
        plan.required.len()
    );

    let requested = config.chart_count as usize;
    let charts = Sampler::new(plan, buckets, requested, &mut *rng, &mut ids).run();
    if charts.len() < requested {
        log::info!(
            "pool exhausted: drew {} of {} requested charts",
            charts.len(),
            requested
        );
    }

    finalize(charts, rng, &mut ids)
}

/// Shuffle the drawn cards into presentation order and wrap them up
pub fn finalize<R: DrawRng>(mut charts: Vec<DrawnChart>, rng: &mut R, ids: &mut XorShiftRng) -> Drawing {
    rng.shuffle(&mut charts);
    let id = format!("{}{}", DRAWING_ID_PREFIX, ids.gen_id(DRAWING_ID_LEN));
    Drawing::new(id, charts)
}

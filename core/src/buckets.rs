//! Level buckets
//!
//! Eligible charts grouped by level metric. Drawing removes charts from
//! their bucket so nothing is drawn twice.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::catalog::Catalog;
use crate::config::ConfigState;
use crate::projection::EligibleChart;
use crate::rng::DrawRng;

/// Map a level onto the grouping threshold when it lies above it
pub fn group_level(level: u32, grouping: Option<u32>) -> u32 {
    match grouping {
        Some(threshold) if level > threshold => threshold,
        _ => level,
    }
}

#[derive(Debug, Clone, Default)]
pub struct LevelBuckets {
    buckets: BTreeMap<u32, Vec<EligibleChart>>,
}

impl LevelBuckets {
    /// One bucket per level from 1 to the catalog's max level.
    ///
    /// Charts whose metric has no bucket are dropped.
    pub fn build<I>(catalog: &Catalog, config: &ConfigState, charts: I) -> Self
    where
        I: IntoIterator<Item = EligibleChart>,
    {
        let mut buckets: BTreeMap<u32, Vec<EligibleChart>> =
            (1..=catalog.meta.lvl_max).map(|level| (level, Vec::new())).collect();
        let grouping = config.grouping_threshold();

        let mut dropped = 0usize;
        for chart in charts {
            let key = group_level(chart.level_metric(), grouping);
            match buckets.get_mut(&key) {
                Some(bucket) => bucket.push(chart),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            log::debug!("{} eligible charts had no level bucket and were skipped", dropped);
        }

        Self { buckets }
    }

    /// Number of charts left at a level
    pub fn len(&self, level: u32) -> usize {
        self.buckets.get(&level).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, level: u32) -> bool {
        self.len(level) == 0
    }

    /// Charts left across all levels
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn charts(&self, level: u32) -> &[EligibleChart] {
        self.buckets.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Remove and return a uniformly chosen chart from a level
    pub fn take_random<R: DrawRng>(&mut self, level: u32, rng: &mut R) -> Option<EligibleChart> {
        let bucket = self.buckets.get_mut(&level)?;
        if bucket.is_empty() {
            return None;
        }
        let index = rng.gen_range(bucket.len());
        Some(bucket.remove(index))
    }
}

//! Distribution planning
//!
//! Decides how likely each level is to be picked, and under forced
//! distribution how many cards each level may and must contribute.

use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;

use crate::buckets::{group_level, LevelBuckets};
use crate::config::ConfigState;
use crate::rng::DrawRng;

/// Weighted multiset of levels.
///
/// Equivalent to a list holding each level `weight` times in ascending
/// order, picked uniformly by index, but stored as one entry per level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    entries: Vec<(u32, u32)>,
    total: u64,
}

impl Distribution {
    /// Add a level; zero weights never become choosable
    pub fn push(&mut self, level: u32, weight: u32) {
        if weight == 0 {
            return;
        }
        self.entries.push((level, weight));
        self.total += weight as u64;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Size of the expanded multiset
    pub fn total_weight(&self) -> u64 {
        self.total
    }

    pub fn weight_of(&self, level: u32) -> u32 {
        self.entries
            .iter()
            .find(|(l, _)| *l == level)
            .map_or(0, |(_, w)| *w)
    }

    pub fn levels(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|(level, _)| *level)
    }

    /// Pick one level uniformly from the expanded multiset
    pub fn pick<R: DrawRng>(&self, rng: &mut R) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        let mut target = rng.gen_range(self.total as usize) as u64;
        for &(level, weight) in &self.entries {
            if target < weight as u64 {
                return Some(level);
            }
            target -= weight as u64;
        }
        None
    }

    /// Drop every entry matching the predicate
    pub fn remove_where<F: Fn(u32) -> bool>(&mut self, pred: F) {
        self.entries.retain(|(level, _)| !pred(*level));
        self.total = self.entries.iter().map(|(_, w)| *w as u64).sum();
    }
}

/// Everything the sampler needs besides the buckets
#[derive(Debug, Clone, Default)]
pub struct DrawPlan {
    pub distribution: Distribution,
    /// Per-level draw cap, only filled under forced distribution
    pub max_per_level: BTreeMap<u32, u32>,
    /// Levels that must be drawn before random picking takes over
    pub required: VecDeque<u32>,
    pub grouping: Option<u32>,
}

impl DrawPlan {
    pub fn build(config: &ConfigState, buckets: &LevelBuckets) -> Self {
        let mut distribution = Distribution::default();
        let mut total_weight: u64 = 0;

        for level in config.lower_bound..=config.upper_bound {
            let weight = if config.use_weights {
                config.weight(level)
            } else {
                buckets.len(level) as u32
            };
            total_weight += weight as u64;
            distribution.push(level, weight);
        }

        let grouping = config.grouping_threshold();
        let mut max_per_level = BTreeMap::new();
        let mut required = VecDeque::new();
        if config.forced_distribution() {
            for level in config.lower_bound..=config.upper_bound {
                let max = proportional_cap(config.chart_count, config.weight(level), total_weight);
                max_per_level.insert(level, max);
                // picks past the bucket's population would only be skipped
                let available = buckets.len(group_level(level, grouping));
                let copies = (max.saturating_sub(1) as usize).min(available);
                required.extend(core::iter::repeat(level).take(copies));
            }
        }

        Self {
            distribution,
            max_per_level,
            required,
            grouping,
        }
    }

    /// Bucket key a distribution level resolves to
    pub fn group(&self, level: u32) -> u32 {
        group_level(level, self.grouping)
    }

    /// Draw cap for a bucket key, if forced distribution set one
    pub fn cap(&self, level: u32) -> Option<u32> {
        self.max_per_level.get(&level).copied()
    }

    /// Whether any distribution entry still resolves to this bucket key
    pub fn is_choosable(&self, level: u32) -> bool {
        self.distribution.levels().any(|l| self.group(l) == level)
    }

    /// Remove every entry resolving to this bucket key
    pub fn exhaust(&mut self, level: u32) {
        let grouping = self.grouping;
        self.distribution
            .remove_where(|l| group_level(l, grouping) == level);
    }
}

/// `ceil(count * weight / total)`, with a zero total contributing nothing
pub fn proportional_cap(count: u32, weight: u32, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = count as u64 * weight as u64;
    scaled.div_ceil(total) as u32
}

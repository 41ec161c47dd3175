//! Constrained sampling without replacement
//!
//! Each step picks a level (required levels first, then by weight), takes a
//! random chart out of that level's bucket, and retires the level once its
//! bucket is empty or its forced cap is reached.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::buckets::LevelBuckets;
use crate::distribution::DrawPlan;
use crate::drawing::{fresh_chart_id, DrawnChart};
use crate::rng::{DrawRng, XorShiftRng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    Sampling,
    /// Requested count reached
    Filled,
    /// No choosable level remains; the draw is short
    Exhausted,
}

pub struct Sampler<'a, R: DrawRng> {
    plan: DrawPlan,
    buckets: LevelBuckets,
    target: usize,
    rng: &'a mut R,
    ids: &'a mut XorShiftRng,
    drawn: Vec<DrawnChart>,
    counts: BTreeMap<u32, u32>,
}

impl<'a, R: DrawRng> Sampler<'a, R> {
    pub fn new(
        plan: DrawPlan,
        buckets: LevelBuckets,
        target: usize,
        rng: &'a mut R,
        ids: &'a mut XorShiftRng,
    ) -> Self {
        // target comes straight from config and may dwarf the pool
        let capacity = target.min(buckets.total());
        Self {
            plan,
            buckets,
            target,
            rng,
            ids,
            drawn: Vec::with_capacity(capacity),
            counts: BTreeMap::new(),
        }
    }

    pub fn state(&self) -> SamplerState {
        if self.drawn.len() >= self.target {
            SamplerState::Filled
        } else if self.plan.distribution.is_empty() {
            SamplerState::Exhausted
        } else {
            SamplerState::Sampling
        }
    }

    /// Cards drawn so far per bucket key
    pub fn counts(&self) -> &BTreeMap<u32, u32> {
        &self.counts
    }

    pub fn drawn(&self) -> &[DrawnChart] {
        &self.drawn
    }

    /// Run one pick; a no-op once sampling is done
    pub fn step(&mut self) -> SamplerState {
        if self.state() != SamplerState::Sampling {
            return self.state();
        }
        let Some(level) = self.next_level() else {
            return self.state();
        };

        if let Some(chart) = self.buckets.take_random(level, &mut *self.rng) {
            let drawn = &self.drawn;
            let id = fresh_chart_id(&mut *self.ids, |id| drawn.iter().any(|c| c.id == id));
            log::trace!("drew {} at level {} as {}", chart.chart_ref, level, id);
            self.drawn.push(DrawnChart::new(id, chart));
            *self.counts.entry(level).or_insert(0) += 1;
        }

        let drawn_at_level = self.counts.get(&level).copied().unwrap_or(0);
        let bucket_empty = self.buckets.is_empty(level);
        let reached_cap = self.plan.cap(level).is_some_and(|max| drawn_at_level >= max);
        if bucket_empty || reached_cap {
            log::trace!(
                "retiring level {} (bucket empty: {}, cap reached: {})",
                level,
                bucket_empty,
                reached_cap
            );
            self.plan.exhaust(level);
        }

        self.state()
    }

    /// Step until filled or exhausted
    pub fn run(mut self) -> Vec<DrawnChart> {
        while self.step() == SamplerState::Sampling {}
        self.drawn
    }

    /// Required levels come first; ones already retired are skipped
    fn next_level(&mut self) -> Option<u32> {
        while let Some(required) = self.plan.required.pop_front() {
            let level = self.plan.group(required);
            if self.plan.is_choosable(level) {
                return Some(level);
            }
        }
        let picked = self.plan.distribution.pick(&mut *self.rng)?;
        Some(self.plan.group(picked))
    }
}

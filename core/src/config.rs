//! Draw configuration snapshot
//!
//! Owned by whoever stores the user's settings; the engine only reads a copy.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::format;
use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{DrawError, DrawResult};

/// Color tag assumed for charts that do not carry one
pub const UNCOLORED: &str = "uncolored";

/// Chart count used when a catalog is first loaded
pub const DEFAULT_CHART_COUNT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    pub style: String,
    /// Accepted difficulty class keys
    #[serde(default)]
    pub difficulties: BTreeSet<String>,
    /// Accepted color tags
    #[serde(default)]
    pub mtg_color: BTreeSet<String>,
    /// Accepted song and chart flags
    #[serde(default)]
    pub flags: BTreeSet<String>,
    pub lower_bound: u32,
    pub upper_bound: u32,
    pub chart_count: u32,
    #[serde(default)]
    pub use_weights: bool,
    /// Weight per level, unset levels weigh 0
    #[serde(default, deserialize_with = "weights::deserialize")]
    pub weights: BTreeMap<u32, u32>,
    #[serde(default = "default_true")]
    pub force_distribution: bool,
    #[serde(default)]
    pub group_songs_at: Option<u32>,
    #[serde(default = "default_true")]
    pub constrain_pocket_picks: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ConfigState {
    fn default() -> Self {
        Self {
            style: String::new(),
            difficulties: BTreeSet::new(),
            mtg_color: BTreeSet::new(),
            flags: BTreeSet::new(),
            lower_bound: 0,
            upper_bound: 0,
            chart_count: DEFAULT_CHART_COUNT,
            use_weights: false,
            weights: BTreeMap::new(),
            force_distribution: true,
            group_songs_at: None,
            constrain_pocket_picks: true,
        }
    }
}

impl ConfigState {
    /// Seed a config from the defaults a catalog ships with
    pub fn from_catalog_defaults(catalog: &Catalog) -> Self {
        let defaults = &catalog.defaults;
        let mut mtg_color: BTreeSet<String> = catalog
            .meta
            .mtg_color
            .iter()
            .flatten()
            .map(|c| c.key.clone())
            .collect();
        mtg_color.insert(String::from(UNCOLORED));

        let upper_bound = if defaults.upper_lvl_bound == 0 {
            catalog.meta.lvl_max
        } else {
            defaults.upper_lvl_bound
        };

        Self {
            style: defaults.style.clone(),
            difficulties: defaults.difficulties.iter().cloned().collect(),
            mtg_color,
            flags: defaults.flags.iter().cloned().collect(),
            lower_bound: defaults.lower_lvl_bound,
            upper_bound,
            ..Self::default()
        }
    }

    /// Parse a config snapshot from JSON
    #[cfg(feature = "std")]
    pub fn from_json_str(json: &str) -> DrawResult<Self> {
        serde_json::from_str(json).map_err(|e| DrawError::InvalidConfig {
            reason: format!("{}", e),
        })
    }

    /// Reject snapshots no draw could make sense of
    pub fn validate(&self) -> DrawResult<()> {
        if self.lower_bound > self.upper_bound {
            return Err(DrawError::InvalidConfig {
                reason: format!(
                    "lower bound {} is above upper bound {}",
                    self.lower_bound, self.upper_bound
                ),
            });
        }
        if self.chart_count == 0 {
            return Err(DrawError::InvalidConfig {
                reason: String::from("chart count must be at least 1"),
            });
        }
        Ok(())
    }

    /// Configured weight for a level
    pub fn weight(&self, level: u32) -> u32 {
        self.weights.get(&level).copied().unwrap_or(0)
    }

    /// Forced distribution only applies on top of custom weights
    pub fn forced_distribution(&self) -> bool {
        self.use_weights && self.force_distribution
    }

    /// Level at which higher charts collapse into one bucket, if active
    pub fn grouping_threshold(&self) -> Option<u32> {
        if !self.use_weights {
            return None;
        }
        self.group_songs_at.filter(|&level| level > 0)
    }
}

/// Accepts weights keyed by level, or the sparse array form where the
/// index is the level and `null` marks an unset weight.
mod weights {
    use alloc::collections::BTreeMap;
    use core::fmt;

    use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<u32, u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(WeightsVisitor)
    }

    struct WeightsVisitor;

    impl<'de> Visitor<'de> for WeightsVisitor {
        type Value = BTreeMap<u32, u32>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of level to weight or an array of weights")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut weights = BTreeMap::new();
            while let Some((level, weight)) = map.next_entry::<u32, Option<u32>>()? {
                if let Some(weight) = weight {
                    weights.insert(level, weight);
                }
            }
            Ok(weights)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut weights = BTreeMap::new();
            let mut level = 0u32;
            while let Some(weight) = seq.next_element::<Option<u32>>()? {
                if let Some(weight) = weight {
                    weights.insert(level, weight);
                }
                level += 1;
            }
            Ok(weights)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(BTreeMap::new())
        }
    }
}

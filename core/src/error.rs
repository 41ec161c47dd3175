//! Error types for catalog loading and drawing actions
//!
//! The draw itself never fails; these cover the edges around it.

use alloc::string::String;
use core::fmt;

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Errors raised outside the draw engine proper
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "std",
    serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum DrawError {
    /// Catalog data could not be parsed
    InvalidCatalog { reason: String },
    /// Config snapshot could not be parsed or is inconsistent
    InvalidConfig { reason: String },
    /// No drawn chart carries this id
    UnknownChart { chart_id: String },
    /// Chart is already protected, banned or pocket picked
    ChartAlreadyClaimed { chart_id: String },
    /// Sync payload did not decode to a drawing
    SyncDecode,
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::InvalidCatalog { reason } => write!(f, "invalid catalog: {}", reason),
            DrawError::InvalidConfig { reason } => write!(f, "invalid config: {}", reason),
            DrawError::UnknownChart { chart_id } => write!(f, "no drawn chart with id {}", chart_id),
            DrawError::ChartAlreadyClaimed { chart_id } => {
                write!(f, "chart {} already has a protect, ban or pocket pick", chart_id)
            }
            DrawError::SyncDecode => f.write_str("sync payload is not a valid drawing"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DrawError {}

/// Result type alias for fallible operations around a draw
pub type DrawResult<T> = Result<T, DrawError>;

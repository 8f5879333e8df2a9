use serde::{Deserialize, Serialize};

/// Outcome of one pass over all assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRefreshResult {
    pub success: bool,
    /// Assets whose price was written.
    pub updated: usize,
    /// Assets for which no price could be fetched.
    pub skipped: usize,
}

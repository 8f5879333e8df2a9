use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Latest published NAV of a single mutual-fund scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutualFundNav {
    pub scheme_code: String,
    pub scheme_name: String,
    pub nav: f64,
    /// Publication date as printed by the source (e.g. `17-Oct-2026`).
    pub date: String,
    /// Epoch milliseconds at which the row was parsed.
    pub last_updated: i64,
}

/// NAVs keyed by scheme code.
pub type NavMap = HashMap<String, MutualFundNav>;

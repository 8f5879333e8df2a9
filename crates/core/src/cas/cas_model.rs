use serde::{Deserialize, Serialize};

/// One mutual-fund position read from a statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasHolding {
    pub folio_number: String,
    pub scheme_name: String,
    pub amc_name: String,
    pub registrar: String,
    pub units: f64,
    pub nav: f64,
    pub current_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_value: Option<f64>,
}

/// Investor details and holdings extracted from a statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasStatement {
    pub pan: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub generated_date: String,
    pub holdings: Vec<CasHolding>,
}

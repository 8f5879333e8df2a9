use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::cas_model::{CasHolding, CasStatement};
use crate::constants::CAS_REGISTRAR;

lazy_static! {
    static ref AMC_HEADER: Regex = Regex::new(r"^[A-Z\s&]+MUTUAL FUND$").unwrap();
    static ref FOLIO: Regex = Regex::new(r"Folio No:\s*(\S+)").unwrap();
    static ref FIGURES: Regex =
        Regex::new(r"([0-9]+\.?[0-9]*)\s+([0-9]+\.?[0-9]*)\s+([0-9]+\.?[0-9]*)").unwrap();
}

const FOLIO_LABEL: &str = "Folio No:";
const AMC_SUFFIX: &str = "MUTUAL FUND";

/// Lines after the folio line that may carry the units/NAV/value figures,
/// counted from the folio line itself.
const FIGURES_WINDOW_START: usize = 2;
const FIGURES_WINDOW_END: usize = 10;

/// Parse the text of a CAMS consolidated account statement.
///
/// Never fails: anything unrecognised is skipped, so malformed input yields a
/// statement with empty fields and no holdings.
pub fn parse_cas_text(text: &str) -> CasStatement {
    let lines: Vec<&str> = text.split('\n').collect();

    let mut statement = CasStatement::default();
    for line in &lines {
        if let Some(value) = value_after(line, "PAN:") {
            statement.pan = value;
        }
        if let Some(value) = value_after(line, "Name:") {
            statement.name = value;
        }
        if let Some(value) = value_after(line, "Email:") {
            statement.email = value;
        }
        if let Some(value) = value_after(line, "Mobile:") {
            statement.mobile = value;
        }
    }

    statement.holdings = scan_holdings(&lines);
    debug!("Parsed {} holdings from CAS text", statement.holdings.len());
    statement
}

/// Text following the first occurrence of `label` in `line`, trimmed.
fn value_after(line: &str, label: &str) -> Option<String> {
    line.find(label)
        .map(|pos| line[pos + label.len()..].trim().to_string())
}

fn scan_holdings(lines: &[&str]) -> Vec<CasHolding> {
    let mut holdings = Vec::new();
    let mut current_amc = String::new();

    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();

        if AMC_HEADER.is_match(line) {
            current_amc = line.replacen(AMC_SUFFIX, "", 1).trim().to_string();
            continue;
        }

        if !line.contains(FOLIO_LABEL) {
            continue;
        }

        let folio_number = FOLIO
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let scheme_name = lines
            .get(i + 1)
            .map(|next| next.trim().to_string())
            .unwrap_or_default();

        let window_end = (i + FIGURES_WINDOW_END).min(lines.len());
        for candidate in lines
            .iter()
            .take(window_end)
            .skip(i + FIGURES_WINDOW_START)
        {
            let Some((units, nav, current_value)) = figures(candidate) else {
                continue;
            };
            if units > 0.0 && nav > 0.0 {
                holdings.push(CasHolding {
                    folio_number: folio_number.clone(),
                    scheme_name: scheme_name.clone(),
                    amc_name: current_amc.clone(),
                    registrar: CAS_REGISTRAR.to_string(),
                    units,
                    nav,
                    current_value,
                    cost_value: None,
                });
                break;
            }
        }
    }

    holdings
}

fn figures(line: &str) -> Option<(f64, f64, f64)> {
    let caps = FIGURES.captures(line)?;
    let parse = |idx: usize| -> Option<f64> { caps.get(idx)?.as_str().parse::<f64>().ok() };
    Some((parse(1)?, parse(2)?, parse(3)?))
}

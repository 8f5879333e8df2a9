//! Consolidated Account Statement (CAS) parsing.

mod cas_model;
mod cas_parser;


pub use cas_model::{CasHolding, CasStatement};
pub use cas_parser::parse_cas_text;

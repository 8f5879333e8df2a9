//! Market data models

mod nav;

pub use nav::{MutualFundNav, NavMap};

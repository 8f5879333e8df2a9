//! NAV provider abstraction and the AMFI implementation.

mod traits;

pub mod amfi;

pub use traits::NavProvider;

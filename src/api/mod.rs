mod types;

pub use types::*;

#[cfg(feature = "actix")]
pub mod actix;

#[cfg(feature = "axum_support")]
pub mod axum;

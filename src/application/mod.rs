// Application layer - orchestration over the pure domain functions.
// Holds the rate provider; everything else is passed in per call.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;

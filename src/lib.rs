pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod io;
pub mod rates;

pub use domain::*;
pub use rates::{RateError, RateProvider};

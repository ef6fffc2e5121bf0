pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use error::{GuildError, Result};

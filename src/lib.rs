pub mod cli;
pub mod core;
pub mod environment;
pub mod error;
pub mod types;
pub mod utils;
pub mod web;

pub use error::{BoardError, BoardResult};
pub use web::{build_rocket, start_web_server};

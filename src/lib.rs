pub mod aggregate;
pub mod cli;
pub mod error;
pub mod loader;
pub mod model;
pub mod output;
pub mod rank;
pub mod score;

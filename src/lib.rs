// manga-colorizer - Gemini relay for colorizing black-and-white manga pages
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod colorize;
pub mod config;
pub mod error;
pub mod extraction;
pub mod gemini;
pub mod metrics;
pub mod models;
pub mod server;
pub mod utils;
pub mod vision;

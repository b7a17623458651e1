pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod models;
pub mod output;

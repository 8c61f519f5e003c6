pub mod adjacency;
pub mod config;
pub mod dataset;
pub mod history;
pub mod import;
pub mod models;
pub mod report;
pub mod sampler;
pub mod scores;

// pagegrade: heuristic audit and scoring for social-media business pages
//
// This is the library root. The evaluation core (metrics, benchmarks,
// triggers, scoring, analysis) is pure and synchronous; graph, pipeline, db
// and web wrap it with I/O.

pub mod analysis;
pub mod benchmarks;
pub mod compare;
pub mod config;
pub mod db;
pub mod graph;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod status;
pub mod trends;
pub mod triggers;

#[cfg(feature = "web")]
pub mod web;

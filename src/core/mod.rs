//! Core module: records, evolution pipeline, reports and store access

pub mod api;
pub mod config;
pub mod dashboard;
pub mod evolution;
pub mod forms;
pub mod models;
pub mod report;

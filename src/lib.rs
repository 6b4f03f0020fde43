pub mod config;
pub mod data;
pub mod integration;
pub mod logging;

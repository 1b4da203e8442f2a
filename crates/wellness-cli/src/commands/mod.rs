pub mod config;
pub mod habit;
pub mod mood;
pub mod remind;
pub mod steps;
pub mod water;

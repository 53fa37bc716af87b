// Crate root library declaration and module exports.
pub mod calendar;
pub mod cli;
pub mod config;
pub mod context;
pub mod engine;
pub mod format;
pub mod lectionary;
pub mod model;
pub mod office;
pub mod prayers;
pub mod psalter;
pub mod saints;
pub mod scripture;
pub mod source;
pub mod warning;

// File: ./src/model/mod.rs
pub mod component;
pub mod day;
pub mod rubric;
pub mod saint;
pub mod season;

pub use component::{Component, ComponentLibrary, ComponentText};
pub use day::{DayEntry, DayPart};
pub use rubric::{Rubric, find_rubric};
pub use saint::Saint;
pub use season::{LiturgicalColor, LiturgicalYear, Season, SeasonRange};

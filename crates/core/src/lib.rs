#![forbid(unsafe_code)]

pub mod adapt;
pub mod bank;
pub mod evaluate;
pub mod model;
pub mod report;
pub mod time;

pub use time::Clock;

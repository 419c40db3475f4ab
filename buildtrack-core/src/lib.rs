pub mod aggregation;
pub mod calendar;
pub mod dates;
pub mod domain;
mod error;
pub mod inventory;
pub mod metrics;
pub mod notifications;
pub mod qaqc;

pub use error::*;

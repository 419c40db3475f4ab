mod assistant;
mod inventory;
mod projects;
mod qaqc;

pub use assistant::*;
pub use inventory::*;
pub use projects::*;
pub use qaqc::*;

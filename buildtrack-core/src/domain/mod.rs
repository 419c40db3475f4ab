mod acceptance;
mod calendar_note;
mod ids;
mod notification;
mod pccc_material;
mod project;

pub use acceptance::*;
pub use calendar_note::*;
pub use ids::*;
pub use notification::*;
pub use pccc_material::*;
pub use project::*;

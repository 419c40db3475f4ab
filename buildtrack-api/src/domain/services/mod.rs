mod assistant;
mod inventory;
mod projects;
mod qaqc;

pub use assistant::AssistantServiceImpl;
pub use inventory::InventoryServiceImpl;
pub use projects::ProjectServiceImpl;
pub use qaqc::QaqcServiceImpl;

mod gemini;
pub mod memory;
#[cfg(test)]
mod mock;

pub use gemini::{DisabledCompletionClient, GeminiCompletionClient};
pub use memory::MemoryRecordStore;
#[cfg(test)]
pub use mock::MockCompletion;

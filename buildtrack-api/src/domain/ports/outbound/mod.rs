mod completion;
mod record_store;

pub use completion::*;
pub use record_store::*;

pub mod cli;
pub mod cli_handlers;
pub mod error;
pub mod infer;
pub mod store;
pub mod task;
pub mod url;

pub use error::{Result, TaskError};
pub use store::Store;
pub use task::Task;

// Utils compartidos

pub mod constants;
pub mod storage;
pub mod image;
pub mod countdown;
pub mod validation;

pub use constants::*;
pub use storage::{BrowserStorage, KeyValueStore, MemoryStorage};
pub use countdown::Countdown;
pub use validation::FieldErrors;

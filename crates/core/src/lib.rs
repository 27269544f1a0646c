#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod stats;
pub mod time;

pub use catalog::{Direction, QuestionCatalog};
pub use error::Error;
pub use time::Clock;

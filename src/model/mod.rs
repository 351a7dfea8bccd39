pub mod board;
pub mod collection;
pub mod config;

pub use board::*;
pub use collection::*;
pub use config::*;

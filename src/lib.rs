pub mod cli;
pub mod error;
pub mod postal;
pub mod screen;

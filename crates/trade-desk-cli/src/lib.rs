/*
[INPUT]:  Command line arguments and YAML configuration
[OUTPUT]: Trade desk command runner
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod commands;
pub mod config;

pub use commands::{Command, run};
pub use config::DeskConfig;

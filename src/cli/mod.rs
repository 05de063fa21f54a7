pub mod cli;

pub use cli::{CommandArgs, Commands, ProbeArgs, ProcessesCommand, ServeArgs};

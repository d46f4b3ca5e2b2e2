pub mod commands;
pub mod ops;
pub mod repl;
pub mod startup;
pub mod state;

pub use startup::run;

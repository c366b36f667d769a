pub mod runner;
pub mod stage;

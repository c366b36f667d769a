pub mod options;
pub mod runtime;

pub mod previewer;
pub mod sizing;

pub mod screen;
pub mod surface;

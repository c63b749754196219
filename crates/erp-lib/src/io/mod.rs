pub mod matrix;
pub mod signal;
pub mod trials;

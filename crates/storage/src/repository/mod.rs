pub mod memory;
pub mod score;

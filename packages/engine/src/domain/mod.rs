pub mod content;
pub mod elements;

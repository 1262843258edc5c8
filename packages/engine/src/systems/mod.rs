pub mod behaviors;
pub mod reactions;

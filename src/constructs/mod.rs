pub mod components;
pub mod constraints;
pub mod functions;
pub mod rows;
pub mod statements;

pub use components::Validatable;

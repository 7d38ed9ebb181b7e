pub mod class;
pub mod model;

pub mod model;
pub mod proto;

pub use model::*;

pub mod entities;
pub mod extraction;
pub mod gateway;
pub mod naive_parser;
pub mod normalize;
pub mod ports;
pub mod prompts;
pub mod risk;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;

pub mod resolver;
pub mod visual;
pub mod weather;

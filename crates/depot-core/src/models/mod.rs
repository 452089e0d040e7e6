pub mod pkg;

pub use pkg::*;

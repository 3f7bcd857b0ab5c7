//! Wave-based search over the usage-segmented expression pool

mod core;
mod errors;
mod generator;
mod pool;

pub use self::core::Solutions;
pub use errors::SolverError;

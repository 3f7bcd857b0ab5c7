//! Expression module split into submodules for clarity

mod ast;
mod display;
mod keys;
mod normalize;

pub use ast::{Expr, Op};
pub use display::Annotated;
pub use keys::{Numeric, Structural};

#[cfg(test)]
mod tests;

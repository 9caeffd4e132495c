//! Strategy implementations.

pub mod expected;
pub mod minimax;
pub mod random;

//! Discrete reference distributions.

mod binomial;

pub use binomial::Binomial;

//! Continuous reference distributions of the test statistics.

mod chi_squared;
mod f_distribution;
mod normal;
mod student_t;

pub use chi_squared::ChiSquared;
pub use f_distribution::FDistribution;
pub use normal::Normal;
pub use student_t::StudentT;

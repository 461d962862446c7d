//! Per-request cost accounting.
//!
//! [`TokenUsage`] goes in, [`CostBreakdown`] comes out. Every ratio helper
//! returns `0` instead of dividing by zero.

mod cost;
mod savings;
mod usage;

pub use cost::{Accountant, CostBreakdown, calculate_cost};
pub use savings::{
    CacheSavings, Savings, cached_share, calculate_cache_savings, calculate_savings,
    percentage_of,
};
pub use usage::TokenUsage;

//! Per-model token pricing for the demo providers.
//!
//! Prices are hardcoded demo constants, optionally overridden through
//! configuration. Nothing is fetched live.

mod builtin;
mod model;
mod table;

pub use model::ModelPricing;
pub use table::{
    PriceResolution, PricingTable, PricingTableBuilder, ResolvedPrice, config_segment,
    global_pricing_table,
};

pub const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Cached input is billed at this fraction of the input rate unless a
/// cached rate is given explicitly.
pub const CACHE_READ_DISCOUNT: f64 = 0.1;

pub const DEFAULT_PROVIDER: &str = "groq";
pub const DEFAULT_MODEL: &str = "llama-3.1-70b-versatile";

/// Prefix for configuration read from the environment.
pub const ENV_PREFIX: &str = "PROMPT_COST_";

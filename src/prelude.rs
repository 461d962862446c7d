//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust
//! use prompt_cost::prelude::*;
//! ```

// Core types
pub use crate::Error;
pub use crate::Result;

// Accounting
pub use crate::accounting::{Accountant, CostBreakdown, Savings, TokenUsage};
pub use crate::accounting::{calculate_cost, calculate_savings};

// Pricing
pub use crate::pricing::{ModelPricing, PriceResolution, PricingTable, PricingTableBuilder};

// Projection
pub use crate::projection::{ProjectionResult, ProjectionScenario, Projector};

// Tokens
pub use crate::tokens::{CharHeuristic, ReportedUsage, SessionTurn, TokenEstimator};

// Responders and sessions
pub use crate::responder::{DocumentRequest, ModelResponse, Responder, SimulatedResponder};
pub use crate::session::{ResultsLedger, SessionSummary};

// Config
pub use crate::config::{ConfigBuilder, ConfigProvider, ConfigProviderExt, Settings};

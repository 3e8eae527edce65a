//! # Tradelog Analytics Engine
//!
//! This crate turns an ordered list of journal trades into summary statistics.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0). Callers query the store and pass
//!   the trades in.
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless calculator with no
//!   error path: every input, including an empty one, yields a defined summary.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: Realized returns per trade and the full summary.
//! - `AnalyticsSummary`: Win rate, profit factor, max drawdown, Sharpe, Sortino, expectancy.
//! - `metrics`: The individual metric functions over a return series.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod metrics;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use report::AnalyticsSummary;

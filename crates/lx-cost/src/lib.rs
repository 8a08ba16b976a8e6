//! `lx-cost`: secondary logistics metrics derived from a route.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`cost`]  | `CostModel`, `CostBreakdown`                                  |
//! | [`toll`]  | `TollEstimator`, `TollEstimate`, `TollSegment`                |
//! | [`eta`]   | `EtaEstimator`, `Departure`, `Season`, `RiskFactor`, `EtaEstimate` |
//! | [`error`] | `CostError`, `CostResult<T>`                                  |
//!
//! # Design notes
//!
//! Each estimator owns a copy of its rate block from
//! [`lx_core::EngineConfig`] and is a pure function of its inputs.  None of
//! them mutate the `Route` they are given or depend on each other's output,
//! so a request can run all three in any order.

pub mod cost;
pub mod error;
pub mod eta;
pub mod toll;

#[cfg(test)]
mod tests;

pub use cost::{CostBreakdown, CostModel};
pub use error::{CostError, CostResult};
pub use eta::{Departure, EtaEstimate, EtaEstimator, RiskFactor, RiskKind, Season};
pub use toll::{TollEstimate, TollEstimator, TollSegment};

//! `lx-network`: city road graph, CSV loading, and shortest-path routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `CityGraph` (CSR + R-tree), `CityGraphBuilder`              |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`                   |
//! | [`cache`]   | `CachedRouter` read-through route cache                     |
//! | [`loader`]  | `load_graph_csv`, `load_graph_readers`                      |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod cache;
pub mod error;
pub mod loader;
pub mod network;
pub mod router;


pub use cache::CachedRouter;
pub use error::{NetworkError, NetworkResult};
pub use loader::{load_graph_csv, load_graph_readers};
pub use network::{CityGraph, CityGraphBuilder};
pub use router::{DijkstraRouter, Route, Router};

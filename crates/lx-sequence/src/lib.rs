//! `lx-sequence`: multi-stop visiting order.
//!
//! [`Sequencer`] orders an unordered set of stops with the greedy
//! nearest-neighbour heuristic: from the current city, travel to the closest
//! unvisited stop by road distance, repeat.  The result is a locally greedy
//! tour, not an optimal one; [`StopSequence::total_distance_km`] reports the
//! realised distance so callers see the heuristic's actual cost.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Routes to all candidate stops concurrently with Rayon.     |
//! |            | The chosen order is identical to the sequential build.     |
//! | `serde`    | Adds `Serialize`/`Deserialize` to [`StopSequence`].        |

pub mod error;
pub mod sequencer;

#[cfg(test)]
mod tests;

pub use error::{SequenceError, SequenceResult};
pub use sequencer::{Sequencer, StopSequence};

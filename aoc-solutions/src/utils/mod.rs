//! Shared building blocks for puzzle solutions.

pub mod dp_cache;
pub mod maze;
pub mod pathfinding;

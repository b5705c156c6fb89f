//! Depth-first search engines and solution checking for black-hole and
//! worm-hole patience puzzles.

mod checker;
mod generator;
mod node;
mod solver;

pub use crate::checker::{Checker, check};
pub use crate::generator::{MoveBuf, can_play, legal_moves};
pub use crate::node::Node;
pub use crate::solver::{
    DEFAULT_BUDGET, SearchError, SearchOptions, SolveReport, Solver, Strategy, solve,
};

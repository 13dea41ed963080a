//! Evaluation module for tic-tac-toe positions
//!
//! Search-free scoring with a fixed linear model over cell occupancy.

pub mod linear;

pub use linear::{LinearModel, PRETRAINED};

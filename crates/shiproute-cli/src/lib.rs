//! Ship route planner terminal front end.
//!
//! Reads the route form from command-line flags, drives a
//! [`shiproute_lib::RouteSession`] against a headless map, and prints the
//! outcome.

pub mod commands;
pub mod logging;
pub mod output;
pub mod terminal;

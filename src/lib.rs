//! Trip budget allocation: spending categories whose percentage shares always
//! sum to 100, with monetary amounts and per-day affordability derived from
//! them. Nothing here does I/O; the binary wraps it in a CLI and a TUI.

pub mod affordability;
pub mod allocator;
pub mod models;

//! Core loop of a vertical scrolling shooter: entity motion, time-driven
//! spawning, axis-aligned collision and power-up effects.
//!
//! Everything here is pure with respect to the outside world — all timing
//! arrives through `now_ms` / `dt` parameters and all randomness through an
//! injected RNG handle, so the whole loop can be driven by a simulated
//! clock under test.  Terminal rendering and input live in the binary.

pub mod collision;
pub mod compute;
pub mod effects;
pub mod entities;
pub mod spawn;

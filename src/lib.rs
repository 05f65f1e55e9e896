//! hexcast - Deterministic hexagram casting
//!
//! A reading is derived from a timestamp, a client address and a requester
//! identifier: the composed seed string is hashed with SHA-256, drives a
//! xorshift32 stream, and six drawn lines yield the main, changed and
//! mutual hexagrams. The same inputs always give the same reading.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{generate, generate_now, Hexagram, HexagramId, Line, Reading, SeedInput};

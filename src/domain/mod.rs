//! Domain models for hexcast
//!
//! Contains the reading algorithm without any I/O concerns.

mod line;
mod hexagram;
mod rng;
mod seed;
mod reading;

pub use line::{Line, LineError};
pub use hexagram::{Hexagram, HexagramId, HexagramIdError, Trigram};
pub use rng::{hash_seed, seed_from_digest, XorShift32, FALLBACK_SEED};
pub use seed::{Coordinates, GenerateError, SeedInput, SeedRecord, UNKNOWN_ADDRESS};
pub use reading::{draw_lines, generate, generate_now, Hexagrams, Reading, STATUS_OK};

//! Readings: the main, changed and mutual hexagrams cast from one seed
//!
//! [`generate`] is a pure function of its [`SeedInput`]. Capturing the
//! clock, choosing a client address and applying overrides belong to the
//! caller; [`generate_now`] is the only entry point that reads the clock.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::hexagram::{Hexagram, HexagramId};
use super::line::Line;
use super::rng::XorShift32;
use super::seed::{GenerateError, SeedInput, SeedRecord};

/// Status code carried by every successfully produced reading
pub const STATUS_OK: u16 = 200;

/// The three hexagrams of a reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hexagrams {
    pub main: Hexagram,
    pub changed: Hexagram,
    pub mutual: Hexagram,
}

impl Hexagrams {
    /// Derives changed and mutual hexagrams from the main figure
    pub fn derive(main: Hexagram) -> Self {
        let changed = main.changed();
        let mutual = main.mutual();
        Self {
            main,
            changed,
            mutual,
        }
    }
}

/// A complete reading and the seed it was cast from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub code: u16,
    pub seed: SeedRecord,
    pub hexagrams: Hexagrams,
}

impl Reading {
    /// Returns the main hexagram's identifier
    pub fn main_id(&self) -> HexagramId {
        self.hexagrams.main.id
    }

    /// Builds a reading whose main hexagram is fixed by the caller
    ///
    /// The seed is still validated and recorded, but no lines are drawn:
    /// the main figure uses young lines only, so the changed hexagram
    /// equals the main one.
    pub fn with_override(input: &SeedInput, id: HexagramId) -> Result<Self, GenerateError> {
        let (seed_string, _) = input.hashed()?;
        let main = Hexagram::from_lines(id.young_lines());

        Ok(Self {
            code: STATUS_OK,
            seed: SeedRecord {
                input: input.clone(),
                seed_string,
            },
            hexagrams: Hexagrams::derive(main),
        })
    }
}

/// Draws six lines, bottom to top, from a seeded stream
pub fn draw_lines(rng: &mut XorShift32) -> [Line; 6] {
    std::array::from_fn(|_| Line::from_draw(rng.next_f64()))
}

/// Casts a reading from explicit seed inputs
pub fn generate(input: &SeedInput) -> Result<Reading, GenerateError> {
    let (seed_string, hashed) = input.hashed()?;
    let mut rng = XorShift32::new(hashed);
    let main = Hexagram::from_lines(draw_lines(&mut rng));

    Ok(Reading {
        code: STATUS_OK,
        seed: SeedRecord {
            input: input.clone(),
            seed_string,
        },
        hexagrams: Hexagrams::derive(main),
    })
}

/// Casts a reading using the current time as the timestamp
pub fn generate_now(requester_id: &str, client_address: &str) -> Result<Reading, GenerateError> {
    let input = SeedInput::new(requester_id, client_address, Utc::now().timestamp_millis());
    generate(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::{Coordinates, UNKNOWN_ADDRESS};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn golden_input() -> SeedInput {
        SeedInput::new("u1", UNKNOWN_ADDRESS, 1_700_000_000_000)
    }

    #[test]
    fn golden_reading() {
        let reading = generate(&golden_input()).unwrap();

        assert_eq!(reading.code, 200);
        assert_eq!(reading.seed.seed_string, "1700000000000@0.0.0.0#u1");
        assert_eq!(reading.hexagrams.main.values(), [9, 9, 6, 8, 7, 8]);
        assert_eq!(reading.hexagrams.main.id.to_string(), "Q20");
        assert_eq!(reading.hexagrams.changed.values(), [8, 8, 7, 8, 7, 8]);
        assert_eq!(reading.hexagrams.changed.id.to_string(), "Q21");
        assert_eq!(reading.hexagrams.mutual.values(), [9, 6, 8, 6, 8, 7]);
        assert_eq!(reading.hexagrams.mutual.id.to_string(), "Q34");
    }

    #[test]
    fn neighbouring_timestamp_vector() {
        let input = SeedInput::new("u1", UNKNOWN_ADDRESS, 1_700_000_000_001);
        let reading = generate(&input).unwrap();

        assert_eq!(reading.hexagrams.main.values(), [8, 6, 6, 8, 6, 7]);
        assert_eq!(reading.main_id().to_string(), "Q33");
        assert_eq!(reading.hexagrams.changed.id.to_string(), "Q55");
        assert_eq!(reading.hexagrams.mutual.id.to_string(), "Q1");
    }

    #[test]
    fn invalid_input_fails_fast() {
        let input = SeedInput::new("", UNKNOWN_ADDRESS, 1);
        assert_eq!(generate(&input), Err(GenerateError::EmptyRequester));

        let input = SeedInput::new("u1", UNKNOWN_ADDRESS, -5);
        assert_eq!(generate(&input), Err(GenerateError::NegativeTimestamp(-5)));
    }

    #[test]
    fn coordinates_change_the_seed() {
        let plain = generate(&golden_input()).unwrap();
        let tapped = generate(&golden_input().with_coordinates(Coordinates::new(10.0, 20.0))).unwrap();

        assert_ne!(plain.seed.seed_string, tapped.seed.seed_string);
        assert_eq!(tapped.seed.seed_string, "1700000000000@0.0.0.0#u1~10,20");
    }

    #[test]
    fn generate_now_captures_the_clock() {
        let before = Utc::now().timestamp_millis();
        let reading = generate_now("u1", UNKNOWN_ADDRESS).unwrap();
        let after = Utc::now().timestamp_millis();

        let ts = reading.seed.input.timestamp;
        assert!(ts >= before && ts <= after);
        assert!(reading.seed.seed_string.ends_with("@0.0.0.0#u1"));
    }

    #[test]
    fn override_fixes_main_hexagram() {
        let id: HexagramId = "Q1".parse().unwrap();
        let reading = Reading::with_override(&golden_input(), id).unwrap();

        assert_eq!(reading.main_id(), id);
        assert_eq!(reading.hexagrams.changed, reading.hexagrams.main);
        assert_eq!(reading.hexagrams.mutual.id, id);
        assert_eq!(reading.seed.seed_string, "1700000000000@0.0.0.0#u1");
    }

    #[test]
    fn override_still_validates_input() {
        let id: HexagramId = "Q1".parse().unwrap();
        let input = SeedInput::new("", UNKNOWN_ADDRESS, 0);
        assert!(Reading::with_override(&input, id).is_err());
    }

    #[test]
    fn line_distribution_matches_table() {
        let samples = 20_000i64;
        let mut counts = [0usize; 4];

        for ts in 0..samples {
            let reading = generate(&SeedInput::new("dist", UNKNOWN_ADDRESS, ts)).unwrap();
            for line in reading.hexagrams.main.lines {
                let slot = match line.value() {
                    9 => 0,
                    7 => 1,
                    8 => 2,
                    _ => 3,
                };
                counts[slot] += 1;
            }
        }

        let total = (samples * 6) as f64;
        let expected = [0.125, 0.375, 0.375, 0.125];
        for (count, p) in counts.iter().zip(expected) {
            let freq = *count as f64 / total;
            assert!((freq - p).abs() < 0.01, "frequency {} too far from {}", freq, p);
        }
    }

    #[test]
    fn single_character_changes_scatter_main_ids() {
        let mut differing = 0;
        let pairs = 500;

        for i in 0..pairs {
            let a = generate(&SeedInput::new(format!("user{}a", i), UNKNOWN_ADDRESS, 1_700_000_000_000)).unwrap();
            let b = generate(&SeedInput::new(format!("user{}b", i), UNKNOWN_ADDRESS, 1_700_000_000_000)).unwrap();
            if a.main_id() != b.main_id() {
                differing += 1;
            }
        }

        // Independent draws collide on the main id a few percent of the time
        assert!(differing > pairs * 85 / 100, "only {} of {} differ", differing, pairs);
    }

    #[test]
    fn readings_cover_many_ids() {
        let seen: HashSet<HexagramId> = (0..2_000)
            .map(|ts| generate(&SeedInput::new("cover", UNKNOWN_ADDRESS, ts)).unwrap().main_id())
            .collect();
        assert!(seen.len() > 50);
    }

    proptest! {
        #[test]
        fn generation_is_deterministic(
            requester in "[a-zA-Z0-9_-]{1,24}",
            address in "[0-9.]{1,15}",
            ts in 0i64..4_102_444_800_000,
        ) {
            let input = SeedInput::new(requester, address, ts);
            prop_assert_eq!(generate(&input).unwrap(), generate(&input).unwrap());
        }

        #[test]
        fn derived_hexagrams_hold_invariants(
            requester in "[a-z0-9]{1,12}",
            ts in 0i64..4_102_444_800_000,
        ) {
            let reading = generate(&SeedInput::new(requester, UNKNOWN_ADDRESS, ts)).unwrap();
            let main = &reading.hexagrams.main;
            let changed = &reading.hexagrams.changed;
            let mutual = &reading.hexagrams.mutual;

            for hex in [main, changed, mutual] {
                prop_assert!((1..=64).contains(&hex.id.number()));
                prop_assert_eq!(hex.id, HexagramId::from_lines(&hex.lines));
            }

            for i in 0..6 {
                match main.lines[i] {
                    Line::OldYang => prop_assert_eq!(changed.lines[i], Line::YoungYin),
                    Line::OldYin => prop_assert_eq!(changed.lines[i], Line::YoungYang),
                    young => prop_assert_eq!(changed.lines[i], young),
                }
            }

            prop_assert_eq!(&mutual.lines[0..3], &main.lines[1..4]);
            prop_assert_eq!(&mutual.lines[3..6], &main.lines[2..5]);
        }
    }
}

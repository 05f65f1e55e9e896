//! Golden vectors for reading generation
//!
//! Readings must match other implementations of the same algorithm bit for
//! bit. Each vector pins the seed string, the hashed seed, the drawn lines
//! and all three identifiers.

use hexcast::domain::{generate, hash_seed, SeedInput};

struct Vector {
    timestamp: i64,
    address: &'static str,
    requester: &'static str,
    seed: &'static str,
    hash: u32,
    lines: [u8; 6],
    main: &'static str,
    changed: &'static str,
    mutual: &'static str,
}

const VECTORS: &[Vector] = &[
    Vector {
        timestamp: 1_700_000_000_000,
        address: "0.0.0.0",
        requester: "u1",
        seed: "1700000000000@0.0.0.0#u1",
        hash: 0xdedb_defa,
        lines: [9, 9, 6, 8, 7, 8],
        main: "Q20",
        changed: "Q21",
        mutual: "Q34",
    },
    Vector {
        timestamp: 1_700_000_000_001,
        address: "0.0.0.0",
        requester: "u1",
        seed: "1700000000001@0.0.0.0#u1",
        hash: 0x9475_41aa,
        lines: [8, 6, 6, 8, 6, 7],
        main: "Q33",
        changed: "Q55",
        mutual: "Q1",
    },
    Vector {
        timestamp: 1_700_000_000_000,
        address: "127.0.0.1",
        requester: "u2",
        seed: "1700000000000@127.0.0.1#u2",
        hash: 0xbb53_e9b7,
        lines: [9, 8, 8, 8, 8, 6],
        main: "Q2",
        changed: "Q33",
        mutual: "Q1",
    },
    Vector {
        timestamp: 0,
        address: "0.0.0.0",
        requester: "a",
        seed: "0@0.0.0.0#a",
        hash: 0x8f9c_5fa4,
        lines: [8, 7, 7, 8, 7, 9],
        main: "Q55",
        changed: "Q23",
        mutual: "Q44",
    },
    Vector {
        timestamp: 1_735_689_600_000,
        address: "192.168.1.20",
        requester: "550e8400-e29b-41d4-a716-446655440000",
        seed: "1735689600000@192.168.1.20#550e8400-e29b-41d4-a716-446655440000",
        hash: 0x9d56_6906,
        lines: [7, 8, 7, 7, 8, 8],
        main: "Q14",
        changed: "Q14",
        mutual: "Q31",
    },
    Vector {
        timestamp: 1_700_000_000_000,
        address: "0.0.0.0",
        requester: "流浪者",
        seed: "1700000000000@0.0.0.0#流浪者",
        hash: 0xa61c_16f3,
        lines: [8, 7, 7, 7, 9, 7],
        main: "Q63",
        changed: "Q47",
        mutual: "Q64",
    },
];

#[test]
fn seed_strings_match() {
    for v in VECTORS {
        let input = SeedInput::new(v.requester, v.address, v.timestamp);
        assert_eq!(input.seed_string(), v.seed);
    }
}

#[test]
fn hashed_seeds_match() {
    for v in VECTORS {
        assert_eq!(hash_seed(v.seed), v.hash, "hash mismatch for {}", v.seed);
    }
}

#[test]
fn readings_match() {
    for v in VECTORS {
        let reading = generate(&SeedInput::new(v.requester, v.address, v.timestamp)).unwrap();
        let hex = &reading.hexagrams;

        assert_eq!(reading.seed.seed_string, v.seed);
        assert_eq!(hex.main.values(), v.lines, "lines mismatch for {}", v.seed);
        assert_eq!(hex.main.id.to_string(), v.main, "main mismatch for {}", v.seed);
        assert_eq!(hex.changed.id.to_string(), v.changed, "changed mismatch for {}", v.seed);
        assert_eq!(hex.mutual.id.to_string(), v.mutual, "mutual mismatch for {}", v.seed);
    }
}

#[test]
fn golden_reading_json_shape() {
    let reading = generate(&SeedInput::new("u1", "0.0.0.0", 1_700_000_000_000)).unwrap();
    let json = serde_json::to_value(&reading).unwrap();

    let expected = serde_json::json!({
        "code": 200,
        "seed": {
            "timestamp": 1_700_000_000_000i64,
            "uid": "u1",
            "ip": "0.0.0.0",
            "seedStr": "1700000000000@0.0.0.0#u1"
        },
        "hexagrams": {
            "main": {"id": "Q20", "yaos": [9, 9, 6, 8, 7, 8]},
            "changed": {"id": "Q21", "yaos": [8, 8, 7, 8, 7, 8]},
            "mutual": {"id": "Q34", "yaos": [9, 6, 8, 6, 8, 7]}
        }
    });

    assert_eq!(json, expected);
}

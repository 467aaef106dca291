use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::SeedableRng;

use crate::record::Record;

const FIRST_NAMES: &[&str] = &[
    "Aaliyah", "Adrian", "Alice", "Andres", "Bea", "Benedict", "Carmen", "Chen", "Dalia",
    "Diego", "Elena", "Emeka", "Farah", "Felix", "Grace", "Hiro", "Ines", "Ivan", "Jasmine",
    "Joaquin", "Kai", "Leila", "Luca", "Maya", "Mateo", "Nadia", "Noah", "Olga", "Omar",
    "Priya", "Quinn", "Rafael", "Rosa", "Sofia", "Tariq", "Uma", "Victor", "Wen", "Yara",
    "Zane",
];

const LAST_NAMES: &[&str] = &[
    "Abara", "Bautista", "Castillo", "Dimaculangan", "Eriksen", "Fernandez", "Garcia",
    "Hoffmann", "Ibarra", "Jensen", "Kowalski", "Lopez", "Mendoza", "Nakamura", "Okafor",
    "Petrov", "Quispe", "Reyes", "Santos", "Tanaka", "Umar", "Villanueva", "Walsh", "Xu",
    "Yilmaz", "Zamora",
];

/// Builds `count` records with ids `1..=count` in shuffled order and names
/// drawn from fixed pools, so name keys contain many duplicates.
pub fn generate_records(count: usize, seed: u64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut ids: Vec<i64> = (1..=count as i64).collect();
    ids.shuffle(&mut rng);

    ids.into_iter()
        .map(|id| {
            let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Anon");
            let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("");
            Record::new(id, first, last)
        })
        .collect()
}

use crate::store::RecordStore;

/// Row count every fresh session starts with.
pub const SEED_RECORD_COUNT: usize = 5;

const VOWELS: &[u8] = b"aeiou";
const CONSONANTS: &[u8] = b"bcdfghjklmnpqrstvwyz";
const SYLLABLES: usize = 6;

/// Deterministic pronounceable-word generator for seed names. Words alternate
/// a vowel and a consonant per syllable; firsts are prefixed `F` and lasts
/// `L` so seed rows are recognizable in the rendered list.
pub struct NameSeeder {
    state: u64,
}

impl NameSeeder {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_pair(&mut self) -> (String, String) {
        let first = format!("F{}", self.next_word());
        let last = format!("L{}", self.next_word());
        (first, last)
    }

    fn next_word(&mut self) -> String {
        let mut word = String::with_capacity(SYLLABLES * 2);
        for _ in 0..SYLLABLES {
            word.push(VOWELS[self.next_index(VOWELS.len())] as char);
            word.push(CONSONANTS[self.next_index(CONSONANTS.len())] as char);
        }
        word
    }

    fn next_index(&mut self, len: usize) -> usize {
        // 64-bit LCG, top bits only.
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.state >> 33) as usize) % len
    }
}

/// A store pre-populated with [`SEED_RECORD_COUNT`] generated records,
/// ids 1..=SEED_RECORD_COUNT. Seeding goes through `add`, so seed rows obey
/// the same invariants as user-entered ones.
pub fn seeded_store() -> RecordStore {
    let mut store = RecordStore::new();
    let mut seeder = NameSeeder::new(0x5eed);
    while store.len() < SEED_RECORD_COUNT {
        let (first, last) = seeder.next_pair();
        // distinct draws can only collide by generating the same word twice;
        // the loop just draws again if that ever happens
        let _ = store.add(&first, &last);
    }
    store
}

use rand::seq::SliceRandom;
use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::trace::TraceOp;

/// A fuzzer for generating random test data.
///
/// Uses the xoshiro256** PRNG for reproducible random sequences when seeded.
/// Print [`Fuzzer::seed`] on failure to replay a run.
///
/// # Examples
///
/// ```
/// use treemap_util::Fuzzer;
///
/// let fuzzer = Fuzzer::new(None);
///
/// let n = fuzzer.random_int(1, 10);
/// assert!(n >= 1 && n <= 10);
///
/// let choices = vec!["a", "b", "c"];
/// let picked = fuzzer.pick(&choices);
/// assert!(choices.contains(&picked));
/// ```
pub struct Fuzzer {
    /// The seed used to initialize the PRNG.
    pub seed: [u8; 32],
    rng: Mutex<Xoshiro256StarStar>,
}

impl Fuzzer {
    /// Create a new fuzzer with an optional seed.
    ///
    /// If no seed is provided, a random seed will be generated using `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });

        Self {
            seed,
            rng: Mutex::new(Xoshiro256StarStar::from_seed(seed)),
        }
    }

    /// Seed built from a single number, handy for naming runs in tests.
    pub fn seeded(n: u64) -> Self {
        let mut seed = [0u8; 32];
        seed[..8].copy_from_slice(&n.to_le_bytes());
        Self::new(Some(seed))
    }

    fn rng(&self) -> MutexGuard<'_, Xoshiro256StarStar> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generate a random integer in the range [min, max] (inclusive).
    pub fn random_int(&self, min: i64, max: i64) -> i64 {
        self.rng().gen_range(min..=max)
    }

    /// Pick a random element from a slice.
    pub fn pick<'a, T>(&self, elements: &'a [T]) -> &'a T {
        let idx = self.rng().gen_range(0..elements.len());
        &elements[idx]
    }

    /// Generate a random boolean with the given probability of being true.
    pub fn random_bool(&self, probability: f64) -> bool {
        self.rng().gen_bool(probability)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&self, items: &mut [T]) {
        items.shuffle(&mut *self.rng());
    }

    /// Random operation trace over keys in `[0, key_max]`.
    ///
    /// Half the operations insert, so traces grow a populated tree while
    /// still exercising removal and polling on every shape.
    pub fn trace(&self, len: usize, key_max: i64) -> Vec<TraceOp> {
        const KINDS: [OpKind; 10] = [
            OpKind::Put,
            OpKind::Put,
            OpKind::Put,
            OpKind::Put,
            OpKind::Put,
            OpKind::Remove,
            OpKind::Remove,
            OpKind::Poll,
            OpKind::Poll,
            OpKind::Get,
        ];
        (0..len)
            .map(|_| {
                let key = self.random_int(0, key_max);
                match self.pick(&KINDS) {
                    OpKind::Put => TraceOp::Put(key, self.random_int(0, i64::from(u16::MAX))),
                    OpKind::Remove => TraceOp::Remove(key),
                    OpKind::Poll if self.random_bool(0.5) => TraceOp::PollFirst,
                    OpKind::Poll => TraceOp::PollLast,
                    OpKind::Get => TraceOp::Get(key),
                }
            })
            .collect()
    }
}

#[derive(Clone, Copy)]
enum OpKind {
    Put,
    Remove,
    Poll,
    Get,
}

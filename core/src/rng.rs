//! Random source for the draw engine
//!
//! The engine only ever talks to the `DrawRng` trait, so tests can script the
//! exact sequence of picks. `XorShiftRng` is the default implementation; the
//! public `draw` entry point seeds one from OS entropy.

use alloc::string::String;

/// Url-safe alphabet used for drawing and card identifiers
const ID_ALPHABET: &[u8; 64] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Trait for random number generation during a draw
pub trait DrawRng {
    /// Generate a random u32
    fn next_u32(&mut self) -> u32;

    /// Generate a random number in range [0, max)
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }

    /// Shuffle a slice front to back: each position swaps with a uniformly
    /// chosen position at or after it.
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        for i in 0..len {
            let j = i + self.gen_range(len - i);
            slice.swap(i, j);
        }
    }

    /// Generate a random identifier of `len` symbols
    fn gen_id(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| ID_ALPHABET[self.gen_range(ID_ALPHABET.len())] as char)
            .collect()
    }
}

/// XorShift32 RNG - simple, fast, deterministic for a given seed
///
/// Not suitable for anything that needs cryptographic strength.
#[derive(Debug, Clone)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Create a new RNG from a u64 seed
    ///
    /// The seed is folded into a u32, ensuring state is never 0.
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }

    /// Create a new RNG seeded from the operating system
    ///
    /// Falls back to the system clock when the OS source is unavailable.
    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => Self::seed_from_u64(u64::from_le_bytes(buf)),
            Err(err) => {
                log::warn!("OS entropy unavailable ({}), seeding from clock", err);
                let nanos = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(0x9E37_79B9_7F4A_7C15);
                Self::seed_from_u64(nanos)
            }
        }
    }
}

impl DrawRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

//! Deterministic padding bytes for fixture archives
//!
//! Padding is made of counting runs whose lengths are consecutive primes, so
//! the stream has no short repeating cycle and fixture payloads don't
//! accidentally match data written by earlier tests.

use std::io::Cursor;

/// Run lengths, cycled in order.
pub const FILLER_PRIMES: [usize; 20] = [
    4759, 4783, 4787, 4789, 4793, 4799, 4801, 4813, 4817, 4831, 4861, 4871, 4877, 4889, 4903, 4909,
    4919, 4931, 4933, 4937,
];

/// Infinite iterator over filler bytes.
///
/// For each prime `p` it yields `x % 255` for `x` in `0..p`, then moves on to
/// the next prime, wrapping back to the first after the last.
#[derive(Debug, Clone, Default)]
pub struct Filler {
    prime_index: usize,
    position: usize,
}

impl Filler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for Filler {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.position >= FILLER_PRIMES[self.prime_index] {
            self.position = 0;
            self.prime_index = (self.prime_index + 1) % FILLER_PRIMES.len();
        }
        let byte = (self.position % 255) as u8;
        self.position += 1;
        Some(byte)
    }
}

/// Returns exactly `size` filler bytes.
pub fn fill(size: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(size);
    bytes.extend(Filler::new().take(size));
    bytes
}

/// Returns `size` filler bytes behind a reader.
pub fn filler_reader(size: usize) -> Cursor<Vec<u8>> {
    Cursor::new(fill(size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_exact_lengths() {
        for size in [0, 1, 20_000, 1_000_000] {
            assert_eq!(fill(size).len(), size);
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(fill(20_000), fill(20_000));
    }

    #[test]
    fn test_first_run_counts_modulo_255() {
        let bytes = fill(600);
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[254], 254);
        assert_eq!(bytes[255], 0);
        assert_eq!(bytes[599], (599 % 255) as u8);
    }

    #[test]
    fn test_restarts_at_prime_boundary() {
        let first = FILLER_PRIMES[0];
        let bytes = fill(first + 3);
        assert_eq!(bytes[first - 1], ((first - 1) % 255) as u8);
        assert_eq!(&bytes[first..], &[0, 1, 2]);
    }

    #[test]
    fn test_wraps_after_last_prime() {
        let cycle: usize = FILLER_PRIMES.iter().sum();
        let bytes: Vec<u8> = Filler::new().skip(cycle).take(4).collect();
        assert_eq!(bytes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_reader_yields_fill() {
        let mut reader = filler_reader(1000);
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).unwrap();
        assert_eq!(buffer, fill(1000));
    }
}

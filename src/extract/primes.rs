//! Growable prime cache for prime-indexed traversal filtering
//!
//! Owned by one extractor instance for its lifetime. Append-only: the cache
//! classifies every integer up to a moving frontier and never evicts, so
//! repeated queries and successive extractions only ever pay for the
//! incremental extension past what is already known.

/// Monotonically growing set of primes.
#[derive(Debug, Default)]
pub struct PrimeCache {
    /// All primes up to `frontier`, ascending.
    primes: Vec<u64>,
    /// Highest integer classified so far.
    frontier: u64,
}

impl PrimeCache {
    pub fn new() -> Self {
        Self {
            primes: Vec::new(),
            frontier: 1,
        }
    }

    /// Ensure at least `count` primes no greater than `bound` are cached,
    /// computing only the extension beyond the current frontier.
    pub fn pregenerate(&mut self, bound: u64, count: u64) {
        while (self.primes.len() as u64) < count && self.frontier < bound {
            self.extend_one();
        }
    }

    /// Whether `n` is prime, transparently extending the cache when `n`
    /// lies past the frontier.
    pub fn is_prime(&mut self, n: u64) -> bool {
        while self.frontier < n {
            self.extend_one();
        }
        self.primes.binary_search(&n).is_ok()
    }

    /// Number of primes cached so far.
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// Classify the next integer past the frontier.
    fn extend_one(&mut self) {
        let n = self.frontier + 1;
        // trial division is complete here: primes holds everything <= the
        // frontier, hence every prime <= sqrt(n)
        let mut prime = n >= 2;
        for &p in &self.primes {
            if p * p > n {
                break;
            }
            if n % p == 0 {
                prime = false;
                break;
            }
        }
        if prime {
            self.primes.push(n);
        }
        self.frontier = n;
    }
}

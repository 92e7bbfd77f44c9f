//! Session statistics: press/roll tallies and reaction times.
//!
//! Everything here lives for one run and is printed at exit.

use core::fmt;
use core::time::Duration;

/// Counter over a fixed, ordered set of keys.
///
/// Key order matters: it is the print order and it breaks ties in
/// [`most_common`](Self::most_common) / [`least_common`](Self::least_common).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K> {
    entries: Vec<(K, u32)>,
}

impl<K: Copy + PartialEq> Tally<K> {
    pub fn new(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            entries: keys.into_iter().map(|k| (k, 0)).collect(),
        }
    }

    /// Count one occurrence of `key`. Returns the new count, or `None` for a
    /// key outside the tally (nothing is counted).
    pub fn record(&mut self, key: K) -> Option<u32> {
        let (_, n) = self.entries.iter_mut().find(|(k, _)| *k == key)?;
        *n = n.saturating_add(1);
        Some(*n)
    }

    pub fn count(&self, key: K) -> u32 {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(0, |&(_, n)| n)
    }

    pub fn total(&self) -> u32 {
        self.entries.iter().map(|&(_, n)| n).sum()
    }

    /// Share of `key` in percent; 0 when nothing has been counted.
    pub fn percentage(&self, key: K) -> f32 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(key) as f32 * 100.0 / total as f32
    }

    /// Highest count, first key wins ties. `None` while empty.
    pub fn most_common(&self) -> Option<(K, u32)> {
        self.pick(|candidate, best| candidate > best)
    }

    /// Lowest count, first key wins ties. `None` while empty.
    pub fn least_common(&self) -> Option<(K, u32)> {
        self.pick(|candidate, best| candidate < best)
    }

    fn pick(&self, better: impl Fn(u32, u32) -> bool) -> Option<(K, u32)> {
        if self.total() == 0 {
            return None;
        }
        let mut iter = self.entries.iter().copied();
        let first = iter.next()?;
        Some(iter.fold(first, |best, e| if better(e.1, best.1) { e } else { best }))
    }

    /// `(key, count)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        self.entries.iter().copied()
    }
}

/// One `█` per count.
pub fn bar(count: u32) -> String {
    "\u{2588}".repeat(count as usize)
}

// ── Reaction times ────────────────────────────────────────────

/// Star rating for an average reaction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Elite,
    Excellent,
    Good,
    Average,
    Beginner,
}

impl Rating {
    pub fn from_average(avg: Duration) -> Self {
        match avg.as_secs_f64() {
            s if s < 0.25 => Self::Elite,
            s if s < 0.35 => Self::Excellent,
            s if s < 0.5 => Self::Good,
            s if s < 0.7 => Self::Average,
            _ => Self::Beginner,
        }
    }

    /// Text scrolled on the matrix.
    pub fn label(self) -> &'static str {
        match self {
            Self::Elite => "ELITE",
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Average => "AVERAGE",
            Self::Beginner => "BEGINNER",
        }
    }

    pub fn stars(self) -> usize {
        match self {
            Self::Elite => 5,
            Self::Excellent => 4,
            Self::Good => 3,
            Self::Average => 2,
            Self::Beginner => 1,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Successful reaction times of one game, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReactionStats {
    times: Vec<Duration>,
}

impl ReactionStats {
    pub fn record(&mut self, t: Duration) {
        self.times.push(t);
    }

    pub fn times(&self) -> &[Duration] {
        &self.times
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn best(&self) -> Option<Duration> {
        self.times.iter().min().copied()
    }

    pub fn worst(&self) -> Option<Duration> {
        self.times.iter().max().copied()
    }

    pub fn average(&self) -> Option<Duration> {
        let n = u32::try_from(self.times.len()).ok().filter(|&n| n > 0)?;
        Some(self.times.iter().sum::<Duration>() / n)
    }

    pub fn rating(&self) -> Option<Rating> {
        self.average().map(Rating::from_average)
    }
}

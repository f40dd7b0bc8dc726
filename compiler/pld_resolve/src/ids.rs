//! Overload-aware context ids.

use rustc_hash::FxHashMap;

/// Hands out `NAME-n` ids within one container, `n` counting from 1 per
/// base name in declaration order.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    counts: FxHashMap<String, usize>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, base: &str) -> String {
        let count = self.counts.entry(base.to_owned()).or_insert(0);
        *count += 1;
        format!("{base}-{count}")
    }

    /// How many ids `base` has received.
    pub fn count(&self, base: &str) -> usize {
        self.counts.get(base).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_per_base_name() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next("F"), "F-1");
        assert_eq!(ids.next("G"), "G-1");
        assert_eq!(ids.next("F"), "F-2");
        assert_eq!(ids.count("F"), 2);
        assert_eq!(ids.count("H"), 0);
    }
}

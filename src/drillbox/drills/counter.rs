/// A counter that owns its count. Two counters never share state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Counter {
    count: u64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumps the count and returns the new value.
    pub fn increment(&mut self) -> u64 {
        self.count += 1;
        self.count
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_from_one() {
        let mut c = Counter::new();
        assert_eq!(c.increment(), 1);
        assert_eq!(c.increment(), 2);
        assert_eq!(c.count(), 2);
    }

    #[test]
    fn instances_are_independent() {
        let mut a = Counter::new();
        let mut b = Counter::new();
        a.increment();
        a.increment();
        assert_eq!(b.increment(), 1);
        assert_eq!(a.count(), 2);
    }
}

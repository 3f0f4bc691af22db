use rand::Rng;
use shared::{
    domain::{MagnitudeRange, Magnitude},
    protocol::StepEvent,
};

/// Working sequence plus the snapshot taken when it was generated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceModel {
    values: Vec<Magnitude>,
    snapshot: Option<Vec<Magnitude>>,
}

impl SequenceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts `values` as if they had just been generated.
    pub fn from_values(values: Vec<Magnitude>) -> Self {
        let mut model = Self::new();
        model.load(values);
        model
    }

    pub fn load(&mut self, values: Vec<Magnitude>) {
        self.snapshot = Some(values.clone());
        self.values = values;
    }

    pub fn generate(&mut self, size: usize, range: MagnitudeRange) {
        self.generate_with(&mut rand::thread_rng(), size, range);
    }

    pub fn generate_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        size: usize,
        range: MagnitudeRange,
    ) {
        let values = (0..size.max(1))
            .map(|_| rng.gen_range(range.min..=range.max))
            .collect();
        self.load(values);
    }

    /// Restores the last snapshot. Returns `false` when nothing was ever generated.
    pub fn reset(&mut self) -> bool {
        match &self.snapshot {
            Some(snapshot) => {
                self.values.clone_from(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn values(&self) -> &[Magnitude] {
        &self.values
    }

    pub fn snapshot(&self) -> Option<&[Magnitude]> {
        self.snapshot.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Magnitude {
        self.check_index(index);
        self.values[index]
    }

    pub fn max_value(&self) -> Magnitude {
        self.values.iter().copied().max().unwrap_or_default()
    }

    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|pair| pair[0] <= pair[1])
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.check_index(i);
        self.check_index(j);
        self.values.swap(i, j);
    }

    pub fn overwrite(&mut self, index: usize, value: Magnitude) {
        self.check_index(index);
        self.values[index] = value;
    }

    /// Commits the mutation an event describes. Compare and settle events
    /// leave the sequence untouched.
    pub fn apply(&mut self, event: StepEvent) {
        match event {
            StepEvent::Swap { i, j } => self.swap(i, j),
            StepEvent::Overwrite { index, value } => self.overwrite(index, value),
            StepEvent::Compare { .. } | StepEvent::Settle { .. } => {}
        }
    }

    fn check_index(&self, index: usize) {
        assert!(
            index < self.values.len(),
            "sequence index {index} out of range for length {}",
            self.values.len()
        );
    }
}

#[cfg(test)]
#[path = "tests/sequence_tests.rs"]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Magnitude stored at one position of the sorted sequence.
pub type Magnitude = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl Algorithm {
    /// Catalogue order; keyboard shortcuts `1`..`6` index into this.
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
    ];

    /// Resolves a selection name. Anything unrecognized selects bubble.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "selection" => Algorithm::Selection,
            "insertion" => Algorithm::Insertion,
            "merge" => Algorithm::Merge,
            "quick" => Algorithm::Quick,
            "heap" => Algorithm::Heap,
            _ => Algorithm::Bubble,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Heap => "heap",
        }
    }

    pub fn info(self) -> AlgorithmInfo {
        match self {
            Algorithm::Bubble => AlgorithmInfo {
                title: "Bubble Sort",
                description: "Repeatedly steps through the list, compares adjacent elements and swaps them if they are in the wrong order.",
                complexity: "O(n²)",
                characteristics: &[
                    "Simple to understand and implement",
                    "Stable sorting algorithm",
                    "In-place sorting",
                    "Good for small datasets or nearly sorted data",
                ],
            },
            Algorithm::Selection => AlgorithmInfo {
                title: "Selection Sort",
                description: "Divides the input into a sorted prefix and an unsorted suffix, moving the smallest remaining element to the end of the prefix on each pass.",
                complexity: "O(n²)",
                characteristics: &[
                    "Simple to implement",
                    "In-place sorting",
                    "Not stable",
                    "Minimal memory usage",
                ],
            },
            Algorithm::Insertion => AlgorithmInfo {
                title: "Insertion Sort",
                description: "Builds the sorted result one item at a time by shifting each new element left into the sorted portion.",
                complexity: "O(n²)",
                characteristics: &[
                    "Simple implementation",
                    "Stable sorting algorithm",
                    "In-place sorting",
                    "Efficient for small data sets",
                ],
            },
            Algorithm::Merge => AlgorithmInfo {
                title: "Merge Sort",
                description: "Divide-and-conquer: split at the midpoint, sort both halves, then merge them back together.",
                complexity: "O(n log n)",
                characteristics: &[
                    "Stable sorting algorithm",
                    "Predictable performance",
                    "Not in-place (requires extra memory)",
                    "Excellent for large datasets",
                ],
            },
            Algorithm::Quick => AlgorithmInfo {
                title: "Quick Sort",
                description: "Partitions the range around the last element as pivot and recursively sorts both sides.",
                complexity: "O(n log n) average, O(n²) worst case",
                characteristics: &[
                    "Very efficient on average",
                    "In-place sorting",
                    "Not stable",
                    "Good cache performance",
                ],
            },
            Algorithm::Heap => AlgorithmInfo {
                title: "Heap Sort",
                description: "Builds a binary max-heap, then repeatedly moves the root behind the shrinking heap.",
                complexity: "O(n log n)",
                characteristics: &[
                    "In-place sorting",
                    "Not stable",
                    "Consistent performance",
                    "Good for large datasets",
                ],
            },
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub complexity: &'static str,
    pub characteristics: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    Comparing,
    Swapping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ConfigError::UnknownTheme(other.to_string())),
        }
    }
}

/// Inclusive magnitude bounds for generated sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagnitudeRange {
    pub min: Magnitude,
    pub max: Magnitude,
}

impl MagnitudeRange {
    pub fn new(min: Magnitude, max: Magnitude) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::EmptyMagnitudeRange { min, max });
        }
        Ok(Self { min, max })
    }
}

impl Default for MagnitudeRange {
    fn default() -> Self {
        Self { min: 10, max: 309 }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;

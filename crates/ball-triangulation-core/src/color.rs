use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Inclusive HSV threshold range used by an external color detector.
///
/// Channels are `[hue, saturation, value]`. The solver never looks inside;
/// the range travels with a [`crate::BallRecord`] so reports can say which
/// threshold produced a detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct HsvRange {
    pub min: [u8; 3],
    pub max: [u8; 3],
}

impl HsvRange {
    pub const fn new(min: [u8; 3], max: [u8; 3]) -> Self {
        Self { min, max }
    }

    /// Whether `hsv` lies inside the range on every channel.
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        hsv.iter()
            .zip(self.min.iter().zip(self.max.iter()))
            .all(|(&v, (&lo, &hi))| lo <= v && v <= hi)
    }
}

/// Named color ranges, `{label: range}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorRanges {
    ranges: BTreeMap<String, HsvRange>,
}

impl ColorRanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, range: HsvRange) -> Option<HsvRange> {
        self.ranges.insert(label.into(), range)
    }

    pub fn get(&self, label: &str) -> Option<&HsvRange> {
        self.ranges.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.ranges.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, HsvRange)> for ColorRanges {
    fn from_iter<I: IntoIterator<Item = (S, HsvRange)>>(iter: I) -> Self {
        Self {
            ranges: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

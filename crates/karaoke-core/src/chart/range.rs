use serde::{Deserialize, Serialize};

/// Half-open beat window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeatRange {
    pub start: i32,
    pub end: i32,
}

impl BeatRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, beat: i32) -> bool {
        self.start <= beat && beat < self.end
    }

    /// Whether `[start, end)` lies completely inside this range
    pub fn covers(&self, start: i32, end: i32) -> bool {
        self.start <= start && end <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn len(&self) -> i32 {
        (self.end - self.start).max(0)
    }
}

impl std::fmt::Display for BeatRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

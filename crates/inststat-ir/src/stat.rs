//! Counters, source locations and line ranges.

use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

use inststat_isa::{Category, Classification};
use thiserror::Error;

/// Instruction counts and cycles attributed to one source line (or block).
///
/// `cycles` is zero exactly when nothing has been attributed yet. The
/// matcher relies on this to mark a stat as consumed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LineStat {
    pub branch: u64,
    pub load: u64,
    pub store: u64,
    pub arithmetic: u64,
    pub floating_point: u64,
    pub other: u64,
    pub cycles: u64,
}

impl LineStat {
    pub const fn new(counts: [u64; 6], cycles: u64) -> Self {
        let [branch, load, store, arithmetic, floating_point, other] = counts;
        Self {
            branch,
            load,
            store,
            arithmetic,
            floating_point,
            other,
            cycles,
        }
    }

    /// Counter for a category (`None` for `Ignore`).
    pub const fn counter_mut(&mut self, category: Category) -> Option<&mut u64> {
        match category {
            Category::Branch => Some(&mut self.branch),
            Category::Load => Some(&mut self.load),
            Category::Store => Some(&mut self.store),
            Category::Arithmetic => Some(&mut self.arithmetic),
            Category::FloatingPoint => Some(&mut self.floating_point),
            Category::Other => Some(&mut self.other),
            Category::Ignore => None,
        }
    }

    /// Count one classified instruction. Returns false if it was not counted.
    pub fn record(&mut self, class: Classification) -> bool {
        let Some(counter) = self.counter_mut(class.category) else {
            return false;
        };
        *counter += 1;
        self.cycles += u64::from(class.cycles);
        true
    }

    /// Counters in serialization order, followed by cycles.
    #[must_use]
    pub const fn fields(&self) -> [u64; 7] {
        [
            self.branch,
            self.load,
            self.store,
            self.arithmetic,
            self.floating_point,
            self.other,
            self.cycles,
        ]
    }

    #[must_use]
    pub const fn instructions(&self) -> u64 {
        self.branch + self.load + self.store + self.arithmetic + self.floating_point + self.other
    }

    /// True if nothing has been attributed (or it was already consumed).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cycles == 0
    }

    /// Hand out this stat once: returns a copy and zeroes `cycles`.
    ///
    /// Returns `None` if the stat is empty or was consumed before.
    pub const fn take(&mut self) -> Option<Self> {
        if self.cycles == 0 {
            return None;
        }
        let taken = *self;
        self.cycles = 0;
        Some(taken)
    }
}

impl AddAssign for LineStat {
    fn add_assign(&mut self, rhs: Self) {
        self.branch += rhs.branch;
        self.load += rhs.load;
        self.store += rhs.store;
        self.arithmetic += rhs.arithmetic;
        self.floating_point += rhs.floating_point;
        self.other += rhs.other;
        self.cycles += rhs.cycles;
    }
}

impl fmt::Display for LineStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [b, l, s, a, fp, o, c] = self.fields();
        write!(f, "{b}, {l}, {s}, {a}, {fp}, {o}, {c}")
    }
}

/// Error parsing the 7-field counter list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected 7 comma-separated counters, got `{0}`")]
pub struct ParseStatError(pub String);

impl FromStr for LineStat {
    type Err = ParseStatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = [0u64; 7];
        let mut parts = s.split(',');
        for field in &mut fields {
            *field = parts
                .next()
                .and_then(|p| p.trim().parse().ok())
                .ok_or_else(|| ParseStatError(s.to_string()))?;
        }
        if parts.next().is_some() {
            return Err(ParseStatError(s.to_string()));
        }

        let [b, l, st, a, fp, o, c] = fields;
        Ok(Self::new([b, l, st, a, fp, o], c))
    }
}

/// A `file:line` source location.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceLoc {
    pub file: String,
    pub line: u32,
}

impl SourceLoc {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Parse `file:line`, splitting at the last colon so paths may contain colons.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (file, line) = text.rsplit_once(':')?;
        let line = line.trim().parse().ok()?;
        Some(Self::new(file, line))
    }

    /// Line 0 means "no valid line".
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Closed source-line interval `[begin, end]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineRange {
    pub begin: u32,
    pub end: u32,
}

/// How an inner interval relates to an outer one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeRelation {
    /// Same interval.
    Equal,
    /// Outer strictly contains inner.
    Contains,
    /// Inner exceeds or crosses outer.
    Other,
}

impl LineRange {
    /// Build an interval; the bounds are ordered.
    #[must_use]
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            begin: a.min(b),
            end: a.max(b),
        }
    }

    #[must_use]
    pub const fn point(line: u32) -> Self {
        Self {
            begin: line,
            end: line,
        }
    }

    /// Grow to include `line`.
    pub fn extend(&mut self, line: u32) {
        self.begin = self.begin.min(line);
        self.end = self.end.max(line);
    }

    #[must_use]
    pub const fn contains_line(&self, line: u32) -> bool {
        self.begin <= line && line <= self.end
    }

    /// Non-strict containment.
    #[must_use]
    pub const fn contains(&self, inner: &Self) -> bool {
        self.begin <= inner.begin && inner.end <= self.end
    }

    #[must_use]
    pub fn strictly_contains(&self, inner: &Self) -> bool {
        self != inner && self.contains(inner)
    }

    #[must_use]
    pub const fn span(&self) -> u32 {
        self.end - self.begin
    }

    #[must_use]
    pub fn relation(&self, inner: &Self) -> RangeRelation {
        if self == inner {
            RangeRelation::Equal
        } else if self.contains(inner) {
            RangeRelation::Contains
        } else {
            RangeRelation::Other
        }
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.begin, self.end)
    }
}

/// Number of occurrences shown by a preview when the caller does not configure one.
pub const DEFAULT_PREVIEW_CAP: usize = 10;

/// Hard upper bound on expansion steps for a single series.
pub const MAX_ITERATIONS: usize = 10_000;

/// A recurring series needs the anchor plus at least one repeat.
pub const MIN_OCCURRENCES: i64 = 2;

/// Largest occurrence count a pattern may request. Expansion configs must
/// allow at least `MAX_OCCURRENCES - 1` iterations so a validated count always
/// expands fully.
pub const MAX_OCCURRENCES: i64 = 10_000;

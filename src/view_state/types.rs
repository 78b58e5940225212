//! Core view-state newtypes

/// Absolute row offset from the top of the filtered list. 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct LineOffset(usize);

impl LineOffset {
    /// Create a new LineOffset from a raw value.
    pub fn new(offset: usize) -> Self {
        Self(offset)
    }

    /// Get the raw usize value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Add an amount to this offset, saturating at usize::MAX.
    pub fn saturating_add(&self, amount: usize) -> Self {
        Self(self.0.saturating_add(amount))
    }

    /// Subtract an amount from this offset, saturating at 0.
    pub fn saturating_sub(&self, amount: usize) -> Self {
        Self(self.0.saturating_sub(amount))
    }

    /// Clamp to at most `max`.
    pub fn clamp_max(&self, max: usize) -> Self {
        Self(self.0.min(max))
    }
}

/// Viewport dimensions in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportDimensions {
    /// Width in terminal columns.
    pub width: u16,
    /// Height in terminal rows.
    pub height: u16,
}

impl ViewportDimensions {
    /// Create new viewport dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

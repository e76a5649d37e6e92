//! Scalar lengths that are either absolute pixels or a fraction of a base.

use serde::{Deserialize, Serialize};

/// Which of the two stored values a [`Length`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LengthMode {
    /// Fixed number of pixels
    #[default]
    Absolute,
    /// Fraction of the base passed to [`Length::resolve`]
    Relative,
}

/// A length in pixels or relative to a parent extent.
///
/// Both the absolute and the relative value are stored. Switching the mode
/// with [`Length::make_absolute`] or [`Length::make_relative`] keeps the
/// other value, so toggling back restores what was entered before.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Length {
    mode: LengthMode,
    absolute: i32,
    relative: f32,
}

impl Length {
    /// Zero pixels.
    pub const ZERO: Self = Self::absolute(0);

    /// Create an absolute length.
    #[must_use]
    pub const fn absolute(value: i32) -> Self {
        Self {
            mode: LengthMode::Absolute,
            absolute: value,
            relative: 0.0,
        }
    }

    /// Create a relative length (`1.0` is the full base).
    #[must_use]
    pub const fn relative(value: f32) -> Self {
        Self {
            mode: LengthMode::Relative,
            absolute: 0,
            relative: value,
        }
    }

    /// Active mode.
    #[must_use]
    pub const fn mode(&self) -> LengthMode {
        self.mode
    }

    /// Check if the length resolves to its absolute value.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        matches!(self.mode, LengthMode::Absolute)
    }

    /// Check if the length resolves against a base.
    #[must_use]
    pub const fn is_relative(&self) -> bool {
        matches!(self.mode, LengthMode::Relative)
    }

    /// Stored absolute value, regardless of mode.
    #[must_use]
    pub const fn absolute_value(&self) -> i32 {
        self.absolute
    }

    /// Stored relative value, regardless of mode.
    #[must_use]
    pub const fn relative_value(&self) -> f32 {
        self.relative
    }

    /// Store an absolute value. Does not change the mode.
    pub fn set_absolute(&mut self, value: i32) {
        self.absolute = value;
    }

    /// Store a relative value. Does not change the mode.
    pub fn set_relative(&mut self, value: f32) {
        self.relative = value;
    }

    /// Resolve to the stored absolute value from now on.
    pub fn make_absolute(&mut self) {
        self.mode = LengthMode::Absolute;
    }

    /// Resolve against a base from now on.
    pub fn make_relative(&mut self) {
        self.mode = LengthMode::Relative;
    }

    /// Resolve to pixels.
    ///
    /// Absolute lengths ignore `base`. Relative lengths are
    /// `round(relative * base)`, rounding half away from zero.
    #[must_use]
    pub fn resolve(&self, base: i32) -> i32 {
        match self.mode {
            LengthMode::Absolute => self.absolute,
            LengthMode::Relative => (self.relative * base as f32).round() as i32,
        }
    }
}

impl From<i32> for Length {
    fn from(value: i32) -> Self {
        Self::absolute(value)
    }
}

impl From<f32> for Length {
    fn from(value: f32) -> Self {
        Self::relative(value)
    }
}

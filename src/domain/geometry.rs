// SPDX-License-Identifier: MPL-2.0
//! Presentation geometry types.

use serde::{Deserialize, Serialize};

/// Width and height in layout units, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns true if the size is wider than it is tall.
    #[must_use]
    pub fn is_landscape(self) -> bool {
        self.width > self.height
    }

    /// Length of the long axis.
    #[must_use]
    pub fn long_side(self) -> f32 {
        self.width.max(self.height)
    }

    /// Length of the short axis.
    #[must_use]
    pub fn short_side(self) -> f32 {
        self.width.min(self.height)
    }
}

/// Absolute rectangle used for the fullscreen layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Stacking layer, above the rest of the host's content.
    pub layer: u32,
}

/// Layout the player surface should use.
///
/// `S` is the caller's inline style, passed through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation<S> {
    /// Embedded in the host layout with the caller's style.
    Inline(S),
    /// Covering the whole device, rotation aware.
    Fullscreen(Rect),
}

impl<S> Presentation<S> {
    /// Returns true for the fullscreen layout.
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        matches!(self, Self::Fullscreen(_))
    }

    /// Returns the fullscreen rectangle, if any.
    #[must_use]
    pub fn rect(&self) -> Option<&Rect> {
        match self {
            Self::Fullscreen(rect) => Some(rect),
            Self::Inline(_) => None,
        }
    }
}

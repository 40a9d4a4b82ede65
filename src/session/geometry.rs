// SPDX-License-Identifier: MPL-2.0
//! Presentation geometry for inline and fullscreen layouts.

use crate::config::FULLSCREEN_LAYER;
use crate::domain::{Presentation, Rect, Size};

/// Screen and window sizes most recently reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub screen: Size,
    pub window: Size,
}

impl Dimensions {
    #[must_use]
    pub const fn new(screen: Size, window: Size) -> Self {
        Self { screen, window }
    }
}

/// Resolves the layout of the player surface.
///
/// Inline layout passes the caller's style through. Fullscreen covers the
/// device from the origin: orientation comes from the window size, while the
/// extents come from the screen's long and short sides, so a window size that
/// still reflects the previous rotation cannot produce a mismatched rectangle.
pub fn resolve<S>(screen: Size, window: Size, is_fullscreen: bool, inline: S) -> Presentation<S> {
    if !is_fullscreen {
        return Presentation::Inline(inline);
    }

    let (width, height) = if window.is_landscape() {
        (screen.long_side(), screen.short_side())
    } else {
        (screen.short_side(), screen.long_side())
    };

    Presentation::Fullscreen(Rect {
        x: 0.0,
        y: 0.0,
        width,
        height,
        layer: FULLSCREEN_LAYER,
    })
}

// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects shared by the session coordinator and its
//! collaborators.
//!
//! Nothing in here talks to the decoder or the host platform.
//!
//! # Modules
//!
//! - [`geometry`]: Layout types ([`Size`](geometry::Size), [`Rect`](geometry::Rect),
//!   [`Presentation`](geometry::Presentation))
//! - [`newtypes`]: Validated values ([`PlaybackSpeed`](newtypes::PlaybackSpeed),
//!   [`ScaleMode`](newtypes::ScaleMode), [`QualityOption`](newtypes::QualityOption))
//! - [`playback`]: Playback state ([`PlaybackState`](playback::PlaybackState),
//!   [`StateOrigin`](playback::StateOrigin))

pub mod geometry;
pub mod newtypes;
pub mod playback;

pub use geometry::{Presentation, Rect, Size};
pub use newtypes::{PlaybackSpeed, QualityOption, ScaleMode};
pub use playback::{PlaybackState, StateOrigin};

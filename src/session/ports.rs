// SPDX-License-Identifier: MPL-2.0
//! Outbound collaborator ports besides the decoder.
//!
//! Hosts implement these to hide system chrome and to hear about fullscreen
//! and completion. Every method has a no-op default so hosts only implement
//! what they care about.

/// System navigation and status bar visibility.
pub trait SystemChrome {
    /// Hides the system navigation affordances.
    fn hide_system_navigation(&mut self) {}

    /// Shows the system navigation affordances.
    fn show_system_navigation(&mut self) {}

    /// Toggles the status bar.
    fn set_status_bar_hidden(&mut self, _hidden: bool) {}
}

/// Notifications for the external caller.
pub trait SessionObserver {
    /// Fullscreen was entered (`true`) or exited (`false`).
    fn on_fullscreen_changed(&mut self, _is_fullscreen: bool) {}

    /// Playback reached the end of the media.
    fn on_completion(&mut self) {}
}

/// Chrome and observer that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCollaborator;

impl SystemChrome for NoopCollaborator {}

impl SessionObserver for NoopCollaborator {}

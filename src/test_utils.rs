// SPDX-License-Identifier: MPL-2.0
//! Test helpers shared by unit tests: a recording chrome/observer fake and a
//! drain for decoder command channels.

use crate::session::{DecoderCommand, SessionObserver, SystemChrome};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Collects every command currently queued on a decoder channel.
pub fn drain(rx: &mut UnboundedReceiver<DecoderCommand>) -> Vec<DecoderCommand> {
    let mut commands = Vec::new();
    while let Ok(command) = rx.try_recv() {
        commands.push(command);
    }
    commands
}

/// A system chrome call, as recorded by [`Recorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeCall {
    HideNavigation,
    ShowNavigation,
    StatusBarHidden(bool),
}

#[derive(Debug, Default)]
struct Log {
    chrome: Vec<ChromeCall>,
    fullscreen: Vec<bool>,
    completions: usize,
}

/// Records chrome calls and observer notifications.
///
/// Clones share the same log, so one clone can be handed to the coordinator
/// while the test keeps another.
#[derive(Debug, Clone, Default)]
pub struct Recorder(Rc<RefCell<Log>>);

impl Recorder {
    pub fn chrome_calls(&self) -> Vec<ChromeCall> {
        self.0.borrow().chrome.clone()
    }

    pub fn fullscreen_changes(&self) -> Vec<bool> {
        self.0.borrow().fullscreen.clone()
    }

    pub fn completions(&self) -> usize {
        self.0.borrow().completions
    }
}

impl SystemChrome for Recorder {
    fn hide_system_navigation(&mut self) {
        self.0.borrow_mut().chrome.push(ChromeCall::HideNavigation);
    }

    fn show_system_navigation(&mut self) {
        self.0.borrow_mut().chrome.push(ChromeCall::ShowNavigation);
    }

    fn set_status_bar_hidden(&mut self, hidden: bool) {
        self.0
            .borrow_mut()
            .chrome
            .push(ChromeCall::StatusBarHidden(hidden));
    }
}

impl SessionObserver for Recorder {
    fn on_fullscreen_changed(&mut self, is_fullscreen: bool) {
        self.0.borrow_mut().fullscreen.push(is_fullscreen);
    }

    fn on_completion(&mut self) {
        self.0.borrow_mut().completions += 1;
    }
}

// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Edge-triggered keyboard shortcuts.

/// Discrete keyboard actions understood by an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Confirm,
    Cancel,
}

impl ShortcutAction {
    fn slot(self) -> usize {
        match self {
            ShortcutAction::Confirm => 0,
            ShortcutAction::Cancel => 1,
        }
    }
}

/// Fires each action once per physical press.
///
/// Holding a key (auto-repeat) does nothing until the key is released.
#[derive(Debug, Clone, Default)]
pub struct ShortcutLatch {
    held: [bool; 2],
}

impl ShortcutLatch {
    /// Record a key-down. Returns true on the released-to-pressed transition only.
    pub fn press(&mut self, action: ShortcutAction) -> bool {
        let held = &mut self.held[action.slot()];
        let fired = !*held;
        *held = true;
        fired
    }

    pub fn release(&mut self, action: ShortcutAction) {
        self.held[action.slot()] = false;
    }
}

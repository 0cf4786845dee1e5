// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared interaction state for cross-pane linking.
//!
//! The highlight is transient view state keyed by offset; it never lives on
//! the blocks themselves.

use crate::model::Offset;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkState {
    rev: u64,
    hovered_offset: Option<Offset>,
    scroll_target: Option<Offset>,
}

impl LinkState {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// The offset whose blocks are currently highlighted, if any.
    pub fn hovered_offset(&self) -> Option<Offset> {
        self.hovered_offset
    }

    /// Pointer-enter/leave both land here; entering an offsetless region is
    /// the same as leaving.
    pub fn set_hovered_offset(&mut self, offset: Option<Offset>) {
        if self.hovered_offset == offset {
            return;
        }
        self.hovered_offset = offset;
        self.rev = self.rev.wrapping_add(1);
    }

    /// Requests centering every block tagged with `offset` in its pane.
    pub fn request_scroll(&mut self, offset: Offset) {
        self.scroll_target = Some(offset);
        self.rev = self.rev.wrapping_add(1);
    }

    /// Consumes the pending scroll request, if one exists.
    pub fn take_scroll_target(&mut self) -> Option<Offset> {
        self.scroll_target.take()
    }
}

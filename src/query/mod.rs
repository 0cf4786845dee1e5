// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over rendered views.
//!
//! The offset index is the only coupling between the two panes: they share no
//! object references, just the offset key.

pub mod offset_index;

pub use offset_index::{BlockRef, OffsetIndex, Pane};

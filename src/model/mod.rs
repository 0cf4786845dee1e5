// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Input data model.
//!
//! Listings are produced by an external module analyzer and are read-only here;
//! the viewer never mutates them.

mod fixtures;
pub mod listing;

pub use fixtures::demo_listing;
pub use listing::{
    DisasmListing, Function, Instruction, ModuleListing, Offset, TextChunk, TextListing,
};

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Offlens, an offset-synchronized dual-listing viewer for compiled modules.
//!
//! An upstream analyzer emits two listings of the same module: a flat disassembly
//! (functions of instructions) and a structured-text rendition. Both carry byte
//! offsets into the original module, and Offlens groups and cross-links the two
//! by that shared offset key.

pub mod color;
pub mod model;
pub mod query;
pub mod render;
pub mod store;
pub mod tui;
pub mod ui;

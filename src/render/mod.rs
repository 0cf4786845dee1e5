// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering from listings to colored, offset-tagged blocks.
//!
//! Block construction is one synchronous pass per view; both passes share one
//! [`crate::color::OffsetPalette`] so the structured-text view can tell which
//! offsets the disassembly already colored.

mod dump;
pub mod listing;
mod text;

pub use dump::dump_module;
pub use listing::{
    build_disasm_view, build_text_view, Block, DisasmView, FunctionView, TextView,
};
pub use text::{render_address, render_bytes, render_inst, BYTES_COLUMN_WIDTH};

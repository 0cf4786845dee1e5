// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::color::OffsetPalette;
use crate::model::ModuleListing;

use super::listing::{build_disasm_view, build_text_view};

/// Renders both views as plain text, for `--dump` and non-interactive tooling.
///
/// Offset-bearing blocks are annotated with their offset so the shared key
/// stays visible without colors.
pub fn dump_module(listing: &ModuleListing) -> String {
    let mut palette = OffsetPalette::new();
    let disasm = build_disasm_view(listing.disasm(), &mut palette);
    let text = build_text_view(listing.text(), &mut palette);

    let mut out = String::new();
    out.push_str(&format!("== {} :: disassembly ==\n", listing.name()));
    for func in disasm.functions() {
        out.push('\n');
        out.push_str(func.header());
        out.push('\n');
        for block in func.blocks() {
            match block.offset() {
                Some(offset) => out.push_str(&format!(";; offset {offset:#x}\n")),
                None => out.push_str(";; no offset\n"),
            }
            out.push_str(block.text());
            out.push('\n');
        }
    }

    out.push_str(&format!("\n== {} :: structured text ==\n\n", listing.name()));
    for block in text.blocks() {
        if let Some(offset) = block.offset() {
            out.push_str(&format!(";; offset {offset:#x}\n"));
        }
        out.push_str(block.text());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use crate::model::demo_listing;

    use super::dump_module;

    #[test]
    fn dump_contains_both_views_and_offsets() {
        let dump = dump_module(&demo_listing());

        assert!(dump.contains("== demo.wasm :: disassembly =="));
        assert!(dump.contains("== demo.wasm :: structured text =="));
        assert!(dump.contains("Disassembly of function <add>:"));
        assert!(dump.contains("Disassembly of function <demo::triple>:"));
        assert!(dump.contains(";; offset 0x23"));
        assert!(dump.contains(";; no offset"));
        // The offsetless "(module" chunk is skipped in the text view.
        assert!(!dump.contains("(module"));
    }
}

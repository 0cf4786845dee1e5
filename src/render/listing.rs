// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The block builder: contiguous same-offset runs become one visual block.

use smallvec::SmallVec;

use crate::color::{BlockColor, OffsetPalette};
use crate::model::{DisasmListing, Function, Offset, TextListing};

use super::text::render_instruction_line;

/// One visually contiguous, optionally offset-tagged rendering unit.
///
/// Blocks are created during rendering and immutable afterwards; hover state
/// lives in [`crate::ui::LinkState`], not here. A block is interactive exactly
/// when it carries a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    offset: Option<Offset>,
    text: String,
    color: Option<BlockColor>,
}

impl Block {
    pub fn offset(&self) -> Option<Offset> {
        self.offset
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Option<BlockColor> {
        self.color
    }

    pub fn is_colored(&self) -> bool {
        self.color.is_some()
    }
}

/// One function's header plus its instruction blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionView {
    header: String,
    detail: String,
    blocks: Vec<Block>,
}

impl FunctionView {
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Secondary identification line (index and raw symbol name).
    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

/// The rendered disassembly pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisasmView {
    functions: Vec<FunctionView>,
}

impl DisasmView {
    pub fn functions(&self) -> &[FunctionView] {
        &self.functions
    }
}

/// The rendered structured-text pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextView {
    blocks: Vec<Block>,
}

impl TextView {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

/// Run state threaded across the whole disassembly pass.
///
/// The cursor spans function boundaries (as the upstream pass does) while the
/// line buffer does not: blocks never span functions because every function
/// flushes its tail run.
#[derive(Debug, Clone, Copy, Default)]
struct RunCursor {
    last: Option<Option<Offset>>,
}

impl RunCursor {
    /// Advances to `offset`, reporting whether this starts a new run.
    fn advance(&mut self, offset: Option<Offset>) -> bool {
        let boundary = self.last != Some(offset);
        self.last = Some(offset);
        boundary
    }
}

#[derive(Debug, Default)]
struct RunBuffer {
    offset: Option<Offset>,
    lines: SmallVec<[String; 8]>,
}

impl RunBuffer {
    fn push(&mut self, offset: Option<Offset>, line: String) {
        if self.lines.is_empty() {
            self.offset = offset;
        }
        self.lines.push(line);
    }

    fn flush_into(&mut self, blocks: &mut Vec<Block>, palette: &mut OffsetPalette) {
        if self.lines.is_empty() {
            return;
        }
        let color = self.offset.map(|offset| palette.color_for(offset));
        blocks.push(Block {
            offset: self.offset,
            text: self.lines.join("\n"),
            color,
        });
        self.lines.clear();
        self.offset = None;
    }
}

fn build_function_view(
    func: &Function,
    palette: &mut OffsetPalette,
    cursor: &mut RunCursor,
) -> FunctionView {
    let mut blocks = Vec::new();
    let mut run = RunBuffer::default();

    for inst in func.instructions() {
        if cursor.advance(inst.offset()) {
            run.flush_into(&mut blocks, palette);
        }
        run.push(inst.offset(), render_instruction_line(inst));
    }
    run.flush_into(&mut blocks, palette);

    FunctionView {
        header: format!("Disassembly of function <{}>:", func.display_name()),
        detail: format!("Function {}: {}", func.index(), func.raw_name()),
        blocks,
    }
}

/// Builds the disassembly pane, coloring every offset-bearing run.
pub fn build_disasm_view(listing: &DisasmListing, palette: &mut OffsetPalette) -> DisasmView {
    let mut cursor = RunCursor::default();
    let functions = listing
        .functions()
        .iter()
        .map(|func| build_function_view(func, palette, &mut cursor))
        .collect();
    DisasmView { functions }
}

/// Builds the structured-text pane.
///
/// Chunks without an offset are not rendered. Offset-bearing chunks are always
/// tagged; they are colored (and thereby interactive) only when the palette
/// already knows the offset from the disassembly pass. A chunk whose offset
/// the disassembly never produced stays tagged but uncolored.
pub fn build_text_view(listing: &TextListing, palette: &mut OffsetPalette) -> TextView {
    let mut blocks = Vec::new();
    for chunk in listing.chunks() {
        let Some(offset) = chunk.offset() else {
            continue;
        };
        let color = palette
            .contains(offset)
            .then(|| palette.color_for(offset));
        blocks.push(Block {
            offset: Some(offset),
            text: chunk.text().to_owned(),
            color,
        });
    }
    TextView { blocks }
}

#[cfg(test)]
mod tests {
    use crate::color::OffsetPalette;
    use crate::model::{
        DisasmListing, Function, Instruction, TextChunk, TextListing,
    };

    use super::{build_disasm_view, build_text_view};

    fn inst(address: u64, mnemonic: &str, offset: Option<u64>) -> Instruction {
        Instruction::new(address, vec![0x90], mnemonic, "", offset)
    }

    fn single_function(instructions: Vec<Instruction>) -> DisasmListing {
        DisasmListing::new(vec![Function::new(0, None, None, instructions)])
    }

    #[test]
    fn empty_listing_produces_zero_blocks() {
        let mut palette = OffsetPalette::new();
        let view = build_disasm_view(&DisasmListing::default(), &mut palette);
        assert!(view.functions().is_empty());

        let text = build_text_view(&TextListing::default(), &mut palette);
        assert!(text.blocks().is_empty());
        assert!(palette.is_empty());
    }

    #[test]
    fn single_run_flushes_exactly_one_block() {
        let mut palette = OffsetPalette::new();
        let listing = single_function(vec![
            inst(0x10, "push", Some(7)),
            inst(0x11, "mov", Some(7)),
            inst(0x14, "ret", Some(7)),
        ]);

        let view = build_disasm_view(&listing, &mut palette);
        let blocks = view.functions()[0].blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].offset(), Some(7));
        assert!(blocks[0].is_colored());
        assert_eq!(blocks[0].text().lines().count(), 3);
    }

    #[test]
    fn block_count_equals_contiguous_run_count() {
        let mut palette = OffsetPalette::new();
        // Runs: [1, 1], [None], [1], [2]. None counts as its own run.
        let listing = single_function(vec![
            inst(0x10, "a", Some(1)),
            inst(0x11, "b", Some(1)),
            inst(0x12, "c", None),
            inst(0x13, "d", Some(1)),
            inst(0x14, "e", Some(2)),
        ]);

        let view = build_disasm_view(&listing, &mut palette);
        let blocks = view.functions()[0].blocks();
        assert_eq!(blocks.len(), 4);
        assert_eq!(
            blocks.iter().map(|b| b.offset()).collect::<Vec<_>>(),
            vec![Some(1), None, Some(1), Some(2)],
        );
        assert!(!blocks[1].is_colored());

        // Concatenating block lines reproduces the input order exactly.
        let lines: Vec<&str> = blocks.iter().flat_map(|b| b.text().lines()).collect();
        let mnemonics: Vec<&str> = lines
            .iter()
            .map(|line| line.rsplit("    ").next().expect("mnemonic column"))
            .collect();
        assert_eq!(mnemonics, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn same_offset_blocks_share_a_color() {
        let mut palette = OffsetPalette::new();
        let listing = single_function(vec![
            inst(0x10, "a", Some(1)),
            inst(0x11, "b", Some(2)),
            inst(0x12, "c", Some(1)),
        ]);

        let view = build_disasm_view(&listing, &mut palette);
        let blocks = view.functions()[0].blocks();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].color(), blocks[2].color());
        assert_ne!(blocks[0].color(), blocks[1].color());
    }

    #[test]
    fn runs_do_not_span_function_boundaries() {
        let mut palette = OffsetPalette::new();
        let listing = DisasmListing::new(vec![
            Function::new(0, None, None, vec![inst(0x10, "a", Some(5))]),
            Function::new(1, None, None, vec![inst(0x20, "b", Some(5))]),
        ]);

        let view = build_disasm_view(&listing, &mut palette);
        assert_eq!(view.functions().len(), 2);
        assert_eq!(view.functions()[0].blocks().len(), 1);
        assert_eq!(view.functions()[1].blocks().len(), 1);
        assert_eq!(view.functions()[1].blocks()[0].offset(), Some(5));
    }

    #[test]
    fn function_header_uses_display_name_fallbacks() {
        let mut palette = OffsetPalette::new();
        let listing = DisasmListing::new(vec![
            Function::new(3, None, None, Vec::new()),
            Function::new(
                4,
                Some("_Zmangled".to_owned()),
                Some("demo::nice".to_owned()),
                Vec::new(),
            ),
        ]);

        let view = build_disasm_view(&listing, &mut palette);
        assert_eq!(
            view.functions()[0].header(),
            "Disassembly of function <function[3]>:"
        );
        assert_eq!(view.functions()[0].detail(), "Function 3: function[3]");
        assert_eq!(
            view.functions()[1].header(),
            "Disassembly of function <demo::nice>:"
        );
        assert_eq!(view.functions()[1].detail(), "Function 4: _Zmangled");
    }

    #[test]
    fn text_view_skips_offsetless_chunks() {
        let mut palette = OffsetPalette::new();
        let listing = TextListing::new(vec![
            TextChunk::new("(module", None),
            TextChunk::new("(func)", Some(9)),
        ]);

        let view = build_text_view(&listing, &mut palette);
        assert_eq!(view.blocks().len(), 1);
        assert_eq!(view.blocks()[0].offset(), Some(9));
    }

    #[test]
    fn text_chunks_color_only_when_offset_already_known() {
        let mut palette = OffsetPalette::new();
        let disasm = single_function(vec![inst(0x10, "a", Some(9))]);
        build_disasm_view(&disasm, &mut palette);

        let listing = TextListing::new(vec![
            TextChunk::new("known", Some(9)),
            TextChunk::new("late", Some(77)),
        ]);
        let view = build_text_view(&listing, &mut palette);

        let known = &view.blocks()[0];
        assert!(known.is_colored());

        // The late chunk stays tagged for future matching but is not colored,
        // and building the text view must not have inserted its offset.
        let late = &view.blocks()[1];
        assert_eq!(late.offset(), Some(77));
        assert!(!late.is_colored());
        assert!(!palette.contains(77));
    }

    #[test]
    fn disasm_and_text_agree_on_shared_offset_colors() {
        let mut palette = OffsetPalette::new();
        let disasm = single_function(vec![inst(0x10, "a", Some(0x23))]);
        let disasm_view = build_disasm_view(&disasm, &mut palette);

        let text = TextListing::new(vec![TextChunk::new("(func $a", Some(0x23))]);
        let text_view = build_text_view(&text, &mut palette);

        assert_eq!(
            disasm_view.functions()[0].blocks()[0].color(),
            text_view.blocks()[0].color(),
        );
    }
}

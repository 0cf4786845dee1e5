// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::Offset;
use crate::render::{Block, DisasmView, TextView};

/// Which pane a block lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Pane {
    Disasm,
    Text,
}

/// A handle to one block in either pane.
///
/// Handles are positional, not references: `function` indexes into the
/// disassembly view's functions (`None` for the text pane) and `block` into
/// that container's block list. Valid for the lifetime of the views they were
/// built from; views are only replaced wholesale on a full re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BlockRef {
    pane: Pane,
    function: Option<usize>,
    block: usize,
}

impl BlockRef {
    pub fn pane(self) -> Pane {
        self.pane
    }

    pub fn function(self) -> Option<usize> {
        self.function
    }

    pub fn block(self) -> usize {
        self.block
    }
}

/// Offset → colored blocks, across both panes.
///
/// Built once after both views render; interaction never walks the views, it
/// queries this index. Only colored (interactive) blocks are indexed, so a
/// lookup for a tagged-but-uncolored offset comes back empty.
#[derive(Debug, Clone, Default)]
pub struct OffsetIndex {
    by_offset: BTreeMap<Offset, Vec<BlockRef>>,
}

impl OffsetIndex {
    pub fn build(disasm: &DisasmView, text: &TextView) -> Self {
        let mut by_offset: BTreeMap<Offset, Vec<BlockRef>> = BTreeMap::new();

        let mut insert = |block: &Block, block_ref: BlockRef| {
            let Some(offset) = block.offset() else {
                return;
            };
            if !block.is_colored() {
                return;
            }
            by_offset.entry(offset).or_default().push(block_ref);
        };

        for (function, view) in disasm.functions().iter().enumerate() {
            for (idx, block) in view.blocks().iter().enumerate() {
                insert(
                    block,
                    BlockRef {
                        pane: Pane::Disasm,
                        function: Some(function),
                        block: idx,
                    },
                );
            }
        }
        for (idx, block) in text.blocks().iter().enumerate() {
            insert(
                block,
                BlockRef {
                    pane: Pane::Text,
                    function: None,
                    block: idx,
                },
            );
        }

        Self { by_offset }
    }

    /// Every colored block tagged with `offset`, in render order.
    pub fn blocks_at(&self, offset: Offset) -> &[BlockRef] {
        self.by_offset
            .get(&offset)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn offsets(&self) -> impl Iterator<Item = Offset> + '_ {
        self.by_offset.keys().copied()
    }

    pub fn block_count(&self) -> usize {
        self.by_offset.values().map(Vec::len).sum()
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Byte position in the original source module.
///
/// Offsets are the sole join key between the disassembly and structured-text
/// views; fragments without a source position carry `None` instead.
pub type Offset = u64;

/// One decoded machine instruction of the compiled module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    address: u64,
    bytes: Vec<u8>,
    mnemonic: SmolStr,
    operands: String,
    offset: Option<Offset>,
}

impl Instruction {
    pub fn new(
        address: u64,
        bytes: Vec<u8>,
        mnemonic: impl Into<SmolStr>,
        operands: impl Into<String>,
        offset: Option<Offset>,
    ) -> Self {
        Self {
            address,
            bytes,
            mnemonic: mnemonic.into(),
            operands: operands.into(),
            offset,
        }
    }

    pub fn address(&self) -> u64 {
        self.address
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    pub fn operands(&self) -> &str {
        &self.operands
    }

    pub fn offset(&self) -> Option<Offset> {
        self.offset
    }
}

/// A compiled function plus its instruction stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    index: u32,
    name: Option<String>,
    demangled_name: Option<String>,
    instructions: Vec<Instruction>,
}

impl Function {
    pub fn new(
        index: u32,
        name: Option<String>,
        demangled_name: Option<String>,
        instructions: Vec<Instruction>,
    ) -> Self {
        Self {
            index,
            name,
            demangled_name,
            instructions,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn demangled_name(&self) -> Option<&str> {
        self.demangled_name.as_deref()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Raw symbol name, falling back to a synthetic `function[<index>]` label.
    pub fn raw_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("function[{}]", self.index),
        }
    }

    /// Preferred display name: demangled, else raw, else synthetic.
    pub fn display_name(&self) -> String {
        match &self.demangled_name {
            Some(name) => name.clone(),
            None => self.raw_name(),
        }
    }
}

/// One unit of the structured-text rendition of the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    text: String,
    offset: Option<Offset>,
}

impl TextChunk {
    pub fn new(text: impl Into<String>, offset: Option<Offset>) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn offset(&self) -> Option<Offset> {
        self.offset
    }
}

/// The disassembly side of the module listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisasmListing {
    functions: Vec<Function>,
}

impl DisasmListing {
    pub fn new(functions: Vec<Function>) -> Self {
        Self { functions }
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }
}

/// The structured-text side of the module listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextListing {
    chunks: Vec<TextChunk>,
}

impl TextListing {
    pub fn new(chunks: Vec<TextChunk>) -> Self {
        Self { chunks }
    }

    pub fn chunks(&self) -> &[TextChunk] {
        &self.chunks
    }
}

/// The top-level document the viewer runs against: both listings of one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleListing {
    name: String,
    disasm: DisasmListing,
    text: TextListing,
}

impl ModuleListing {
    pub fn new(name: impl Into<String>, disasm: DisasmListing, text: TextListing) -> Self {
        Self {
            name: name.into(),
            disasm,
            text,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn disasm(&self) -> &DisasmListing {
        &self.disasm
    }

    pub fn text(&self) -> &TextListing {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::{Function, Instruction, ModuleListing};

    #[test]
    fn function_name_fallback_chain() {
        let synthetic = Function::new(7, None, None, Vec::new());
        assert_eq!(synthetic.raw_name(), "function[7]");
        assert_eq!(synthetic.display_name(), "function[7]");

        let raw_only = Function::new(7, Some("_ZN4core3fmt5write".to_owned()), None, Vec::new());
        assert_eq!(raw_only.display_name(), "_ZN4core3fmt5write");

        let demangled = Function::new(
            7,
            Some("_ZN4core3fmt5write".to_owned()),
            Some("core::fmt::write".to_owned()),
            Vec::new(),
        );
        assert_eq!(demangled.raw_name(), "_ZN4core3fmt5write");
        assert_eq!(demangled.display_name(), "core::fmt::write");
    }

    #[test]
    fn listing_json_round_trips() {
        let json = r#"{
            "name": "demo.wasm",
            "disasm": {
                "functions": [
                    {
                        "index": 0,
                        "name": "start",
                        "demangled_name": null,
                        "instructions": [
                            {
                                "address": 4096,
                                "bytes": [85, 72, 137, 229],
                                "mnemonic": "push",
                                "operands": "rbp",
                                "offset": 42
                            }
                        ]
                    }
                ]
            },
            "text": {
                "chunks": [
                    { "text": "(func $start", "offset": 42 },
                    { "text": ")", "offset": null }
                ]
            }
        }"#;

        let listing: ModuleListing = serde_json::from_str(json).expect("listing json");
        assert_eq!(listing.name(), "demo.wasm");
        assert_eq!(listing.disasm().functions().len(), 1);
        let inst = &listing.disasm().functions()[0].instructions()[0];
        assert_eq!(inst.address(), 4096);
        assert_eq!(inst.offset(), Some(42));
        assert_eq!(listing.text().chunks()[1].offset(), None);

        let back = serde_json::to_string(&listing).expect("serialize");
        let reparsed: ModuleListing = serde_json::from_str(&back).expect("reparse");
        assert_eq!(reparsed, listing);

        let inst_json = serde_json::to_value(inst).expect("inst json");
        assert_eq!(inst_json["mnemonic"], "push");
        assert_eq!(inst_json["offset"], 42);
    }
}

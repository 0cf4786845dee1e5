// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::listing::{
    DisasmListing, Function, Instruction, ModuleListing, TextChunk, TextListing,
};

fn inst(
    address: u64,
    bytes: &[u8],
    mnemonic: &str,
    operands: &str,
    offset: Option<u64>,
) -> Instruction {
    Instruction::new(address, bytes.to_vec(), mnemonic, operands, offset)
}

/// Built-in demo listing used by `--demo` and the integration tests.
///
/// A tiny wasm module compiled to x86-64: two functions, with source offsets
/// shared between the disassembly and the structured text, one padding
/// instruction without an offset, and one "late" text chunk whose offset the
/// disassembly never produced.
pub fn demo_listing() -> ModuleListing {
    let add = Function::new(
        0,
        Some("add".to_owned()),
        None,
        vec![
            inst(0x1000, &[0x55], "push", "rbp", Some(0x23)),
            inst(0x1001, &[0x48, 0x89, 0xe5], "mov", "rbp, rsp", Some(0x23)),
            inst(0x1004, &[0x8d, 0x04, 0x37], "lea", "eax, [rdi + rsi]", Some(0x27)),
            inst(0x1007, &[0x5d], "pop", "rbp", Some(0x2a)),
            inst(0x1008, &[0xc3], "ret", "", Some(0x2a)),
            inst(0x1009, &[0xcc], "int3", "", None),
        ],
    );

    let mangled = "_ZN4demo6triple17h1b9a64de0f8ab1c2E";
    let triple = Function::new(
        1,
        Some(mangled.to_owned()),
        Some("demo::triple".to_owned()),
        vec![
            inst(0x1010, &[0x55], "push", "rbp", Some(0x31)),
            inst(0x1011, &[0x48, 0x89, 0xe5], "mov", "rbp, rsp", Some(0x31)),
            inst(0x1014, &[0x8d, 0x04, 0x7f], "lea", "eax, [rdi + rdi*2]", Some(0x35)),
            inst(0x1017, &[0x5d], "pop", "rbp", Some(0x39)),
            inst(0x1018, &[0xc3], "ret", "", Some(0x39)),
        ],
    );

    let chunks = vec![
        TextChunk::new("(module", None),
        TextChunk::new("  (func $add (param i32 i32) (result i32)", Some(0x23)),
        TextChunk::new("    local.get 0\n    local.get 1\n    i32.add", Some(0x27)),
        TextChunk::new("  )", Some(0x2a)),
        TextChunk::new("  (func $triple (param i32) (result i32)", Some(0x31)),
        TextChunk::new("    local.get 0\n    i32.const 3\n    i32.mul", Some(0x35)),
        TextChunk::new("  )", Some(0x39)),
        TextChunk::new("  (table 1 1 funcref)", Some(0x41)),
        TextChunk::new(")", None),
    ];

    ModuleListing::new(
        "demo.wasm",
        DisasmListing::new(vec![add, triple]),
        TextListing::new(chunks),
    )
}

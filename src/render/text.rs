// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::Instruction;

/// Width of the raw-bytes column, so the mnemonic column lines up.
pub const BYTES_COLUMN_WIDTH: usize = 30;

const COLUMN_GAP: &str = "    ";

/// Lowercase hex address, zero-padded to 8 digits.
pub fn render_address(address: u64) -> String {
    format!("{address:08x}")
}

/// Raw instruction bytes as space-separated two-digit hex, right-padded with
/// spaces to [`BYTES_COLUMN_WIDTH`]. Longer byte runs are never truncated.
pub fn render_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(BYTES_COLUMN_WIDTH);
    for (idx, byte) in bytes.iter().enumerate() {
        if idx != 0 {
            out.push(' ');
        }
        out.push_str(&format!("{byte:02x}"));
    }
    while out.len() < BYTES_COLUMN_WIDTH {
        out.push(' ');
    }
    out
}

/// Mnemonic plus operands; the separator is omitted entirely when there are no
/// operands.
pub fn render_inst(mnemonic: &str, operands: &str) -> String {
    if operands.is_empty() {
        mnemonic.to_owned()
    } else {
        format!("{mnemonic} {operands}")
    }
}

pub(crate) fn render_instruction_line(inst: &Instruction) -> String {
    format!(
        "{}{COLUMN_GAP}{}{COLUMN_GAP}{}",
        render_address(inst.address()),
        render_bytes(inst.bytes()),
        render_inst(inst.mnemonic(), inst.operands()),
    )
}

#[cfg(test)]
mod tests {
    use crate::model::Instruction;

    use super::{
        render_address, render_bytes, render_inst, render_instruction_line, BYTES_COLUMN_WIDTH,
    };

    #[test]
    fn address_is_zero_padded_to_eight_hex_digits() {
        assert_eq!(render_address(0xff), "000000ff");
        assert_eq!(render_address(0), "00000000");
        assert_eq!(render_address(0x1234_5678), "12345678");
        // Wider addresses keep their full width.
        assert_eq!(render_address(0x1_0000_0000), "100000000");
    }

    #[test]
    fn bytes_render_padded_to_column_width() {
        let rendered = render_bytes(&[0, 255, 16]);
        assert_eq!(rendered.len(), BYTES_COLUMN_WIDTH);
        assert_eq!(rendered.trim_end(), "00 ff 10");
        assert!(rendered.ends_with(' '));
    }

    #[test]
    fn empty_bytes_render_as_blank_column() {
        assert_eq!(render_bytes(&[]), " ".repeat(BYTES_COLUMN_WIDTH));
    }

    #[test]
    fn long_byte_runs_are_not_truncated() {
        let bytes = vec![0xabu8; 16];
        let rendered = render_bytes(&bytes);
        assert!(rendered.len() > BYTES_COLUMN_WIDTH);
        assert!(rendered.starts_with("ab ab"));
    }

    #[test]
    fn inst_omits_separator_without_operands() {
        assert_eq!(render_inst("ret", ""), "ret");
        assert_eq!(render_inst("mov", "rbp, rsp"), "mov rbp, rsp");
    }

    #[test]
    fn instruction_line_joins_three_columns() {
        let inst = Instruction::new(0xff, vec![0xc3], "ret", "", Some(1));
        let line = render_instruction_line(&inst);
        assert!(line.starts_with("000000ff    c3"));
        assert!(line.ends_with("    ret"));
    }
}

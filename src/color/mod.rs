// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Offlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Offlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic offset-to-color derivation.
//!
//! Every source offset gets a stable, high-contrast background color derived by
//! folding the offset's bytes through a CRC-24 style mix, plus a fixed light or
//! dark foreground picked from the background's NTSC luminance. Colors are
//! memoized in an [`OffsetPalette`] owned by the rendering session.

use std::collections::BTreeMap;

use ratatui::style::Color;

use crate::model::Offset;

const CRC24_POLY: u32 = 0xfa5711;
const CRC24_MASK: u32 = 0xff_ffff;
const WASHOUT_XOR: u32 = 0xa5a5a5;

// The inversion and text-color thresholds differ by one on purpose; both are
// carried over literally from the reference palette.
const INVERT_LUMINANCE: f64 = 127.0;
const DARK_TEXT_LUMINANCE: f64 = 128.0;

// A u64 yields at most 8 byte-extraction rounds; the explicit cap keeps the
// mix loop bounded no matter what the offset arithmetic above it does.
const MAX_MIX_ROUNDS: u32 = 8;

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Dark foreground paired with light backgrounds.
pub const DARK_TEXT: Rgb = Rgb {
    r: 0x10,
    g: 0x10,
    b: 0x10,
};

/// Light foreground paired with dark backgrounds.
pub const LIGHT_TEXT: Rgb = Rgb {
    r: 0xdd,
    g: 0xdd,
    b: 0xdd,
};

impl Rgb {
    pub fn from_packed(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }

    pub fn packed(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// NTSC (YIQ) luma approximation in `0.0..=255.0`.
    pub fn luminance(self) -> f64 {
        (f64::from(self.r) * 299.0 + f64::from(self.g) * 587.0 + f64::from(self.b) * 114.0)
            / 1000.0
    }
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Self {
        Color::Rgb(value.r, value.g, value.b)
    }
}

/// The background/foreground pair assigned to one offset.
///
/// The foreground is always one of exactly two fixed values ([`DARK_TEXT`] or
/// [`LIGHT_TEXT`]), chosen solely from the background luminance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockColor {
    bg: Rgb,
    fg: Rgb,
}

impl BlockColor {
    pub fn bg(self) -> Rgb {
        self.bg
    }

    pub fn fg(self) -> Rgb {
        self.fg
    }
}

fn crc24(mut crc: u32, byte: u8) -> u32 {
    crc ^= u32::from(byte) << 16;
    for _ in 0..8 {
        let shifted = crc.wrapping_shl(1);
        crc = if crc & 0x80_0000 != 0 {
            shifted ^ CRC24_POLY
        } else {
            shifted
        };
        crc &= CRC24_MASK;
    }
    crc
}

/// Mixes an offset into a 24-bit packed RGB value.
///
/// The mix is seeded with the offset itself and folds its little-endian bytes
/// until the remainder is zero. Offset 0 therefore runs zero mix rounds and
/// maps to the fixed seed color; that quirk is part of the stable contract.
fn mix_offset(offset: Offset) -> u32 {
    let mut color = offset as u32;
    let mut rest = offset;
    let mut rounds = 0;
    while rest != 0 && rounds < MAX_MIX_ROUNDS {
        color = crc24(color, (rest & 0xff) as u8);
        rest >>= 8;
        rounds += 1;
    }
    color & CRC24_MASK
}

fn derive_color(offset: Offset) -> BlockColor {
    let mut packed = mix_offset(offset);
    if Rgb::from_packed(packed).luminance() > INVERT_LUMINANCE {
        packed ^= WASHOUT_XOR;
    }

    let bg = Rgb::from_packed(packed);
    let fg = if bg.luminance() > DARK_TEXT_LUMINANCE {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    };
    BlockColor { bg, fg }
}

/// Session-owned memo cache for offset colors.
///
/// Append-only for the lifetime of one rendering session; a full re-render
/// starts from a fresh palette. [`OffsetPalette::contains`] doubles as the
/// "has this offset been colored yet" query the structured-text pass needs.
#[derive(Debug, Clone, Default)]
pub struct OffsetPalette {
    colors: BTreeMap<Offset, BlockColor>,
}

impl OffsetPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_for(&mut self, offset: Offset) -> BlockColor {
        *self
            .colors
            .entry(offset)
            .or_insert_with(|| derive_color(offset))
    }

    pub fn contains(&self, offset: Offset) -> bool {
        self.colors.contains_key(&offset)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

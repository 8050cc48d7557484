//! Glyph codes and the atlas layout they resolve to.
//!
//! A glyph code is a single byte. Codes below [`ENCODED_BASE`] address an
//! atlas cell directly and are used for literal text (ASCII minus `0x20`).
//! Codes at or above it are "encoded" glyphs: `code - ENCODED_BASE` indexes
//! [`ENCODING`], which holds the real atlas cell. The split lets the shader
//! tell literal text apart from rain glyphs without a second attribute.

use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::random::integer_uniform;

/// Atlas width in cells.
pub const ATLAS_COLUMNS: u32 = 16;
/// Atlas height in cells.
pub const ATLAS_ROWS: u32 = 13;
/// First encoded glyph code; everything below is a literal atlas cell.
pub const ENCODED_BASE: u8 = 208;
/// The empty cell (ASCII space).
pub const BLANK: u8 = 0;

/// Encoded index -> atlas cell.
///
/// `0..16` matrix glyphs, `16..26` digits, `26..32` `A`-`F`, `32..36` the
/// DNA bases `A`, `C`, `G`, `T`.
pub const ENCODING: [u8; 36] = [
    160, 161, 162, 163, 164, 165, 166, 167, //
    168, 169, 170, 171, 172, 173, 174, 175, //
    16, 17, 18, 19, 20, 21, 22, 23, 24, 25, //
    33, 34, 35, 36, 37, 38, //
    33, 35, 39, 52,
];

/// Which character set strips draw their glyphs from.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum GlyphMode {
    /// Matrix glyphs mixed with digits.
    #[default]
    Matrix,
    /// Decimal digits.
    Decimal,
    /// Hexadecimal digits.
    Hex,
    /// Zeros and ones.
    Binary,
    /// Nucleotide letters.
    Dna,
}

impl GlyphMode {
    /// Every mode, in declaration order.
    pub const ALL: [GlyphMode; 5] =
        [Self::Matrix, Self::Decimal, Self::Hex, Self::Binary, Self::Dna];

    /// `(base_offset, range)` into [`ENCODING`].
    pub const fn span(self) -> (u8, u8) {
        match self {
            Self::Matrix => (0, 26),
            Self::Decimal => (16, 10),
            Self::Hex => (16, 16),
            Self::Binary => (16, 2),
            Self::Dna => (32, 4),
        }
    }

    /// Every code this mode can produce.
    pub fn codes(self) -> impl Iterator<Item = u8> {
        let (offset, range) = self.span();
        (0..range).map(move |i| ENCODED_BASE + offset + i)
    }

    /// Lowercase name as used in config files and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Matrix => "matrix",
            Self::Decimal => "decimal",
            Self::Hex => "hex",
            Self::Binary => "binary",
            Self::Dna => "dna",
        }
    }
}

impl std::str::FromStr for GlyphMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown glyph mode '{s}' (expected one of: matrix, \
                     decimal, hex, binary, dna)"
                )
            })
    }
}

/// Draw a random encoded glyph for `mode`.
pub fn random_glyph<R: Rng + ?Sized>(mode: GlyphMode, rng: &mut R) -> u8 {
    let (offset, range) = mode.span();
    ENCODED_BASE + offset + integer_uniform(rng, u32::from(range)) as u8
}

/// Literal code for a text character; non-printable characters are blank.
pub fn text_glyph(c: char) -> u8 {
    if (' '..='~').contains(&c) {
        c as u8 - b' '
    } else {
        BLANK
    }
}

/// Whether `code` is literal text rather than an encoded rain glyph.
#[inline]
pub fn is_literal(code: u8) -> bool {
    code < ENCODED_BASE
}

/// Atlas cell index (row-major) for a glyph code.
pub fn atlas_index(code: u8) -> u32 {
    if is_literal(code) {
        u32::from(code)
    } else {
        ENCODING
            .get(usize::from(code - ENCODED_BASE))
            .map_or(u32::from(BLANK), |&cell| u32::from(cell))
    }
}

/// Column and row of a glyph within the atlas grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasCell {
    /// Zero-based column, `0..ATLAS_COLUMNS`.
    pub column: u32,
    /// Zero-based row, `0..ATLAS_ROWS`.
    pub row: u32,
}

impl AtlasCell {
    /// Normalized texture rectangle `[u0, v0, u1, v1]`.
    pub fn uv_rect(self) -> [f32; 4] {
        let w = ATLAS_COLUMNS as f32;
        let h = ATLAS_ROWS as f32;
        [
            self.column as f32 / w,
            self.row as f32 / h,
            (self.column + 1) as f32 / w,
            (self.row + 1) as f32 / h,
        ]
    }
}

/// Atlas cell for a glyph code: `(index mod 16, floor(index / 16))`.
pub fn atlas_cell(code: u8) -> AtlasCell {
    let index = atlas_index(code);
    AtlasCell {
        column: index % ATLAS_COLUMNS,
        row: index / ATLAS_COLUMNS,
    }
}

/// [`ENCODING`] packed four to a row, the layout the rain shader's uniform
/// block expects.
pub fn packed_encoding() -> [[u32; 4]; 9] {
    let mut packed = [[0; 4]; 9];
    for (i, &cell) in ENCODING.iter().enumerate() {
        packed[i / 4][i % 4] = u32::from(cell);
    }
    packed
}

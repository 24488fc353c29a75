//! Threshold classification of a normalized field into terrain tiles.
//!
//! The thresholds and numeric codes are part of the external tile format:
//!
//! | normalized value | kind     | code |
//! |------------------|----------|------|
//! | `< 0.4`          | water    | 0    |
//! | `< 0.7`          | grass    | 1    |
//! | otherwise        | mountain | 2    |

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::noise::NormalizedNoiseField;

/// Values below this are water.
pub const WATER_THRESHOLD: f64 = 0.4;
/// Values below this (and at least [`WATER_THRESHOLD`]) are grass.
pub const GRASS_THRESHOLD: f64 = 0.7;

/// Terrain category of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum TerrainKind {
    Water = 0,
    Grass = 1,
    Mountain = 2,
}

impl TerrainKind {
    /// Every kind, in code order.
    pub const ALL: [Self; 3] = [Self::Water, Self::Grass, Self::Mountain];

    /// Classify a normalized value.
    #[inline]
    pub fn from_normalized(value: f64) -> Self {
        if value < WATER_THRESHOLD {
            Self::Water
        } else if value < GRASS_THRESHOLD {
            Self::Grass
        } else {
            Self::Mountain
        }
    }

    /// Wire code of this kind.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Single-character preview glyph.
    pub const fn glyph(self) -> char {
        match self {
            Self::Water => '~',
            Self::Grass => '.',
            Self::Mountain => '^',
        }
    }
}

impl From<TerrainKind> for u8 {
    fn from(kind: TerrainKind) -> Self {
        kind.code()
    }
}

impl TryFrom<u8> for TerrainKind {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| format!("unknown terrain code {code}"))
    }
}

/// Tile counts per terrain kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainCensus {
    pub water: usize,
    pub grass: usize,
    pub mountain: usize,
}

impl TerrainCensus {
    pub fn total(&self) -> usize {
        self.water + self.grass + self.mountain
    }

    pub fn count(&self, kind: TerrainKind) -> usize {
        match kind {
            TerrainKind::Water => self.water,
            TerrainKind::Grass => self.grass,
            TerrainKind::Mountain => self.mountain,
        }
    }
}

/// Classified terrain, one tile per field cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainGrid {
    grid: Grid<TerrainKind>,
}

impl TerrainGrid {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Tile at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<TerrainKind> {
        self.grid.get(x, y).copied()
    }

    pub fn grid(&self) -> &Grid<TerrainKind> {
        &self.grid
    }

    /// Tile codes as `height` rows of `width` entries.
    pub fn codes(&self) -> Vec<Vec<u8>> {
        self.grid
            .rows()
            .map(|row| row.iter().map(|&kind| kind.code()).collect())
            .collect()
    }

    /// Count tiles of each kind.
    pub fn census(&self) -> TerrainCensus {
        let mut census = TerrainCensus::default();
        for kind in self.grid.as_slice() {
            match kind {
                TerrainKind::Water => census.water += 1,
                TerrainKind::Grass => census.grass += 1,
                TerrainKind::Mountain => census.mountain += 1,
            }
        }
        census
    }

    /// Render one glyph per tile, rows separated by newlines.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width() + 1) * self.height());
        for row in self.grid.rows() {
            out.extend(row.iter().map(|&kind| kind.glyph()));
            out.push('\n');
        }
        out
    }
}

/// Classify every cell of a normalized field.
pub fn classify(field: &NormalizedNoiseField) -> TerrainGrid {
    TerrainGrid {
        grid: field.grid().map(|&value| TerrainKind::from_normalized(value)),
    }
}

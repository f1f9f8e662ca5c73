//! Breakout level grids
//!
//! A level file is a grid of unsigned integers, one row per line, separated
//! by whitespace: `0` empty, `1` solid, anything above is a destructible
//! brick whose number picks the colour. Bricks fill the top half of the
//! play area.

use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{Brick, WHITE};

/// Levels shipped with the game, in menu order
pub const BUNDLED_LEVELS: [(&str, &str); 4] = [
    ("one", include_str!("../../assets/levels/one.lvl")),
    ("two", include_str!("../../assets/levels/two.lvl")),
    ("three", include_str!("../../assets/levels/three.lvl")),
    ("four", include_str!("../../assets/levels/four.lvl")),
];

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid cell '{token}' at row {row}, column {col}")]
    BadCell {
        row: usize,
        col: usize,
        token: String,
    },
    #[error("Row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Level has no bricks")]
    Empty,
}

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Solid,
    Destructible(u32),
}

impl CellKind {
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => CellKind::Empty,
            1 => CellKind::Solid,
            n => CellKind::Destructible(n),
        }
    }

    pub fn tint(self) -> Vec3 {
        match self {
            CellKind::Solid => Vec3::new(0.8, 0.8, 0.7),
            CellKind::Destructible(2) => Vec3::new(0.2, 0.6, 1.0),
            CellKind::Destructible(3) => Vec3::new(0.0, 0.7, 0.0),
            CellKind::Destructible(4) => Vec3::new(0.8, 0.8, 0.4),
            CellKind::Destructible(5) => Vec3::new(1.0, 0.5, 0.0),
            _ => WHITE,
        }
    }
}

/// A parsed level grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub cells: Vec<Vec<CellKind>>,
}

impl Level {
    /// Parse the text format. Blank lines are ignored.
    pub fn parse(name: &str, src: &str) -> Result<Self, LevelError> {
        let mut cells: Vec<Vec<CellKind>> = Vec::new();
        for line in src.lines().filter(|l| !l.trim().is_empty()) {
            let row = cells.len();
            let parsed = line
                .split_whitespace()
                .enumerate()
                .map(|(col, token)| {
                    token
                        .parse::<u32>()
                        .map(CellKind::from_code)
                        .map_err(|_| LevelError::BadCell {
                            row,
                            col,
                            token: token.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let expected = cells.first().map_or(parsed.len(), Vec::len);
            if parsed.len() != expected {
                return Err(LevelError::Ragged {
                    row,
                    expected,
                    found: parsed.len(),
                });
            }
            cells.push(parsed);
        }

        if cells.is_empty() {
            return Err(LevelError::Empty);
        }
        Ok(Self {
            name: name.to_string(),
            cells,
        })
    }

    /// Read and parse a level file; the file stem becomes the level name
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(&name, &src)
    }

    /// Parse every bundled level, skipping (and logging) any that fail
    pub fn bundled() -> Vec<Level> {
        BUNDLED_LEVELS
            .iter()
            .filter_map(|(name, src)| match Level::parse(name, src) {
                Ok(level) => Some(level),
                Err(e) => {
                    log::error!("Bundled level '{}' is invalid: {}", name, e);
                    None
                }
            })
            .collect()
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Lay the grid out over a `width` x `height` brick area
    pub fn bricks(&self, width: f32, height: f32) -> Vec<Brick> {
        let (rows, cols) = (self.rows(), self.columns());
        if rows == 0 || cols == 0 {
            return Vec::new();
        }
        let unit = Vec2::new(width / cols as f32, height / rows as f32);

        let mut bricks = Vec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == CellKind::Empty {
                    continue;
                }
                bricks.push(Brick {
                    pos: unit * Vec2::new(x as f32, y as f32),
                    size: unit,
                    tint: cell.tint(),
                    solid: cell == CellKind::Solid,
                    destroyed: false,
                });
            }
        }
        bricks
    }
}

/// A level is complete once every destructible brick is gone
pub fn is_completed(bricks: &[Brick]) -> bool {
    bricks
        .iter()
        .filter(|b| b.counts_for_clear())
        .all(|b| b.destroyed)
}

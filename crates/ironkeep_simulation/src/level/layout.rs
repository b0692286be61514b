//! ASCII level layout
//!
//! Тайлы:
//! - `#` стена
//! - `S` secret wall (не больше одной)
//! - `E` spawn point врага
//! - `P` старт игрока (ровно один)
//! - `.` / пробел — пол
//!
//! Клетка (col, row) → мир (col * cell_size, _, row * cell_size).

use std::fmt;

use bevy::prelude::*;

/// Ошибка разбора layout (фатальна для старта)
#[derive(Debug, Clone, PartialEq)]
pub enum LevelError {
    Empty,
    InvalidCellSize(f32),
    UnknownTile { row: usize, col: usize, tile: char },
    PlayerStart { found: usize },
    MultipleSecrets { found: usize },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "level layout is empty"),
            Self::InvalidCellSize(size) => write!(f, "cell size must be positive, got {size}"),
            Self::UnknownTile { row, col, tile } => {
                write!(f, "unknown tile '{tile}' at row {row}, col {col}")
            }
            Self::PlayerStart { found } => {
                write!(f, "expected exactly one player start 'P', found {found}")
            }
            Self::MultipleSecrets { found } => {
                write!(f, "at most one secret wall 'S' allowed, found {found}")
            }
        }
    }
}

impl std::error::Error for LevelError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Wall,
    SecretWall,
    EnemySpawn,
    PlayerStart,
}

impl Tile {
    fn parse(tile: char) -> Option<Self> {
        match tile {
            '.' | ' ' => Some(Tile::Floor),
            '#' => Some(Tile::Wall),
            'S' => Some(Tile::SecretWall),
            'E' => Some(Tile::EnemySpawn),
            'P' => Some(Tile::PlayerStart),
            _ => None,
        }
    }
}

/// Провалидированная карта уровня
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    tiles: Vec<Vec<Tile>>,
    pub cell_size: f32,
    pub wall_height: f32,
}

const ARENA: &[&str] = &[
    "#####################",
    "#...................#",
    "#..E.............E..#",
    "#...................#",
    "#......#.....#......#",
    "#...................#",
    "#.........P.........#",
    "#...................#",
    "#......#.....#......#",
    "#...................#",
    "#..E......E......E..#",
    "#...................#",
    "##########S##########",
];

impl LevelLayout {
    pub fn from_rows(rows: &[&str], cell_size: f32, wall_height: f32) -> Result<Self, LevelError> {
        if rows.is_empty() {
            return Err(LevelError::Empty);
        }
        if cell_size.is_nan() || cell_size <= 0.0 {
            return Err(LevelError::InvalidCellSize(cell_size));
        }

        let tiles = rows
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, tile)| {
                        Tile::parse(tile).ok_or(LevelError::UnknownTile { row, col, tile })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let layout = Self {
            tiles,
            cell_size,
            wall_height,
        };

        let starts = layout.count(Tile::PlayerStart);
        if starts != 1 {
            return Err(LevelError::PlayerStart { found: starts });
        }
        let secrets = layout.count(Tile::SecretWall);
        if secrets > 1 {
            return Err(LevelError::MultipleSecrets { found: secrets });
        }

        Ok(layout)
    }

    /// Разбор из текста (файл уровня): пустые строки пропускаются
    pub fn from_text(text: &str, cell_size: f32, wall_height: f32) -> Result<Self, LevelError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        Self::from_rows(&rows, cell_size, wall_height)
    }

    /// Дефолтная арена: 5 врагов, secret wall в южной стене
    pub fn arena() -> Self {
        Self::from_rows(ARENA, 4.0, 4.0).unwrap_or_else(|err| {
            unreachable!("built-in arena layout is invalid: {err}")
        })
    }

    fn count(&self, kind: Tile) -> usize {
        self.cells().filter(|(_, _, tile)| *tile == kind).count()
    }

    /// (col, row, tile) по всем клеткам, построчно
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.tiles.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, tile)| (col, row, *tile))
        })
    }

    /// Центр клетки на заданной высоте
    pub fn cell_center(&self, col: usize, row: usize, y: f32) -> Vec3 {
        Vec3::new(col as f32 * self.cell_size, y, row as f32 * self.cell_size)
    }

    pub fn player_start(&self) -> Option<(usize, usize)> {
        self.cells()
            .find(|(_, _, tile)| *tile == Tile::PlayerStart)
            .map(|(col, row, _)| (col, row))
    }
}

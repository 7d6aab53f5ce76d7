//! Textual level format parser.
//!
//! A level is a whitespace-delimited token stream: grid width and height,
//! the player start position, an enemy count followed by that many
//! coordinate pairs, and finally `width * height` single-character cell
//! codes in row-major order. Whitespace between codes is transparent, so a
//! row may be written as one packed run of characters or spread across
//! lines.

use std::{fs::File, io, io::Read, path::Path};

use thiserror::Error;

use tinyworld_core::{Cell, GridVector, VisualKind};

/// Errors produced while loading a level from a data source.
///
/// Every variant is fatal: there is no partial or degraded level.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The underlying data source could not be opened or read.
    #[error("failed to read level data")]
    Io(#[from] io::Error),
    /// The data ended before the declared content was complete.
    #[error("level data ended while reading {expected}")]
    UnexpectedEnd {
        /// Description of the field being read when the data ran out.
        expected: &'static str,
    },
    /// A header field did not parse as a signed integer.
    #[error("invalid integer {token:?} while reading {expected}")]
    InvalidInteger {
        /// The offending token as it appeared in the data.
        token: String,
        /// Description of the field being read.
        expected: &'static str,
    },
}

/// An in-memory grid world parsed from the textual level format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    width: i32,
    height: i32,
    start: GridVector,
    enemies: Vec<GridVector>,
    cells: Vec<Cell>,
}

impl Level {
    /// Loads a level from the file at the provided path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Loads a level from any readable data source.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, LevelError> {
        let mut source = String::new();
        let _ = reader.read_to_string(&mut source)?;
        Self::parse(&source)
    }

    fn parse(source: &str) -> Result<Self, LevelError> {
        let mut scanner = Scanner::new(source);

        let width = scanner.next_int("level width")?;
        let height = scanner.next_int("level height")?;

        let start = GridVector::new(
            scanner.next_int("player start x")?,
            scanner.next_int("player start y")?,
        );

        let enemy_count = scanner.next_int("enemy count")?;
        let mut enemies = Vec::new();
        for _ in 0..enemy_count {
            enemies.push(GridVector::new(
                scanner.next_int("enemy position x")?,
                scanner.next_int("enemy position y")?,
            ));
        }

        // The loader visits each declared coordinate exactly once, so the
        // arena never holds duplicate positions. Codes outside the table
        // leave their coordinate without a cell; that is policy, not error.
        let mut cells = Vec::new();
        for y in 0..height {
            for x in 0..width {
                let code = scanner.next_code("cell code")?;
                if let Some(kind) = cell_kind_for_code(code) {
                    cells.push(Cell::new(GridVector::new(x, y), kind));
                }
            }
        }

        Ok(Self {
            width,
            height,
            start,
            enemies,
            cells,
        })
    }

    /// Grid width declared by the level header.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height declared by the level header.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Player spawn position.
    #[must_use]
    pub const fn start(&self) -> GridVector {
        self.start
    }

    /// Enemy spawn positions in declaration order.
    #[must_use]
    pub fn enemies(&self) -> &[GridVector] {
        &self.enemies
    }

    /// Cells produced by the loader.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Consumes the level, yielding ownership of its cell arena.
    #[must_use]
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

fn cell_kind_for_code(code: char) -> Option<VisualKind> {
    match code {
        ',' => Some(VisualKind::Grass),
        'X' => Some(VisualKind::Wood),
        '~' => Some(VisualKind::Water),
        _ => None,
    }
}

struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self { rest: source }
    }

    fn next_int(&mut self, expected: &'static str) -> Result<i32, LevelError> {
        self.rest = self.rest.trim_start();
        let end = self
            .rest
            .find(char::is_whitespace)
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(LevelError::UnexpectedEnd { expected });
        }

        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        token.parse().map_err(|_| LevelError::InvalidInteger {
            token: token.to_owned(),
            expected,
        })
    }

    fn next_code(&mut self, expected: &'static str) -> Result<char, LevelError> {
        self.rest = self.rest.trim_start();
        let mut chars = self.rest.chars();
        let code = chars.next().ok_or(LevelError::UnexpectedEnd { expected })?;
        self.rest = chars.as_str();
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_LEVEL: &str = "\
3 2
1 1
2
0 0
2 1
,X~
~,X
";

    #[test]
    fn parses_header_enemies_and_cells() {
        let level = Level::from_reader(SMALL_LEVEL.as_bytes()).expect("level should parse");

        assert_eq!(level.width(), 3);
        assert_eq!(level.height(), 2);
        assert_eq!(level.start(), GridVector::new(1, 1));
        assert_eq!(
            level.enemies(),
            &[GridVector::new(0, 0), GridVector::new(2, 1)]
        );
        assert_eq!(
            level.cells(),
            &[
                Cell::new(GridVector::new(0, 0), VisualKind::Grass),
                Cell::new(GridVector::new(1, 0), VisualKind::Wood),
                Cell::new(GridVector::new(2, 0), VisualKind::Water),
                Cell::new(GridVector::new(0, 1), VisualKind::Water),
                Cell::new(GridVector::new(1, 1), VisualKind::Grass),
                Cell::new(GridVector::new(2, 1), VisualKind::Wood),
            ]
        );
    }

    #[test]
    fn whitespace_between_codes_is_transparent() {
        let packed = Level::from_reader("2 2\n0 0\n0\n,X~,".as_bytes()).expect("packed");
        let spread = Level::from_reader("2 2\n0 0\n0\n, X\n~ ,\n".as_bytes()).expect("spread");

        assert_eq!(packed, spread);
    }

    #[test]
    fn unknown_codes_skip_the_coordinate_without_shifting_later_cells() {
        // The `.` at (2, 3) must not displace any cell that follows it.
        let mut source = String::from("4 4\n0 0\n0\n");
        source.push_str(",,,,\n");
        source.push_str(",,,,\n");
        source.push_str(",,,,\n");
        source.push_str(",,.,\n");
        let level = Level::from_reader(source.as_bytes()).expect("level should parse");

        assert_eq!(level.cells().len(), 15);
        assert!(!level
            .cells()
            .iter()
            .any(|cell| cell.position() == GridVector::new(2, 3)));
        assert!(level
            .cells()
            .iter()
            .any(|cell| cell.position() == GridVector::new(3, 3)
                && cell.kind() == VisualKind::Grass));
    }

    #[test]
    fn reloading_the_same_data_is_structurally_identical() {
        let first = Level::from_reader(SMALL_LEVEL.as_bytes()).expect("first load");
        let second = Level::from_reader(SMALL_LEVEL.as_bytes()).expect("second load");

        assert_eq!(first, second);
    }

    #[test]
    fn truncated_cell_grid_is_fatal() {
        let error = Level::from_reader("2 2\n0 0\n0\n,X~".as_bytes())
            .expect_err("missing final code must fail");

        assert!(matches!(
            error,
            LevelError::UnexpectedEnd {
                expected: "cell code"
            }
        ));
    }

    #[test]
    fn missing_enemy_coordinates_are_fatal() {
        let error =
            Level::from_reader("2 2\n0 0\n1\n".as_bytes()).expect_err("enemy pair must fail");

        assert!(matches!(error, LevelError::UnexpectedEnd { .. }));
    }

    #[test]
    fn non_numeric_header_is_fatal() {
        let error = Level::from_reader("wide 2\n0 0\n0\n".as_bytes())
            .expect_err("alphabetic width must fail");

        match error {
            LevelError::InvalidInteger { token, expected } => {
                assert_eq!(token, "wide");
                assert_eq!(expected, "level width");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negative_enemy_count_declares_no_enemies() {
        let level = Level::from_reader("1 1\n0 0\n-1\n,".as_bytes()).expect("level should parse");

        assert!(level.enemies().is_empty());
    }
}

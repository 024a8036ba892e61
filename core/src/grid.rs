use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub letter: char,
    pub selected: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            letter: ' ',
            selected: false,
        }
    }
}

/// Letter grid. Positions are `(x, y)`, `x` being the column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    /// Builds a grid from rows of letters, top row first.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let size_y: Coord = rows
            .len()
            .try_into()
            .map_err(|_| GameError::InvalidGridShape)?;
        let size_x: Coord = rows
            .first()
            .map_or(0, |row| row.chars().count())
            .try_into()
            .map_err(|_| GameError::InvalidGridShape)?;
        if size_x == 0 || size_y == 0 {
            return Err(GameError::InvalidGridShape);
        }

        let mut grid = Self::new((size_x, size_y));
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != usize::from(size_x) {
                return Err(GameError::InvalidGridShape);
            }
            for (x, letter) in row.chars().enumerate() {
                if !letter.is_ascii_alphabetic() {
                    return Err(GameError::InvalidLetter(letter));
                }
                grid.cells[[x, y]].letter = letter.to_ascii_uppercase();
            }
        }
        Ok(grid)
    }

    pub fn size(&self) -> Coord2 {
        let (size_x, size_y) = self.cells.dim();
        // dimensions always come from a `Coord2`
        (size_x as Coord, size_y as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (size_x, size_y) = self.size();
        mult(size_x, size_y)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn letter_at(&self, coords: Coord2) -> Option<char> {
        self.cell_at(coords).map(|cell| cell.letter)
    }

    pub fn is_selected(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_some_and(|cell| cell.selected)
    }

    /// Marks a cell as selected, returning its letter only when it was not selected before.
    pub fn select(&mut self, coords: Coord2) -> Result<Option<char>> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.selected {
            Ok(None)
        } else {
            cell.selected = true;
            Ok(Some(cell.letter))
        }
    }

    pub fn clear_selection(&mut self) {
        self.cells.iter_mut().for_each(|cell| cell.selected = false);
    }

    pub fn selected_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.selected).count()
    }

    /// Replaces every letter with a fresh draw from `generator` and drops any selection.
    pub fn reshuffle(&mut self, generator: impl LetterGenerator) {
        let letters = generator.generate(self.size());
        for (cell, &letter) in self.cells.iter_mut().zip(letters.iter()) {
            cell.letter = letter;
            cell.selected = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_maps_columns_to_x() {
        let grid = Grid::from_rows(&["cat", "DOG"]).unwrap();

        assert_eq!(grid.size(), (3, 2));
        assert_eq!(grid.letter_at((0, 0)), Some('C'));
        assert_eq!(grid.letter_at((2, 0)), Some('T'));
        assert_eq!(grid.letter_at((1, 1)), Some('O'));
        assert_eq!(grid.letter_at((3, 0)), None);
    }

    #[test]
    fn from_rows_rejects_ragged_rows_and_symbols() {
        assert_eq!(
            Grid::from_rows(&["ABC", "DE"]),
            Err(GameError::InvalidGridShape)
        );
        assert_eq!(Grid::from_rows(&[]), Err(GameError::InvalidGridShape));
        assert_eq!(
            Grid::from_rows(&["A1"]),
            Err(GameError::InvalidLetter('1'))
        );
    }

    #[test]
    fn select_reports_letter_only_once() {
        let mut grid = Grid::from_rows(&["AB"]).unwrap();

        assert_eq!(grid.select((1, 0)), Ok(Some('B')));
        assert_eq!(grid.select((1, 0)), Ok(None));
        assert_eq!(grid.select((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(grid.selected_count(), 1);

        grid.clear_selection();
        assert!(!grid.is_selected((1, 0)));
    }

    #[test]
    fn reshuffle_is_deterministic_and_clears_selection() {
        let mut a = Grid::new((4, 4));
        let mut b = Grid::new((4, 4));
        a.select((0, 0)).unwrap();

        a.reshuffle(RandomLetterGenerator::new(7));
        b.reshuffle(RandomLetterGenerator::new(7));

        assert_eq!(a, b);
        assert_eq!(a.selected_count(), 0);
        for y in 0..4 {
            for x in 0..4 {
                assert!(a.letter_at((x, y)).unwrap().is_ascii_uppercase());
            }
        }
    }
}

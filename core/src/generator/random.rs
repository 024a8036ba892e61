use alloc::vec::Vec;

use super::*;

/// Draws an independent uniform letter for every cell, then shuffles the assignment across the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLetterGenerator {
    seed: u64,
}

impl RandomLetterGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LetterGenerator for RandomLetterGenerator {
    fn generate(self, size: Coord2) -> Array2<char> {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let total_cells = usize::from(mult(size.0, size.1));

        let mut letters: Vec<char> = (0..total_cells)
            .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
            .collect();
        letters.shuffle(&mut rng);
        log::trace!("generated {} letters with seed {}", letters.len(), self.seed);

        let size_y = usize::from(size.1);
        Array2::from_shape_fn(size.to_nd_index(), |(x, y)| letters[x * size_y + y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_every_cell_with_an_uppercase_letter() {
        let letters = RandomLetterGenerator::new(1).generate((6, 3));

        assert_eq!(letters.dim(), (6, 3));
        assert!(letters.iter().all(|letter| letter.is_ascii_uppercase()));
    }

    #[test]
    fn different_seeds_give_different_grids() {
        let a = RandomLetterGenerator::new(1).generate((8, 8));
        let b = RandomLetterGenerator::new(2).generate((8, 8));

        assert_ne!(a, b);
    }
}

use crate::*;
use ndarray::Array2;
pub use random::*;

mod random;

pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub trait LetterGenerator {
    fn generate(self, size: Coord2) -> Array2<char>;
}

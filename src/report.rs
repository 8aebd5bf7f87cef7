//! Rendering of a finished clustering as a color palette.

use crate::{KMeansState, Vector};
use std::fmt;

/// Hex notation of an RGB color, e.g. `0A10FF`. Every component is written as two uppercase digits.
pub fn hex(color: &Vector<u8>) -> String {
    color.coords().iter().map(|c| format!("{:02X}", c)).collect()
}

/// Palette of a finished clustering, ready to be printed.
///
/// ```text
/// Completed in 7 turns
///
/// Color 0: 0A10FF
/// Color 1: E8E8E8
/// ```
#[derive(Clone, Debug)]
pub struct PaletteReport {
    pub iterations: usize,
    pub colors: Vec<Vector<u8>>,
}
impl PaletteReport {
    pub fn new(state: &KMeansState<u8>) -> Self {
        Self { iterations: state.iterations, colors: state.centers() }
    }
}
impl From<&KMeansState<u8>> for PaletteReport {
    fn from(state: &KMeansState<u8>) -> Self { Self::new(state) }
}
impl fmt::Display for PaletteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Completed in {} turns", self.iterations)?;
        writeln!(f)?;
        for (i, color) in self.colors.iter().enumerate() {
            writeln!(f, "Color {}: {}", i, hex(color))?;
        }
        Ok(())
    }
}

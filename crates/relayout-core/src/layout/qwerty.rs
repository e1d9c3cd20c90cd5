// Relayout QWERTY Layout
// Raw codes a US QWERTY keyboard reports for each physical position

use super::Dialect;
use crate::key::CATALOGUE_SIZE;

/// Standard dialect: `-` is 189, `=` is 187, `;` is 186.
pub static STANDARD: [u16; CATALOGUE_SIZE] = [
    192, 49, 50, 51, 52, 53, 54, 55, 56, 57, 48, 189, 187, 8, //
    9, 81, 87, 69, 82, 84, 89, 85, 73, 79, 80, 219, 221, 220, //
    20, 65, 83, 68, 70, 71, 72, 74, 75, 76, 186, 222, 13, //
    16, 90, 88, 67, 86, 66, 78, 77, 188, 190, 191, 16, //
    17, 91, 18, 32, 18, 92, 93, 17,
];

/// Alternate dialect: `-` is 173, `=` is 61, `;` is 59.
pub static ALTERNATE: [u16; CATALOGUE_SIZE] = [
    192, 49, 50, 51, 52, 53, 54, 55, 56, 57, 48, 173, 61, 8, //
    9, 81, 87, 69, 82, 84, 89, 85, 73, 79, 80, 219, 221, 220, //
    20, 65, 83, 68, 70, 71, 72, 74, 75, 76, 59, 222, 13, //
    16, 90, 88, 67, 86, 66, 78, 77, 188, 190, 191, 16, //
    17, 91, 18, 32, 18, 92, 93, 17,
];

pub fn codes(dialect: Dialect) -> &'static [u16; CATALOGUE_SIZE] {
    match dialect {
        Dialect::Standard => &STANDARD,
        Dialect::Alternate => &ALTERNATE,
    }
}

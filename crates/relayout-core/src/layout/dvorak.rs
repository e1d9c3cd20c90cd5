// Relayout Dvorak Layout
// Raw codes a US Dvorak keyboard reports for each physical position

use super::Dialect;
use crate::key::CATALOGUE_SIZE;

pub static STANDARD: [u16; CATALOGUE_SIZE] = [
    192, 49, 50, 51, 52, 53, 54, 55, 56, 57, 48, 219, 221, 8, //
    9, 222, 188, 190, 80, 89, 70, 71, 67, 82, 76, 191, 187, 220, //
    20, 65, 79, 69, 85, 73, 68, 72, 84, 78, 83, 189, 13, //
    16, 186, 81, 74, 75, 88, 66, 77, 87, 86, 90, 16, //
    17, 91, 18, 32, 18, 92, 93, 17,
];

pub static ALTERNATE: [u16; CATALOGUE_SIZE] = [
    192, 49, 50, 51, 52, 53, 54, 55, 56, 57, 48, 219, 221, 8, //
    9, 222, 188, 190, 80, 89, 70, 71, 67, 82, 76, 191, 61, 220, //
    20, 65, 79, 69, 85, 73, 68, 72, 84, 78, 83, 173, 13, //
    16, 59, 81, 74, 75, 88, 66, 77, 87, 86, 90, 16, //
    17, 91, 18, 32, 18, 92, 93, 17,
];

pub fn codes(dialect: Dialect) -> &'static [u16; CATALOGUE_SIZE] {
    match dialect {
        Dialect::Standard => &STANDARD,
        Dialect::Alternate => &ALTERNATE,
    }
}

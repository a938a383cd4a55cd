//! Perceptual brightness correction
//!
//! LED PWM duty is linear in emitted power, the eye is not. The table maps a
//! linear 0-255 brightness onto the CIE 1931 lightness curve so that equal
//! steps in effect space look like equal steps on the device.

/// CIE 1931 correction table
///
/// Monotonic, `GAMMA8[0] == 0` and `GAMMA8[255] == 255`.
pub const GAMMA8: [u8; 256] = [
    0, 0, 0, 0, 0, 1, 1, 1, 1, 1, //
    1, 1, 1, 1, 2, 2, 2, 2, 2, 2, //
    2, 2, 2, 3, 3, 3, 3, 3, 3, 3, //
    3, 4, 4, 4, 4, 4, 4, 5, 5, 5, //
    5, 5, 6, 6, 6, 6, 6, 7, 7, 7, //
    7, 8, 8, 8, 8, 9, 9, 9, 10, 10, //
    10, 10, 11, 11, 11, 12, 12, 12, 13, 13, //
    13, 14, 14, 15, 15, 15, 16, 16, 17, 17, //
    17, 18, 18, 19, 19, 20, 20, 21, 21, 22, //
    22, 23, 23, 24, 24, 25, 25, 26, 26, 27, //
    28, 28, 29, 29, 30, 31, 31, 32, 32, 33, //
    34, 34, 35, 36, 37, 37, 38, 39, 39, 40, //
    41, 42, 43, 43, 44, 45, 46, 47, 47, 48, //
    49, 50, 51, 52, 53, 54, 54, 55, 56, 57, //
    58, 59, 60, 61, 62, 63, 64, 65, 66, 67, //
    68, 70, 71, 72, 73, 74, 75, 76, 77, 79, //
    80, 81, 82, 83, 85, 86, 87, 88, 90, 91, //
    92, 94, 95, 96, 98, 99, 100, 102, 103, 105, //
    106, 108, 109, 110, 112, 113, 115, 116, 118, 120, //
    121, 123, 124, 126, 128, 129, 131, 132, 134, 136, //
    138, 139, 141, 143, 145, 146, 148, 150, 152, 154, //
    155, 157, 159, 161, 163, 165, 167, 169, 171, 173, //
    175, 177, 179, 181, 183, 185, 187, 189, 191, 193, //
    196, 198, 200, 202, 204, 207, 209, 211, 214, 216, //
    218, 220, 223, 225, 228, 230, 232, 235, 237, 240, //
    242, 245, 247, 250, 252, 255,
];

/// Correct a single linear channel value
#[inline]
pub const fn correct(linear: u8) -> u8 {
    GAMMA8[linear as usize]
}

/// Correct every channel of a color
#[inline]
pub const fn correct_rgb(color: crate::Rgb) -> crate::Rgb {
    crate::Rgb {
        r: correct(color.r),
        g: correct(color.g),
        b: correct(color.b),
    }
}

/// Sum of corrected channel values, i.e. the relative power drawn by a color
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn output_of(color: crate::Rgb) -> u16 {
    correct(color.r) as u16 + correct(color.g) as u16 + correct(color.b) as u16
}

/// Scale an 8-bit value by a factor (0-255 = 0.0-1.0)
///
/// Uses integer math for efficiency on embedded systems.
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * (1 + scale as u16)) >> 8) as u8
}

/// Linear interpolation between two 8-bit values
///
/// Returns `start` at `elapsed == 0` and `target` once `elapsed` reaches
/// `duration`. A zero duration snaps straight to `target`.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn lerp8(start: u8, target: u8, elapsed: u64, duration: u64) -> u8 {
    if elapsed >= duration {
        return target;
    }
    let delta = target as i64 - start as i64;
    let offset = delta * elapsed as i64 / duration as i64;
    (start as i64 + offset) as u8
}

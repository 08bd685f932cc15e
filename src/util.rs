//! Small stateless helpers for byte order, grid coordinates, and filenames.

/// Returns whether the host stores integers little endian.
#[inline]
#[must_use]
pub const fn is_little_endian() -> bool {
    cfg!(target_endian = "little")
}

/// Reverses the byte order of a 16-bit value.
#[inline]
#[must_use]
pub const fn byteswap16(value: u16) -> u16 {
    value.swap_bytes()
}

/// Converts a coordinate into an index of a row-major grid `width` cells wide.
#[inline]
#[must_use]
pub const fn index_from_coords(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}

/// Converts an index of a row-major grid `width` cells wide into a coordinate.
///
/// # Panics
/// Panics if `width` is zero.
#[inline]
#[must_use]
pub const fn coords_from_index(index: usize, width: usize) -> (usize, usize) {
    (index % width, index / width)
}

/// Strips every leading directory from a path.
///
/// Both `/` and `\` count as separators, no matter the host.
#[must_use]
pub fn strip_path(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Strips a trailing extension from a filename.
///
/// The filename is returned unchanged if it doesn't end with `extension`.
#[must_use]
pub fn strip_extension<'a>(filename: &'a str, extension: &str) -> &'a str {
    filename.strip_suffix(extension).unwrap_or(filename)
}

/// Strips both the path and the given extension from a path.
#[must_use]
pub fn base_filename<'a>(path: &'a str, extension: &str) -> &'a str {
    strip_extension(strip_path(path), extension)
}

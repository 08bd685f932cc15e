use crate::{FieldError, ReadError};
use byteorder::ReadBytesExt;
use std::io;
use std::io::Read;

pub(crate) fn read_short_string(mut r: impl Read) -> io::Result<Vec<u8>> {
    let length = r.read_u8()? as usize;
    let mut bytes = vec![0u8; length];
    // Read that many bytes into the vector
    r.read_exact(bytes.as_mut_slice())?;
    Ok(bytes)
}

/// Reads a short string, failing if it is longer than `max` bytes.
pub(crate) fn read_bounded(
    r: impl Read,
    field: impl Into<String>,
    max: usize,
) -> Result<Vec<u8>, ReadError> {
    let bytes = read_short_string(r)?;
    FieldError::check_len(field, &bytes, max)?;
    Ok(bytes)
}

pub(crate) fn read_magic<const N: usize>(mut r: impl Read, magic: &[u8; N]) -> io::Result<bool> {
    let mut buf = [0; N];
    r.read_exact(&mut buf)?;
    Ok(&buf == magic)
}

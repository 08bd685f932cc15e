use byteorder::WriteBytesExt;
use std::io;
use std::io::Write;

pub(crate) fn write_short_string(mut w: impl Write, bytes: &[u8]) -> io::Result<()> {
    let Ok(len) = u8::try_from(bytes.len()) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "string size was too large to fit in a length byte",
        ));
    };
    w.write_u8(len)?;
    w.write_all(bytes)
}

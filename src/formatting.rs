use crate::util::coords_from_index;
use crate::{Entity, EntityList, PxPack, TileLayer};
use fmt::Debug;
use std::fmt;
use std::fmt::{Formatter, Write};

/// Wraps raw bytes so they print as an escaped string.
struct Escaped<'a>(&'a [u8]);

impl Debug for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('"')?;
        for byte in self.0.iter().copied().flat_map(std::ascii::escape_default) {
            f.write_char(byte as char)?;
        }
        f.write_char('"')
    }
}

impl Debug for TileLayer {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "TileLayer {{")?;
            let mut buf = String::new();
            write!(buf, "tiles: [")?;
            // Write data
            let w = self.width as usize;
            let h = self.height as usize;
            if w == 0 || h == 0 {
                writeln!(buf, "],")?;
            } else {
                for (i, tile) in self.tiles.iter().enumerate() {
                    let (x, y) = coords_from_index(i, w);
                    if x != 0 {
                        write!(buf, ", ")?;
                    } else if y != 0 {
                        write!(buf, ",")?;
                    }
                    if x == 0 {
                        // Write newline and padding
                        write!(buf, "\n    ")?;
                    }
                    // Write cell
                    write!(buf, "0x{tile:02X}")?;
                }
                writeln!(buf, "\n],")?;
            }
            writeln!(buf, "width: {:?},", self.width)?;
            writeln!(buf, "height: {:?},", self.height)?;
            writeln!(buf, "flag: {:?},", self.flag)?;
            // Pad lines
            for line in buf.lines() {
                writeln!(f, "    {line}")?;
            }
            write!(f, "}}")
        } else {
            write!(
                f,
                "TileLayer {{ tiles: {:02X?}, width: {:?}, height: {:?}, flag: {:?} }}",
                self.tiles, self.width, self.height, self.flag
            )
        }
    }
}

impl Debug for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("flag", &self.flag)
            .field("kind", &self.kind)
            .field("unknown_byte", &self.unknown_byte)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("data", &format_args!("{:02X?}", self.data))
            .field("name", &Escaped(&self.name))
            .finish()
    }
}

impl Debug for EntityList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Debug for PxPack {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "PxPack {{")?;
        let mut buf = String::new();
        writeln!(buf, "filename: {:?},", self.filename)?;
        writeln!(buf, "original_filename: {:?},", self.original_filename)?;
        writeln!(buf, "description: {:?},", Escaped(&self.description))?;
        writeln!(buf, "script_name: {:?},", Escaped(&self.script_name))?;
        writeln!(buf, "map_names: {:?},", self.map_names.each_ref().map(|n| Escaped(n)))?;
        writeln!(buf, "spritesheet_name: {:?},", Escaped(&self.spritesheet_name))?;
        writeln!(buf, "reserved: {:02X?},", self.reserved)?;
        writeln!(buf, "tileset_names: {:?},", self.tileset_names.each_ref().map(|n| Escaped(n)))?;
        writeln!(buf, "tileset_reserved: {:02X?},", self.tileset_reserved)?;
        writeln!(buf, "tile_layers: {:#?},", self.tile_layers)?;
        writeln!(buf, "entities: {:#?}", self.entities)?;
        // Pad lines
        for line in buf.lines() {
            writeln!(f, "    {line}")?;
        }
        write!(f, "}}")
    }
}

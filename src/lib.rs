#![warn(missing_docs)]
#![warn(clippy::pedantic, clippy::perf)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::module_name_repetitions
)]

/*!
Simple library to handle the PXPACK map files of Pixel's Kero Blaster engine.

```rust
# use std::io::Cursor; use pxpack::{Entity, PxPack};
# fn main() -> Result<(), Box<dyn std::error::Error>> {
#
# struct TrashWriter;
# impl std::io::Write for TrashWriter {
#   fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {Ok(buf.len())}
#   fn flush(&mut self) -> std::io::Result<()> {Ok(())}
# }
# let mut empty = Vec::new();
# PxPack::new().write(&mut empty)?;
#
let mut map = PxPack::read(
    /* .. */
    # Cursor::new(empty)
)?;

map.set_script_name("scripts/f_Town.pxeve")?;
for layer in &mut map.tile_layers {
    layer.set_dimensions(8, 8);
    layer.set_tile(3, 2, 0x1F)?;
}
let mut frog = Entity::new();
frog.set_name("kero")?;
map.entities.push(frog)?;

map.write(
    /* .. */
    # TrashWriter
)?;
#
# Ok(())
# }
```

Maps on disk are opened through a [`Config`] naming the game's folders:
a missing map is created empty on first open, and [`PxPack::save`] moves
the file when the map was renamed.
 */

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Read, Write};
use std::path::Path;

mod config;
mod entity;
mod error;
mod formatting;
mod layer;
mod read_helper;
pub mod util;
mod write_helper;

pub use config::Config;
pub use entity::{Entity, EntityList};
pub use error::{Error, FieldError, ReadError};
pub use layer::TileLayer;

/// Name of the folder, inside the resource folder, holding every PXPACK file.
pub const FOLDER_NAME: &str = "field";
/// Extension of PXPACK files.
pub const FILE_EXTENSION: &str = ".pxpack";
/// Extension of the scripts a map refers to.
pub const SCRIPT_EXTENSION: &str = ".pxeve";
/// Extension of the spritesheets and tilesets a map refers to.
pub const IMAGE_EXTENSION: &str = ".png";
/// Magic string at the start of every PXPACK file, terminator included.
pub const HEADER: &[u8; 16] = b"PXPACK121127a**\0";
/// Magic string at the start of every tile layer, terminator included.
pub const LAYER_HEADER: &[u8; 8] = b"pxMAP01\0";
/// Maximum length of any filename in the resource folder, without extension.
pub const FILENAME_MAX_LEN: usize = 15;
/// Maximum length of a map's description, in bytes.
pub const DESCRIPTION_MAX_LEN: usize = 31;
/// Number of maps referenced in the head of a PXPACK file.
pub const NUM_REFERENCED_MAPS: usize = 3;
/// Number of tilesets referenced in the head of a PXPACK file.
pub const NUM_REFERENCED_TILESETS: usize = 3;
/// Number of tile layers in a PXPACK file.
pub const NUM_LAYERS: usize = 3;
/// Maximum number of entities a PXPACK file can store.
pub const MAX_NUM_ENTITIES: usize = u16::MAX as usize;
/// Number of bytes of unknown purpose following an entity's position.
pub const NUM_UNKNOWN_ENTITY_BYTES: usize = 2;
/// Number of bytes of unknown purpose following the spritesheet name.
pub const NUM_RESERVED_HEAD_BYTES: usize = 8;
/// Number of bytes of unknown purpose following each tileset name.
pub const NUM_RESERVED_TILESET_BYTES: usize = 2;

/// A representation of a PXPACK map.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct PxPack {
    filename: String,
    original_filename: String,
    description: Vec<u8>,
    script_name: Vec<u8>,
    map_names: [Vec<u8>; NUM_REFERENCED_MAPS],
    spritesheet_name: Vec<u8>,
    tileset_names: [Vec<u8>; NUM_REFERENCED_TILESETS],
    /// Bytes following the spritesheet name. Their purpose is unknown.
    pub reserved: [u8; NUM_RESERVED_HEAD_BYTES],
    /// Bytes following each tileset name. Their purpose is unknown.
    pub tileset_reserved: [[u8; NUM_RESERVED_TILESET_BYTES]; NUM_REFERENCED_TILESETS],
    /// The tile layers of the map.
    pub tile_layers: [TileLayer; NUM_LAYERS],
    /// The entities placed on the map.
    pub entities: EntityList,
}

impl PxPack {
    /// Constructs a new, empty map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a map from the game's field folder.
    ///
    /// This is the same as calling [`PxPack::load_map`] on an empty map.
    ///
    /// # Errors
    /// See [`PxPack::load_map`].
    pub fn open(filename: &str, config: &Config) -> Result<Self, Error> {
        let mut map = Self::new();
        map.load_map(filename, config)?;
        Ok(map)
    }

    /// Load a map from the game's field folder, replacing this one.
    ///
    /// `filename` may carry a path and the `.pxpack` extension; both are stripped.
    /// If the file doesn't exist, an empty map is written there first.
    ///
    /// # Errors
    /// - [`Error::Field`] if the base filename is too long.
    /// - [`Error::Open`] or [`Error::Write`] if the file couldn't be opened or created.
    ///   The map is left unchanged.
    /// - [`Error::Read`] if the file couldn't be parsed. The map is reset to empty.
    pub fn load_map(&mut self, filename: &str, config: &Config) -> Result<(), Error> {
        let filename = util::base_filename(filename, FILE_EXTENSION);
        FieldError::check_len("filename", filename.as_bytes(), FILENAME_MAX_LEN)?;
        let path = config.pxpack_path(filename);
        if !path.exists() {
            create_dummy(&path)?;
        }
        debug!("parsing PXPACK file {}", path.display());
        let file = File::open(&path).map_err(|source| Error::Open {
            path: path.clone(),
            source,
        })?;
        match Self::read(BufReader::new(file)) {
            Ok(mut map) => {
                filename.clone_into(&mut map.filename);
                filename.clone_into(&mut map.original_filename);
                *self = map;
                Ok(())
            }
            Err(source) => {
                // Never leave a half-loaded map behind
                warn!("resetting map after failing to parse {}: {source}", path.display());
                self.reset();
                Err(Error::Read { path, source })
            }
        }
    }

    /// Save the map to the game's field folder under its current filename.
    ///
    /// If the map was renamed since it was loaded, the file under the old name is removed.
    /// The map is written to a temporary file first, so the old contents survive a failed save.
    ///
    /// # Errors
    /// - [`Error::Unnamed`] if the map has no filename.
    /// - [`Error::Exists`] if the map was renamed onto a file that already exists.
    /// - [`Error::Open`] if the temporary file couldn't be created.
    /// - [`Error::Write`] if writing failed, or the old file couldn't be removed.
    pub fn save(&mut self, config: &Config) -> Result<(), Error> {
        if self.filename.is_empty() {
            return Err(Error::Unnamed);
        }
        let path = config.pxpack_path(&self.filename);
        if self.filename != self.original_filename && path.exists() {
            // Belongs to another map
            return Err(Error::Exists(path));
        }
        let mut buf = Cursor::new(Vec::new());
        self.write(&mut buf)
            .map_err(|source| Error::Write { path: path.clone(), source })?;
        write_file(&path, buf.get_ref())?;
        info!("saved PXPACK file {}", path.display());
        if !self.original_filename.is_empty() && self.original_filename != self.filename {
            let old_path = config.pxpack_path(&self.original_filename);
            match fs::remove_file(&old_path) {
                Ok(()) => info!("removed {} after renaming", old_path.display()),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(Error::Write {
                        path: old_path,
                        source,
                    })
                }
            }
        }
        self.original_filename.clone_from(&self.filename);
        Ok(())
    }

    /// Attempt to read a map from a readable.
    ///
    /// The returned map has no filename.
    ///
    /// # Errors
    /// Errors if the data is cut short or malformed.
    pub fn read(mut cursor: impl Read) -> Result<Self, ReadError> {
        // Read the magic string, see if it matches
        if !read_helper::read_magic(&mut cursor, HEADER)? {
            return Err(ReadError::InvalidMagic);
        }
        let mut map = PxPack::default();
        // Names are kept exactly as stored, only their length is checked
        map.description =
            read_helper::read_bounded(&mut cursor, "description", DESCRIPTION_MAX_LEN)?;
        map.script_name = read_helper::read_bounded(&mut cursor, "script name", FILENAME_MAX_LEN)?;
        for (i, name) in map.map_names.iter_mut().enumerate() {
            let field = format!("map name {}", i + 1);
            *name = read_helper::read_bounded(&mut cursor, field, FILENAME_MAX_LEN)?;
        }
        map.spritesheet_name =
            read_helper::read_bounded(&mut cursor, "spritesheet name", FILENAME_MAX_LEN)?;
        cursor.read_exact(&mut map.reserved)?;
        for (i, (name, reserved)) in map
            .tileset_names
            .iter_mut()
            .zip(&mut map.tileset_reserved)
            .enumerate()
        {
            let field = format!("tileset name {}", i + 1);
            *name = read_helper::read_bounded(&mut cursor, field, FILENAME_MAX_LEN)?;
            cursor.read_exact(reserved)?;
        }

        for (i, layer) in map.tile_layers.iter_mut().enumerate() {
            // Every layer has a header, even empty ones
            if !read_helper::read_magic(&mut cursor, LAYER_HEADER)? {
                return Err(ReadError::InvalidLayerMagic(i));
            }
            let (width, height) = (
                cursor.read_u16::<LittleEndian>()?,
                cursor.read_u16::<LittleEndian>()?,
            );
            layer.set_dimensions(width, height);
            if layer.area() > 0 {
                layer.flag = cursor.read_u8()?;
                // Tiles are stored row by row, just like in memory
                cursor.read_exact(&mut layer.tiles)?;
            }
        }

        let count = cursor.read_u16::<LittleEndian>()?;
        for _ in 0..count {
            let mut entity = Entity {
                flag: cursor.read_u8()?,
                kind: cursor.read_u8()?,
                unknown_byte: cursor.read_u8()?,
                x: cursor.read_u16::<LittleEndian>()?,
                y: cursor.read_u16::<LittleEndian>()?,
                ..Entity::default()
            };
            cursor.read_exact(&mut entity.data)?;
            entity.name =
                read_helper::read_bounded(&mut cursor, "entity name", Entity::NAME_MAX_LEN)?;
            map.entities.push(entity)?;
        }
        Ok(map)
    }

    /// Attempts to write a map to a writable.
    ///
    /// # Errors
    /// The data failed to be written.
    pub fn write(&self, mut cursor: impl Write) -> Result<(), io::Error> {
        cursor.write_all(HEADER)?;
        write_helper::write_short_string(&mut cursor, &self.description)?;
        write_helper::write_short_string(&mut cursor, &self.script_name)?;
        for name in &self.map_names {
            write_helper::write_short_string(&mut cursor, name)?;
        }
        write_helper::write_short_string(&mut cursor, &self.spritesheet_name)?;
        cursor.write_all(&self.reserved)?;
        for (name, reserved) in self.tileset_names.iter().zip(&self.tileset_reserved) {
            write_helper::write_short_string(&mut cursor, name)?;
            cursor.write_all(reserved)?;
        }

        for layer in &self.tile_layers {
            cursor.write_all(LAYER_HEADER)?;
            cursor.write_u16::<LittleEndian>(layer.width)?;
            cursor.write_u16::<LittleEndian>(layer.height)?;
            if layer.area() == 0 {
                // Empty layers have no flag or tiles
                continue;
            }
            cursor.write_u8(layer.flag)?;
            cursor.write_all(&layer.tiles)?;
        }

        // The entity list can never hold more than u16::MAX entities
        cursor.write_u16::<LittleEndian>(self.entities.len() as u16)?;
        for entity in &self.entities {
            cursor.write_u8(entity.flag)?;
            cursor.write_u8(entity.kind)?;
            cursor.write_u8(entity.unknown_byte)?;
            cursor.write_u16::<LittleEndian>(entity.x)?;
            cursor.write_u16::<LittleEndian>(entity.y)?;
            cursor.write_all(&entity.data)?;
            write_helper::write_short_string(&mut cursor, &entity.name)?;
        }
        Ok(())
    }

    /// Clears every field of the map, including its filename.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the base filename of the map.
    #[inline]
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the base filename the map was loaded from.
    #[inline]
    #[must_use]
    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }

    /// Returns the raw description of the map.
    ///
    /// The game stores it as Shift-JIS; it is not decoded here.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &[u8] {
        &self.description
    }

    /// Returns the base filename of the map's script.
    ///
    /// Names are raw bytes, exactly as stored in the file.
    #[inline]
    #[must_use]
    pub fn script_name(&self) -> &[u8] {
        &self.script_name
    }

    /// Returns the base filenames of the maps this one refers to.
    #[inline]
    #[must_use]
    pub fn map_names(&self) -> &[Vec<u8>; NUM_REFERENCED_MAPS] {
        &self.map_names
    }

    /// Returns the base filename of the map's spritesheet.
    #[inline]
    #[must_use]
    pub fn spritesheet_name(&self) -> &[u8] {
        &self.spritesheet_name
    }

    /// Returns the base filenames of the map's tilesets.
    #[inline]
    #[must_use]
    pub fn tileset_names(&self) -> &[Vec<u8>; NUM_REFERENCED_TILESETS] {
        &self.tileset_names
    }

    /// Rename the map. The file is moved on the next [`PxPack::save`].
    ///
    /// # Errors
    /// Errors if the base filename is longer than [`FILENAME_MAX_LEN`].
    pub fn set_filename(&mut self, filename: &str) -> Result<(), FieldError> {
        let name = checked_base_filename("filename", filename, FILE_EXTENSION)?;
        name.clone_into(&mut self.filename);
        Ok(())
    }

    /// Set the raw description of the map.
    ///
    /// # Errors
    /// Errors if the description is longer than [`DESCRIPTION_MAX_LEN`] bytes.
    pub fn set_description(&mut self, description: &[u8]) -> Result<(), FieldError> {
        FieldError::check_len("description", description, DESCRIPTION_MAX_LEN)?;
        description.clone_into(&mut self.description);
        Ok(())
    }

    /// Set the script of the map. Any path and `.pxeve` extension is stripped.
    ///
    /// # Errors
    /// Errors if the base filename is longer than [`FILENAME_MAX_LEN`].
    pub fn set_script_name(&mut self, script_name: &str) -> Result<(), FieldError> {
        let name = checked_base_filename("script name", script_name, SCRIPT_EXTENSION)?;
        name.as_bytes().clone_into(&mut self.script_name);
        Ok(())
    }

    /// Set one of the maps this one refers to. Any path and `.pxpack` extension is stripped.
    ///
    /// # Errors
    /// Errors if `index` is out of bounds, or the base filename is longer than [`FILENAME_MAX_LEN`].
    pub fn set_map_name(&mut self, index: usize, map_name: &str) -> Result<(), FieldError> {
        FieldError::check_index("map names", index, NUM_REFERENCED_MAPS)?;
        let field = format!("map name {}", index + 1);
        let name = checked_base_filename(field, map_name, FILE_EXTENSION)?;
        name.as_bytes().clone_into(&mut self.map_names[index]);
        Ok(())
    }

    /// Set the spritesheet of the map. Any path and `.png` extension is stripped.
    ///
    /// # Errors
    /// Errors if the base filename is longer than [`FILENAME_MAX_LEN`].
    pub fn set_spritesheet_name(&mut self, spritesheet_name: &str) -> Result<(), FieldError> {
        let name = checked_base_filename("spritesheet name", spritesheet_name, IMAGE_EXTENSION)?;
        name.as_bytes().clone_into(&mut self.spritesheet_name);
        Ok(())
    }

    /// Set one of the map's tilesets. Any path and `.png` extension is stripped.
    ///
    /// # Errors
    /// Errors if `index` is out of bounds, or the base filename is longer than [`FILENAME_MAX_LEN`].
    pub fn set_tileset_name(&mut self, index: usize, tileset_name: &str) -> Result<(), FieldError> {
        FieldError::check_index("tileset names", index, NUM_REFERENCED_TILESETS)?;
        let field = format!("tileset name {}", index + 1);
        let name = checked_base_filename(field, tileset_name, IMAGE_EXTENSION)?;
        name.as_bytes().clone_into(&mut self.tileset_names[index]);
        Ok(())
    }
}

/// Strips `path` down to its base filename, checking that it fits.
fn checked_base_filename<'a>(
    field: impl Into<String>,
    path: &'a str,
    extension: &str,
) -> Result<&'a str, FieldError> {
    let name = util::base_filename(path, extension);
    FieldError::check_len(field, name.as_bytes(), FILENAME_MAX_LEN)?;
    Ok(name)
}

/// Writes an empty map to `path`.
fn create_dummy(path: &Path) -> Result<(), Error> {
    debug!("creating empty PXPACK file {}", path.display());
    let mut buf = Cursor::new(Vec::new());
    PxPack::default()
        .write(&mut buf)
        .map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;
    write_file(path, buf.get_ref())
}

/// Writes `bytes` to a temporary file next to `path`, then moves it into place.
///
/// `path` is never left partially written.
fn write_file(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let temp_path = path.with_extension("pxpack.tmp");
    let mut file = File::create(&temp_path).map_err(|source| Error::Open {
        path: temp_path.clone(),
        source,
    })?;
    let written = file.write_all(bytes).and_then(|()| file.sync_all());
    drop(file);
    if let Err(source) = written.and_then(|()| fs::rename(&temp_path, path)) {
        // The write already failed, so a failed cleanup changes nothing
        let _ = fs::remove_file(&temp_path);
        return Err(Error::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

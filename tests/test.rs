use const_str::concat_bytes;
use pxpack::PxPack;
use std::io::Cursor;

const FILE: &[u8] = concat_bytes!(
    b"PXPACK121127a**\0", // Magic string
    4, b"Town", // Description
    6, b"f_Town", // Script
    6, b"f_Cave", 0, 5, b"f_Sky", // Referenced maps
    5, b"chara", // Spritesheet
    [1_u8, 2, 3, 4, 5, 6, 7, 8], // Reserved
    5, b"mpt00", 0x10, 0x20, // Tilesets
    5, b"mpt01", 0x00, 0x00,
    0, 0xAA, 0xBB,
    b"pxMAP01\0", // Layer 1
        3_u16.to_le_bytes(), 2_u16.to_le_bytes(), // Dimensions
        0x07, // Flag
        [1_u8, 2, 3, 4, 5, 6], // Tiles
    b"pxMAP01\0", // Layer 2
        0_u16.to_le_bytes(), 0_u16.to_le_bytes(), // Empty, so no flag or tiles
    b"pxMAP01\0", // Layer 3
        2_u16.to_le_bytes(), 0_u16.to_le_bytes(), // Zero area, so no flag or tiles
    2_u16.to_le_bytes(), // Number of entities
        0x01, 0x23, 0x00, // Flag, type, unknown
        300_u16.to_le_bytes(), 4_u16.to_le_bytes(), // Position
        [0xDE_u8, 0xAD], // Data
        4, b"kero", // Name
        0x00, 0x05, 0x09,
        0x0102_u16.to_le_bytes(), 0_u16.to_le_bytes(),
        [0_u8, 0],
        0
);

#[test]
fn round_trip_test() -> Result<(), Box<dyn std::error::Error>> {
    let file = Cursor::new(FILE);
    let map = PxPack::read(file)?;
    let mut buf = Cursor::new(Vec::new());
    map.write(&mut buf)?;
    assert_eq!(buf.get_ref().as_slice(), FILE, "Written bytes differ!");
    buf.set_position(0);
    let same_map = PxPack::read(buf)?;
    assert_eq!(map, same_map, "Round-trip test failed!");
    Ok(())
}

#[test]
fn read_fields() -> Result<(), Box<dyn std::error::Error>> {
    let map = PxPack::read(FILE)?;
    assert_eq!(map.filename(), "");
    assert_eq!(map.description(), b"Town");
    assert_eq!(map.script_name(), b"f_Town");
    assert_eq!(map.map_names(), &[b"f_Cave".to_vec(), Vec::new(), b"f_Sky".to_vec()]);
    assert_eq!(map.spritesheet_name(), b"chara");
    assert_eq!(map.reserved, [1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(map.tileset_names(), &[b"mpt00".to_vec(), b"mpt01".to_vec(), Vec::new()]);
    assert_eq!(map.tileset_reserved, [[0x10, 0x20], [0, 0], [0xAA, 0xBB]]);

    let layer = &map.tile_layers[0];
    assert_eq!((layer.width(), layer.height(), layer.flag), (3, 2, 7));
    assert_eq!(layer.tiles(), &[1, 2, 3, 4, 5, 6]);
    assert_eq!(layer[(0, 1)], 4);
    assert_eq!(layer.get((2, 1)), Some(6));
    assert_eq!(map.tile_layers[1].area(), 0);
    assert_eq!(map.tile_layers[2].width(), 2);
    assert!(map.tile_layers[2].tiles().is_empty());

    assert_eq!(map.entities.len(), 2);
    let kero = &map.entities[0];
    assert_eq!((kero.flag, kero.kind, kero.unknown_byte), (1, 0x23, 0));
    assert_eq!((kero.x, kero.y), (300, 4));
    assert_eq!(kero.data, [0xDE, 0xAD]);
    assert_eq!(kero.name(), b"kero");
    let other = &map.entities[1];
    assert_eq!((other.x, other.unknown_byte), (0x0102, 9));
    assert_eq!(other.name(), b"");
    Ok(())
}

#[test]
fn modified_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let mut map = PxPack::read(FILE)?;
    map.set_description(&[0x83, 0x4C, 0x83, 0x8D])?; // Shift-JIS passes through untouched
    map.tile_layers[1].set_dimensions(2, 2);
    map.tile_layers[1].flag = 1;
    map.tile_layers[1].set_tile(1, 1, 0xFF)?;
    map.entities.remove(0);
    map.entities[0].set_name("toad")?;

    let mut buf = Vec::new();
    map.write(&mut buf)?;
    let same_map = PxPack::read(buf.as_slice())?;
    assert_eq!(map, same_map);
    assert_eq!(same_map.description(), &[0x83, 0x4C, 0x83, 0x8D]);
    assert_eq!(same_map.tile_layers[1].tiles(), &[0, 0, 0, 0xFF]);
    assert_eq!(same_map.entities.len(), 1);
    assert_eq!(same_map.entities[0].name(), b"toad");
    Ok(())
}

#[test]
fn empty_map() -> Result<(), Box<dyn std::error::Error>> {
    const EMPTY: &[u8] = concat_bytes!(
        b"PXPACK121127a**\0",
        0, 0, 0, 0, 0, 0, // Description, script, maps, spritesheet
        [0_u8; 8],
        0, 0, 0, 0, 0, 0, 0, 0, 0, // Tilesets
        b"pxMAP01\0", [0_u8; 4],
        b"pxMAP01\0", [0_u8; 4],
        b"pxMAP01\0", [0_u8; 4],
        0_u16.to_le_bytes()
    );
    let mut buf = Vec::new();
    PxPack::new().write(&mut buf)?;
    assert_eq!(buf.as_slice(), EMPTY);
    assert_eq!(PxPack::read(EMPTY)?, PxPack::new());
    Ok(())
}

#[test]
fn raw_names_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    const RAW_NAMES: &[u8] = concat_bytes!(
        b"PXPACK121127a**\0",
        0, // Description
        9, b"a.pxeve/b", // Script, kept as stored
        0, 0, 0, // Referenced maps
        10, b"dir\\chara", // Spritesheet
        [0_u8; 8],
        4, [0x83_u8, 0x4C, 0x83, 0x8D], 0, 0, // Tilesets
        0, 0, 0,
        0, 0, 0,
        b"pxMAP01\0", [0_u8; 4],
        b"pxMAP01\0", [0_u8; 4],
        b"pxMAP01\0", [0_u8; 4],
        2_u16.to_le_bytes(),
            0, 0, 0, [0_u8; 4], [0_u8; 2],
            4, [0x83_u8, 0x4C, 0x83, 0x8D], // Shift-JIS name
            0, 0, 0, [0_u8; 4], [0_u8; 2],
            6, [0xFF_u8; 6] // Not valid in any encoding
    );
    let map = PxPack::read(RAW_NAMES)?;
    assert_eq!(map.script_name(), b"a.pxeve/b");
    assert_eq!(map.spritesheet_name(), b"dir\\chara");
    assert_eq!(map.tileset_names()[0], [0x83_u8, 0x4C, 0x83, 0x8D]);
    assert_eq!(map.entities[0].name(), &[0x83_u8, 0x4C, 0x83, 0x8D]);
    assert_eq!(map.entities[1].name(), &[0xFF_u8; 6]);

    let mut buf = Vec::new();
    map.write(&mut buf)?;
    assert_eq!(buf.as_slice(), RAW_NAMES, "Written bytes differ!");
    Ok(())
}

use pxpack::{Entity, EntityList, FieldError, PxPack, MAX_NUM_ENTITIES};

#[test]
fn filenames_are_normalized() {
    let mut map = PxPack::new();
    map.set_script_name("C:\\data\\foo.pxeve").expect("name fits");
    assert_eq!(map.script_name(), b"foo");
    map.set_tileset_name(0, "bar.png").expect("name fits");
    assert_eq!(map.tileset_names()[0], b"bar");
    map.set_map_name(2, "rsc_k/field/f_Cave.pxpack").expect("name fits");
    assert_eq!(map.map_names()[2], b"f_Cave");
    map.set_spritesheet_name("mixed/path\\chara.png").expect("name fits");
    assert_eq!(map.spritesheet_name(), b"chara");
    map.set_filename("f_Town.pxpack").expect("name fits");
    assert_eq!(map.filename(), "f_Town");
    // Only the field's own extension gets stripped
    map.set_spritesheet_name("chara.bmp").expect("name fits");
    assert_eq!(map.spritesheet_name(), b"chara.bmp");
    map.set_script_name("script.png").expect("name fits");
    assert_eq!(map.script_name(), b"script.png");
}

#[test]
fn long_names_are_rejected() {
    let mut map = PxPack::new();
    map.set_script_name("old").expect("name fits");
    // Length is checked after stripping
    map.set_script_name("some/long/path/fifteen_letters.pxeve")
        .expect("base name is exactly 15 bytes");
    assert_eq!(map.script_name(), b"fifteen_letters");
    let err = map.set_script_name("sixteen_letters!").unwrap_err();
    assert_eq!(
        err,
        FieldError::TooLong {
            field: "script name".into(),
            max: 15,
            actual: 16
        }
    );
    assert_eq!(map.script_name(), b"fifteen_letters");

    map.set_tileset_name(1, "mpt00").expect("name fits");
    map.set_tileset_name(1, "sixteen_letters!.png").unwrap_err();
    assert_eq!(map.tileset_names()[1], b"mpt00");
    map.set_map_name(0, "sixteen_letters!").unwrap_err();
    map.set_spritesheet_name("sixteen_letters!").unwrap_err();
    map.set_filename("sixteen_letters!").unwrap_err();
    assert_eq!(map.filename(), "");

    map.set_description(&[b'a'; 31]).expect("description fits");
    map.set_description(&[b'b'; 32]).unwrap_err();
    assert_eq!(map.description(), &[b'a'; 31]);
}

#[test]
fn bad_indices_are_rejected() {
    let mut map = PxPack::new();
    assert!(matches!(
        map.set_map_name(3, "f_Town").unwrap_err(),
        FieldError::OutOfBounds { index: 3, len: 3, .. }
    ));
    assert!(matches!(
        map.set_tileset_name(7, "mpt00").unwrap_err(),
        FieldError::OutOfBounds { index: 7, len: 3, .. }
    ));

    let mut entity = Entity::new();
    entity.set_data(1, 0x42).expect("index is in range");
    assert!(entity.set_data(2, 0x42).is_err());
    assert_eq!(entity.data, [0, 0x42]);
}

#[test]
fn entity_fields() {
    let mut entity = Entity::new();
    entity.set_name("fifteen_letters").expect("name fits");
    let err = entity.set_name("sixteen_letters!").unwrap_err();
    assert!(matches!(err, FieldError::TooLong { max: 15, actual: 16, .. }));
    assert_eq!(entity.name(), b"fifteen_letters");

    entity.flag = 1;
    entity.kind = 2;
    entity.unknown_byte = 3;
    entity.x = 400;
    entity.y = 500;
    entity.reset();
    assert_eq!(entity, Entity::new());
    assert_eq!(entity.name(), b"");
}

#[test]
fn entity_cap() {
    let mut entities = EntityList::new();
    for i in 0..MAX_NUM_ENTITIES {
        let mut entity = Entity::new();
        entity.x = i as u16;
        entities.push(entity).expect("list is not full yet");
    }
    assert_eq!(entities.push(Entity::new()), Err(FieldError::TooManyEntities));
    assert_eq!(entities.insert(0, Entity::new()), Err(FieldError::TooManyEntities));
    assert_eq!(entities.len(), MAX_NUM_ENTITIES);
    assert_eq!(entities[0].x, 0);
    assert_eq!(entities[MAX_NUM_ENTITIES - 1].x, u16::MAX - 1);

    // Making room allows inserting again
    assert!(entities.remove(0).is_some());
    entities.insert(0, Entity::new()).expect("list has room");
    assert_eq!(entities.len(), MAX_NUM_ENTITIES);

    let too_many = vec![Entity::new(); MAX_NUM_ENTITIES + 1];
    assert!(EntityList::try_from(too_many).is_err());
}

#[test]
fn entity_list() {
    let mut entities = EntityList::new();
    assert!(entities.is_empty());
    assert!(entities.insert(1, Entity::new()).is_err());
    let mut first = Entity::new();
    first.set_name("first").expect("name fits");
    let mut second = Entity::new();
    second.set_name("second").expect("name fits");
    entities.push(second).expect("list has room");
    entities.insert(0, first).expect("list has room");
    let names: Vec<_> = entities.iter().map(Entity::name).collect();
    assert_eq!(names, [&b"first"[..], b"second"]);
    for entity in &mut entities {
        entity.y = 7;
    }
    assert!(entities.iter().all(|e| e.y == 7));
    assert!(entities.remove(5).is_none());
    entities.clear();
    assert!(entities.is_empty());
}

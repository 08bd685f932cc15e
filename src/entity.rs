use crate::{FieldError, MAX_NUM_ENTITIES, NUM_UNKNOWN_ENTITY_BYTES};
use std::ops::{Deref, DerefMut};

/// An entity placed on a map.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Entity {
    /// Spawn flag of the entity.
    pub flag: u8,
    /// Type of the entity.
    pub kind: u8,
    /// Purpose unknown.
    pub unknown_byte: u8,
    /// X position, in tiles.
    pub x: u16,
    /// Y position, in tiles.
    pub y: u16,
    /// Bytes following the position. Their purpose is unknown.
    pub data: [u8; NUM_UNKNOWN_ENTITY_BYTES],
    pub(crate) name: Vec<u8>,
}

impl Entity {
    /// Maximum length of an entity's name, in bytes.
    pub const NAME_MAX_LEN: usize = 15;

    /// Constructs a new, zeroed entity.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw name of the entity.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Set the name of the entity. Any bytes are accepted, the game uses Shift-JIS.
    ///
    /// # Errors
    /// Errors if the name is longer than [`Entity::NAME_MAX_LEN`] bytes. The name is left unchanged.
    pub fn set_name(&mut self, name: impl AsRef<[u8]>) -> Result<(), FieldError> {
        let name = name.as_ref();
        FieldError::check_len("entity name", name, Self::NAME_MAX_LEN)?;
        name.clone_into(&mut self.name);
        Ok(())
    }

    /// Set one of the unknown data bytes.
    ///
    /// # Errors
    /// Errors if `index` is out of bounds.
    pub fn set_data(&mut self, index: usize, value: u8) -> Result<(), FieldError> {
        FieldError::check_index("entity data", index, NUM_UNKNOWN_ENTITY_BYTES)?;
        self.data[index] = value;
        Ok(())
    }

    /// Zeroes every field, including the name.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The entities of a map.
///
/// Behaves like a slice, but only lets entities be added
/// while there are fewer than [`MAX_NUM_ENTITIES`].
#[derive(Clone, PartialEq, Eq, Default)]
pub struct EntityList(Vec<Entity>);

impl EntityList {
    /// Constructs a new, empty list.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity to the end of the list.
    ///
    /// # Errors
    /// Errors if the list is full.
    pub fn push(&mut self, entity: Entity) -> Result<(), FieldError> {
        self.check_capacity()?;
        self.0.push(entity);
        Ok(())
    }

    /// Insert an entity at a position, shifting later entities back.
    ///
    /// # Errors
    /// Errors if the list is full or `index` is past the end of the list.
    pub fn insert(&mut self, index: usize, entity: Entity) -> Result<(), FieldError> {
        self.check_capacity()?;
        FieldError::check_index("entity list", index, self.0.len() + 1)?;
        self.0.insert(index, entity);
        Ok(())
    }

    /// Remove and return the entity at a position.
    /// Returns None if out of bounds.
    pub fn remove(&mut self, index: usize) -> Option<Entity> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    /// Remove every entity.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    fn check_capacity(&self) -> Result<(), FieldError> {
        if self.0.len() >= MAX_NUM_ENTITIES {
            return Err(FieldError::TooManyEntities);
        }
        Ok(())
    }
}

impl Deref for EntityList {
    type Target = [Entity];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for EntityList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a EntityList {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a mut EntityList {
    type Item = &'a mut Entity;
    type IntoIter = std::slice::IterMut<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl IntoIterator for EntityList {
    type Item = Entity;
    type IntoIter = std::vec::IntoIter<Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl TryFrom<Vec<Entity>> for EntityList {
    type Error = FieldError;

    fn try_from(entities: Vec<Entity>) -> Result<Self, Self::Error> {
        if entities.len() > MAX_NUM_ENTITIES {
            return Err(FieldError::TooManyEntities);
        }
        Ok(Self(entities))
    }
}

use crate::{Error, ErrorKind};
use std::collections::BTreeMap;

/// Object id property
pub const OBJECT_ID: u16 = 1;

/// X position property
pub const X: u16 = 2;

/// Y position property
pub const Y: u16 = 3;

/// Free text property (text objects)
pub const TEXT: u16 = 31;

/// Dot separated group id list
pub const GROUPS: u16 = 57;

/// Object id used for every data carrying block
pub const BLOCK_ID: u32 = 211;

/// A single level object, a map of property ids to their textual values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelObject {
    properties: BTreeMap<u16, String>,
}

impl LevelObject {
    /// Creates an object without any properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a block with the given object id and position
    pub fn block(id: u32, x: i64, y: i64) -> Self {
        let mut obj = LevelObject::new();
        obj.set_property(OBJECT_ID, id.to_string());
        obj.set_property(X, x.to_string());
        obj.set_property(Y, y.to_string());
        obj
    }

    /// Raw text of a property
    pub fn property(&self, key: u16) -> Option<&str> {
        self.properties.get(&key).map(|x| x.as_str())
    }

    /// Set the raw text of a property, replacing any prior value
    pub fn set_property(&mut self, key: u16, value: impl Into<String>) {
        self.properties.insert(key, value.into());
    }

    /// Integer value of a property. Decimal positions are truncated as the
    /// game writes whole numbers back as `15` but may also emit `15.5`.
    pub fn property_i64(&self, key: u16) -> Result<Option<i64>, Error> {
        let Some(raw) = self.property(key) else {
            return Ok(None);
        };

        if let Ok(x) = raw.parse::<i64>() {
            return Ok(Some(x));
        }

        raw.parse::<f64>()
            .map(|x| Some(x.trunc() as i64))
            .map_err(|_| {
                ErrorKind::format(format!("property {} is not numeric: {}", key, raw)).into()
            })
    }

    /// Object id, if present
    pub fn id(&self) -> Option<&str> {
        self.property(OBJECT_ID)
    }

    /// Iterate over properties in key order
    pub fn properties(&self) -> impl Iterator<Item = (u16, &str)> {
        self.properties.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

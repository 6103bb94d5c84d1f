//! Geometry Dash level documents.
//!
//! A raw level string is a list of `;` terminated segments. The first segment
//! is the level header (start position, colors, settings), every following
//! segment is one object written as comma separated `key,value` pairs:
//!
//! ```text
//! kS38,...,kA13,0;1,211,2,0,3,0,57,12.9.4;1,211,2,30,3,0,57,7;
//! ```
//!
//! Only the parts the codecs touch are modelled: the header is carried as
//! opaque text and objects are property maps keyed by property id.

mod object;
mod reader;
mod writer;

pub use object::*;
pub use reader::*;
pub use writer::*;

use crate::Error;

/// Header of a freshly created, empty level
pub const DEFAULT_HEADER: &str = "kS38,1_0_2_102_3_255_11_255_12_255_13_255_4_-1_6_1000_7_1_15_1_18_0_8_1|,kA13,0,kA15,0,kA16,0,kA14,,kA6,0,kA7,0,kA17,0,kA18,0,kS39,0,kA2,0,kA3,0,kA8,0,kA4,0,kA9,0,kA10,0,kA11,0";

/// A level: header text followed by its objects in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    header: String,
    objects: Vec<LevelObject>,
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}

impl Level {
    /// Creates an empty level with the default header
    pub fn new() -> Self {
        Level {
            header: String::from(DEFAULT_HEADER),
            objects: Vec::new(),
        }
    }

    /// Parse raw (uncompressed) level text
    ///
    /// ```
    /// use gdstore::level::{Level, GROUPS};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let level = Level::parse("kA13,0;1,211,2,0,3,0,57,4.2.9;")?;
    /// assert_eq!(level.objects().len(), 1);
    /// assert_eq!(level.objects()[0].property(GROUPS), Some("4.2.9"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(data: &str) -> Result<Self, Error> {
        let mut reader = LevelReader::new(data);
        let header = reader.header().to_string();
        let objects = reader.by_ref().collect::<Result<Vec<_>, _>>()?;
        Ok(Level { header, objects })
    }

    /// The opaque header segment
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Objects in document order
    pub fn objects(&self) -> &[LevelObject] {
        &self.objects
    }

    /// Append an object
    pub fn push(&mut self, object: LevelObject) {
        self.objects.push(object);
    }

    /// Number of objects in the level
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the level has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Serialize the level to raw level text
    pub fn serialize(&self) -> Result<String, Error> {
        let mut out = Vec::with_capacity(self.header.len() + self.objects.len() * 48);
        let mut writer = LevelWriter::from_writer(&mut out);
        writer.write_header(&self.header)?;
        for object in &self.objects {
            writer.write_object(object)?;
        }

        // Only valid utf-8 is ever written
        Ok(String::from_utf8(out)?)
    }
}

use crate::{level::LevelObject, Error, ErrorKind};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteState {
    Header,
    Objects,
}

/// Write level text.
///
/// The header must be written before any object.
///
/// ```
/// use gdstore::level::{LevelObject, LevelWriter};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut out: Vec<u8> = Vec::new();
/// let mut writer = LevelWriter::from_writer(&mut out);
/// writer.write_header("kA13,0")?;
/// writer.write_object(&LevelObject::block(211, 0, 0))?;
/// assert_eq!(std::str::from_utf8(&out).unwrap(), "kA13,0;1,211,2,0,3,0;");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LevelWriter<W> {
    writer: W,
    state: WriteState,
}

impl<W> LevelWriter<W>
where
    W: Write,
{
    /// Wrap a writer
    pub fn from_writer(writer: W) -> Self {
        LevelWriter {
            writer,
            state: WriteState::Header,
        }
    }

    /// Consumes this writer, returning the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write the header segment
    pub fn write_header(&mut self, header: &str) -> Result<(), Error> {
        if self.state != WriteState::Header {
            return Err(ErrorKind::format("level header written twice").into());
        }

        check_text(header, b';')?;
        self.writer.write_all(header.as_bytes())?;
        self.writer.write_all(b";")?;
        self.state = WriteState::Objects;
        Ok(())
    }

    /// Write one object and its terminator
    pub fn write_object(&mut self, object: &LevelObject) -> Result<(), Error> {
        if self.state != WriteState::Objects {
            return Err(ErrorKind::format("level object written before header").into());
        }

        for (i, (key, value)) in object.properties().enumerate() {
            check_text(value, b',')?;
            if i != 0 {
                self.writer.write_all(b",")?;
            }
            self.write_key(key)?;
            self.writer.write_all(b",")?;
            self.writer.write_all(value.as_bytes())?;
        }

        self.writer.write_all(b";")?;
        Ok(())
    }

    #[cfg(feature = "faster_writer")]
    fn write_key(&mut self, key: u16) -> Result<(), Error> {
        let mut buffer = itoa::Buffer::new();
        self.writer.write_all(buffer.format(key).as_bytes())?;
        Ok(())
    }

    #[cfg(not(feature = "faster_writer"))]
    fn write_key(&mut self, key: u16) -> Result<(), Error> {
        write!(self.writer, "{}", key)?;
        Ok(())
    }
}

/// Format a group list as the game stores it: `1.2.3`
pub fn join_groups(groups: &[u16]) -> String {
    let mut out = String::with_capacity(groups.len() * 5);
    for (i, group) in groups.iter().enumerate() {
        if i != 0 {
            out.push('.');
        }

        #[cfg(feature = "faster_writer")]
        {
            let mut buffer = itoa::Buffer::new();
            out.push_str(buffer.format(*group));
        }

        #[cfg(not(feature = "faster_writer"))]
        {
            out.push_str(&group.to_string());
        }
    }
    out
}

fn check_text(value: &str, separator: u8) -> Result<(), Error> {
    if value.bytes().any(|b| b == b';' || b == separator) {
        Err(ErrorKind::format(format!(
            "value contains a reserved separator: {}",
            value.chars().take(32).collect::<String>()
        ))
        .into())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::GROUPS;

    #[test]
    fn test_object_before_header() {
        let mut out = Vec::new();
        let mut writer = LevelWriter::from_writer(&mut out);
        assert!(writer.write_object(&LevelObject::new()).is_err());
    }

    #[test]
    fn test_header_twice() {
        let mut out = Vec::new();
        let mut writer = LevelWriter::from_writer(&mut out);
        writer.write_header("kA13,0").unwrap();
        assert!(writer.write_header("kA13,0").is_err());
    }

    #[test]
    fn test_reject_separator_in_value() {
        let mut out = Vec::new();
        let mut writer = LevelWriter::from_writer(&mut out);
        writer.write_header("").unwrap();
        let mut obj = LevelObject::new();
        obj.set_property(GROUPS, "1,2");
        assert!(writer.write_object(&obj).is_err());
    }

    #[test]
    fn test_join_groups() {
        assert_eq!(join_groups(&[]), "");
        assert_eq!(join_groups(&[9999]), "9999");
        assert_eq!(join_groups(&[1, 20, 300]), "1.20.300");
    }
}

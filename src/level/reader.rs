use crate::{level::LevelObject, Error, ErrorKind};

/// Iterate over the objects of raw level text.
///
/// ```
/// use gdstore::level::LevelReader;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut reader = LevelReader::new("kA13,0;1,211,2,0,3,0;1,211,2,30,3,0;");
/// assert_eq!(reader.header(), "kA13,0");
/// let objects = reader.collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(objects.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LevelReader<'a> {
    header: &'a str,
    segments: std::str::Split<'a, char>,
    index: usize,
}

impl<'a> LevelReader<'a> {
    /// Creates a reader over raw level text
    pub fn new(data: &'a str) -> Self {
        let mut segments = data.split(';');
        let header = segments.next().unwrap_or("");
        LevelReader {
            header,
            segments,
            index: 0,
        }
    }

    /// The header segment
    pub fn header(&self) -> &'a str {
        self.header
    }
}

impl Iterator for LevelReader<'_> {
    type Item = Result<LevelObject, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let segment = self.segments.next()?;
            if segment.is_empty() {
                continue;
            }

            self.index += 1;
            return Some(parse_object(segment, self.index));
        }
    }
}

fn parse_object(segment: &str, index: usize) -> Result<LevelObject, Error> {
    let mut obj = LevelObject::new();
    let mut fields = segment.split(',');
    while let Some(key) = fields.next() {
        let value = fields.next().ok_or_else(|| {
            ErrorKind::format(format!("object {} has a key without a value", index))
        })?;

        let key = key.parse::<u16>().map_err(|_| {
            ErrorKind::format(format!("object {} has a non-numeric key: {}", index, key))
        })?;

        obj.set_property(key, value);
    }

    Ok(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{GROUPS, TEXT};

    #[test]
    fn test_empty_input() {
        let mut reader = LevelReader::new("");
        assert_eq!(reader.header(), "");
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_skip_empty_segments() {
        let reader = LevelReader::new("h;;1,211;;");
        assert_eq!(reader.count(), 1);
    }

    #[test]
    fn test_odd_field_count() {
        let mut reader = LevelReader::new("h;1,211,2;");
        assert!(reader.next().unwrap().is_err());
    }

    #[test]
    fn test_non_numeric_key() {
        let mut reader = LevelReader::new("h;kA1,211;");
        assert!(reader.next().unwrap().is_err());
    }

    #[test]
    fn test_text_property() {
        let mut reader = LevelReader::new("h;1,211,31,aGVsbG8=;");
        let obj = reader.next().unwrap().unwrap();
        assert_eq!(obj.property(TEXT), Some("aGVsbG8="));
        assert_eq!(obj.property(GROUPS), None);
    }
}

//! Names, descriptions, and output paths derived from stored files.

use std::path::{Path, PathBuf};

/// Longest level name the game accepts
pub const MAX_LEVEL_NAME: usize = 20;

/// Longest level description the server accepts
pub const MAX_DESCRIPTION: usize = 180;

/// Start of every generated level description
pub const DESCRIPTION_PREFIX: &str = "github.com/c4k3ss/GD-Storage | ";

/// Name used when a decoded file carries no usable name
pub const FALLBACK_FILENAME: &str = "decoded_file";

/// Attempts made to find a free `stem_N.ext` path
pub const MAX_SUFFIX: u32 = 100;

/// Level name for a file stem, cut to the game's limit
pub fn level_name(stem: &str) -> String {
    stem.chars().take(MAX_LEVEL_NAME).collect()
}

/// Format a number with `,` between each group of three digits
///
/// ```
/// assert_eq!(gdstore::naming::thousands(1234567), "1,234,567");
/// ```
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Level description naming the stored file and its size. Long file names are
/// cut and marked with `...` so the whole description fits in 180 characters.
pub fn make_description(filename: &str, size: u64) -> String {
    let suffix = format!(" ({} bytes)", thousands(size));
    let room = MAX_DESCRIPTION
        .saturating_sub(DESCRIPTION_PREFIX.chars().count())
        .saturating_sub(suffix.chars().count());

    let name = if filename.chars().count() > room {
        let mut name: String = filename.chars().take(room.saturating_sub(3)).collect();
        name.push_str("...");
        name
    } else {
        filename.to_string()
    };

    format!("{}{}{}", DESCRIPTION_PREFIX, name, suffix)
}

/// Strip any directory components from a stored file name so it can only
/// land in the output directory
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();
    match base {
        "" | "." | ".." => String::from(FALLBACK_FILENAME),
        x => x.to_string(),
    }
}

/// `path` if it is free, otherwise the first free `stem_N.ext` next to it
pub fn available_path(path: &Path) -> Option<PathBuf> {
    if !path.exists() {
        return Some(path.to_path_buf());
    }

    let stem = path
        .file_stem()
        .map(|x| x.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|x| format!(".{}", x.to_string_lossy()))
        .unwrap_or_default();

    (1..MAX_SUFFIX)
        .map(|i| path.with_file_name(format!("{}_{}{}", stem, i, ext)))
        .find(|candidate| !candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("notes", "notes")]
    #[case("a_very_long_file_name_indeed", "a_very_long_file_nam")]
    #[case("ünïcödé_ünïcödé_ünïcödé", "ünïcödé_ünïcödé_ünïc")]
    fn test_level_name(#[case] stem: &str, #[case] expected: &str) {
        assert_eq!(level_name(stem), expected);
    }

    #[rstest]
    #[case(0, "0")]
    #[case(999, "999")]
    #[case(1000, "1,000")]
    #[case(123456, "123,456")]
    #[case(1234567, "1,234,567")]
    fn test_thousands(#[case] n: u64, #[case] expected: &str) {
        assert_eq!(thousands(n), expected);
    }

    #[test]
    fn test_short_description() {
        assert_eq!(
            make_description("a.bin", 20),
            "github.com/c4k3ss/GD-Storage | a.bin (20 bytes)"
        );
    }

    #[test]
    fn test_long_description() {
        let name = "x".repeat(300);
        let desc = make_description(&name, 1_048_576);
        assert_eq!(desc.chars().count(), MAX_DESCRIPTION);
        assert!(desc.starts_with(DESCRIPTION_PREFIX));
        assert!(desc.ends_with("xxx... (1,048,576 bytes)"));
    }

    #[rstest]
    #[case("report.pdf", "report.pdf")]
    #[case("../../etc/passwd", "passwd")]
    #[case("..\\..\\boot.ini", "boot.ini")]
    #[case("dir/", FALLBACK_FILENAME)]
    #[case("..", FALLBACK_FILENAME)]
    #[case("", FALLBACK_FILENAME)]
    fn test_sanitize_filename(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(sanitize_filename(name), expected);
    }

    #[test]
    fn test_available_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("data.tar.gz");
        assert_eq!(available_path(&target).unwrap(), target);

        std::fs::write(&target, b"1").unwrap();
        let first = available_path(&target).unwrap();
        assert_eq!(first, dir.path().join("data.tar_1.gz"));

        std::fs::write(&first, b"2").unwrap();
        assert_eq!(
            available_path(&target).unwrap(),
            dir.path().join("data.tar_2.gz")
        );
    }

    #[test]
    fn test_available_path_exhausted() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("x");
        std::fs::write(&target, b"").unwrap();
        for i in 1..MAX_SUFFIX {
            std::fs::write(dir.path().join(format!("x_{}", i)), b"").unwrap();
        }
        assert_eq!(available_path(&target), None);
    }
}

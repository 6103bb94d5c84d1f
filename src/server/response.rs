use crate::{compression, Error, ErrorKind};
use base64::Engine;

/// Level as returned by the download endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedLevel {
    pub id: String,
    pub name: String,
    /// Decoded description, empty when the level has none
    pub description: String,
    /// Raw level text, already decompressed when the server sent it gzipped
    pub level_string: String,
}

/// Error codes are negative integers sent as the whole body
fn is_error_code(body: &str) -> bool {
    body.starts_with('-')
}

/// Split a `key:value:key:value#...` response into its pairs. Anything after
/// the first `#` (hashes, creator info) is ignored, as is a trailing key
/// without a value.
pub fn parse_fields(body: &str) -> Vec<(&str, &str)> {
    let head = body.split('#').next().unwrap_or_default();
    let parts: Vec<&str> = head.split(':').collect();
    parts
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

fn field<'a>(fields: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    fields.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Parse the body of a download request for `level_id`
pub fn parse_download(body: &str, level_id: u64) -> Result<DownloadedLevel, Error> {
    let body = body.trim();
    if body == "-1" {
        return Err(ErrorKind::NotFound {
            what: format!("level {}", level_id),
        }
        .into());
    } else if is_error_code(body) {
        return Err(ErrorKind::Protocol {
            code: body.to_string(),
        }
        .into());
    }

    let fields = parse_fields(body);
    let level_string = match field(&fields, "4") {
        Some(data) => compression::decompress_level_string(data).unwrap_or_else(|e| {
            log::debug!("level string is not gzipped ({}), using it as is", e);
            data.to_string()
        }),
        None => String::new(),
    };

    let description = match field(&fields, "3") {
        Some(data) => match compression::URL_SAFE_LENIENT.decode(data) {
            Ok(raw) => String::from_utf8_lossy(&raw).into_owned(),
            Err(_) => data.to_string(),
        },
        None => String::new(),
    };

    let name = field(&fields, "2").unwrap_or("Unknown").to_string();
    let id = field(&fields, "1")
        .map(String::from)
        .unwrap_or_else(|| level_id.to_string());

    Ok(DownloadedLevel {
        id,
        name,
        description,
        level_string,
    })
}

/// Parse a login response of `accountID,userID` into the account id
pub fn parse_login(body: &str) -> Result<u64, Error> {
    let body = body.trim();
    if is_error_code(body) {
        return Err(ErrorKind::Protocol {
            code: body.to_string(),
        }
        .into());
    }

    let account = body.split(',').next().unwrap_or_default();
    account.parse().map_err(|_| {
        ErrorKind::Protocol {
            code: body.to_string(),
        }
        .into()
    })
}

/// Parse an upload response into the id of the new level
pub fn parse_upload(body: &str) -> Result<u64, Error> {
    let body = body.trim();
    body.parse().map_err(|_| {
        ErrorKind::Protocol {
            code: body.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE;
    use rstest::*;

    #[test]
    fn test_parse_fields() {
        let fields = parse_fields("1:128:2:Name:3:#hash#creator");
        assert_eq!(fields, vec![("1", "128"), ("2", "Name"), ("3", "")]);
        assert_eq!(parse_fields("1:2:3"), vec![("1", "2")]);
    }

    #[test]
    fn test_parse_download() {
        let level = compression::compress_level_string("kA13,0;1,211,2,0,3,0;").unwrap();
        let desc = URL_SAFE.encode("hello there");
        let body = format!("1:42:2:notes:3:{}:4:{}:5:1#abc#def", desc, level);
        let parsed = parse_download(&body, 42).unwrap();
        assert_eq!(
            parsed,
            DownloadedLevel {
                id: String::from("42"),
                name: String::from("notes"),
                description: String::from("hello there"),
                level_string: String::from("kA13,0;1,211,2,0,3,0;"),
            }
        );
    }

    #[test]
    fn test_parse_download_fallbacks() {
        let parsed = parse_download("3:not base64!:4:kA13,0;", 7).unwrap();
        assert_eq!(parsed.id, "7");
        assert_eq!(parsed.name, "Unknown");
        assert_eq!(parsed.description, "not base64!");
        assert_eq!(parsed.level_string, "kA13,0;");
    }

    #[test]
    fn test_parse_download_missing() {
        let err = parse_download("-1", 99).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::NotFound { .. }));

        let err = parse_download("-9", 99).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Protocol { .. }));
    }

    #[rstest]
    #[case("1234,5678", Some(1234))]
    #[case("1234", Some(1234))]
    #[case("-1", None)]
    #[case("-12", None)]
    #[case("error", None)]
    fn test_parse_login(#[case] body: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_login(body).ok(), expected);
    }

    #[rstest]
    #[case("98765", Some(98765))]
    #[case("-1", None)]
    #[case("", None)]
    fn test_parse_upload(#[case] body: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_upload(body).ok(), expected);
    }
}

//! Reading and writing entries in decoded save plaintext.
//!
//! The level list (`CCLocalLevels.dat`) is a plist where each level lives
//! under a `k_N` key. New levels are always inserted as `k_0` and every
//! existing entry is shifted up by one.

use super::{SaveError, SaveErrorKind};
use crate::server::Account;

/// Separator in front of each level entry key
pub const ENTRY_SEPARATOR: &[u8] = b">k_";

const LEVEL_STRING_KEY: &str = "<k>k4</k><s>";

/// Metadata written after the description of an injected level: editor
/// position, version fields, and an empty editor layer dictionary.
const ENTRY_TAIL: &str = concat!(
    "<k>k13</k><t /><k>k21</k><i>2</i><k>k16</k><i>1</i>",
    "<k>k80</k><i>338</i><k>k81</k><i>23</i><k>k83</k><i>109</i><k>k50</k><i>35</i>",
    "<k>k48</k><i>23</i><k>kI1</k><r>-1118.36</r><k>kI2</k><r>-366.449</r>",
    "<k>kI3</k><r>0.7</r><k>kI4</k><i>2</i><k>kI5</k><i>11</i><k>kI7</k><i>1</i>",
    "<k>kI6</k><d><k>0</k><s>0</s><k>1</k><s>0</s><k>2</k><s>0</s><k>3</k><s>0</s>",
    "<k>4</k><s>0</s><k>5</k><s>0</s><k>6</k><s>0</s><k>7</k><s>0</s><k>8</k><s>0</s>",
    "<k>9</k><s>0</s><k>10</k><s>0</s><k>11</k><s>2</s><k>12</k><s>0</s></d></d><k",
);

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn split<'a>(haystack: &'a [u8], needle: &'a [u8]) -> impl Iterator<Item = &'a [u8]> + 'a {
    let mut rest = Some(haystack);
    std::iter::from_fn(move || {
        let current = rest?;
        match find(current, needle) {
            Some(idx) => {
                rest = Some(&current[idx + needle.len()..]);
                Some(&current[..idx])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}

/// Insert a level as entry `k_0` of the level list plaintext and renumber the
/// existing entries from 1.
///
/// Values are written verbatim, so callers pass text that is already safe to
/// embed (level strings are base64, names come from file stems).
pub fn inject_level(plaintext: &[u8], level_string: &str, name: &str, description: &str) -> Vec<u8> {
    let mut segments = split(plaintext, ENTRY_SEPARATOR);
    let head = segments.next().unwrap_or_default();

    let mut out = Vec::with_capacity(plaintext.len() + level_string.len() + 1024);
    out.extend_from_slice(head);
    out.extend_from_slice(b">k_0</k><d><k>kCEK</k><i>4</i><k>k18</k><i>2</i><k>k2</k><s>");
    out.extend_from_slice(name.as_bytes());
    out.extend_from_slice(b"</s><k>k4</k><s>");
    out.extend_from_slice(level_string.as_bytes());
    out.extend_from_slice(b"</s><k>k5</k><s>");
    out.extend_from_slice(description.as_bytes());
    out.extend_from_slice(b"</s>");
    out.extend_from_slice(ENTRY_TAIL.as_bytes());

    let mut shifted = 0;
    for (i, segment) in segments.enumerate() {
        let body = match segment.iter().position(|&b| b == b'<') {
            Some(idx) => &segment[idx + 1..],
            None => &[],
        };

        out.extend_from_slice(ENTRY_SEPARATOR);
        out.extend_from_slice((i + 1).to_string().as_bytes());
        out.push(b'<');
        out.extend_from_slice(body);
        shifted += 1;
    }

    log::debug!("injected level {:?}, shifted {} existing entries", name, shifted);
    out
}

/// Find the level string of the first level named `name`
pub fn find_level_string(plaintext: &[u8], name: &str) -> Result<String, SaveError> {
    let text = String::from_utf8_lossy(plaintext);
    let not_found = || SaveError::from(SaveErrorKind::NotFound(format!("level '{}'", name)));

    let start = text.find(&format!("<s>{}</s>", name)).ok_or_else(not_found)?;
    let value_start = text[start..]
        .find(LEVEL_STRING_KEY)
        .map(|idx| start + idx + LEVEL_STRING_KEY.len())
        .ok_or_else(not_found)?;
    let value_len = text[value_start..].find("</s>").ok_or_else(not_found)?;

    Ok(text[value_start..value_start + value_len].to_string())
}

fn tag_value<'a>(text: &'a str, key: &str, tag: &str) -> Option<&'a str> {
    let open = format!("<k>{}</k><{}>", key, tag);
    let start = text.find(&open)? + open.len();
    let len = text[start..].find('<')?;
    let value = &text[start..start + len];
    (!value.is_empty()).then_some(value)
}

/// Read the logged in account from game manager plaintext, if every field is
/// present
pub fn saved_account(plaintext: &[u8]) -> Option<Account> {
    let text = String::from_utf8_lossy(plaintext);
    let username = tag_value(&text, "GJA_001", "s")?;
    let account_id = tag_value(&text, "GJA_003", "i")?.parse().ok()?;
    let gjp2 = tag_value(&text, "GJA_005", "s")?;
    Some(Account {
        username: username.to_string(),
        account_id,
        gjp2: gjp2.to_string(),
    })
}

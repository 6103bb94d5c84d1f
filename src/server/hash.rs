//! Credential and upload checksums expected by the level server.

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use sha1::{Digest, Sha1};

/// XOR key of the legacy password encoding
pub const GJP_KEY: &str = "37526";

/// Salt appended to the password before hashing
pub const GJP2_SALT: &str = "mI29fmAnxgTs";

/// Salt appended to the sampled level string
pub const SEED2_SALT: &str = "xI25fpAapCQg";

/// XOR key applied to the hashed level sample
pub const SEED2_KEY: &str = "41274";

/// Characters of the level string sampled for the upload checksum
pub const SEED_CHARS: usize = 50;

/// XOR every byte of `input` with the cycled `key`
pub fn xor_cipher(input: &[u8], key: &[u8]) -> Vec<u8> {
    input
        .iter()
        .zip(key.iter().cycle())
        .map(|(a, b)| a ^ b)
        .collect()
}

/// Legacy password encoding: XOR with `37526`, then url safe base64
pub fn gjp(password: &str) -> String {
    URL_SAFE.encode(xor_cipher(password.as_bytes(), GJP_KEY.as_bytes()))
}

/// Current password hash: hex SHA-1 of the salted password
pub fn gjp2(password: &str) -> String {
    sha1_hex(format!("{}{}", password, GJP2_SALT).as_bytes())
}

/// Sample up to 50 evenly spaced characters from a level string. Strings
/// shorter than that are returned whole.
pub fn upload_seed(data: &str) -> String {
    let len = data.chars().count();
    if len < SEED_CHARS {
        return data.to_string();
    }

    let step = len / SEED_CHARS;
    data.chars().step_by(step).take(SEED_CHARS).collect()
}

/// Upload checksum of a level string
pub fn seed2(level_string: &str) -> String {
    let hashed = sha1_hex(format!("{}{}", upload_seed(level_string), SEED2_SALT).as_bytes());
    URL_SAFE.encode(xor_cipher(hashed.as_bytes(), SEED2_KEY.as_bytes()))
}

fn sha1_hex(data: &[u8]) -> String {
    let digest = Sha1::digest(data);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest.iter() {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn alphabet(len: usize) -> String {
        (0..len).map(|i| (b'a' + (i % 26) as u8) as char).collect()
    }

    #[test]
    fn test_gjp() {
        assert_eq!(gjp("password"), "Q1ZGQUFcRVE=");
    }

    #[test]
    fn test_gjp2() {
        assert_eq!(gjp2("password"), "b35ab22e8265f5904100b253e29511f129ca1ce8");
    }

    #[test]
    fn test_xor_cipher_is_involution() {
        let once = xor_cipher(b"hello world", b"41274");
        assert_eq!(xor_cipher(&once, b"41274"), b"hello world");
    }

    #[rstest]
    #[case("abc", "abc")]
    #[case(&alphabet(49), &alphabet(49))]
    #[case(&alphabet(50), &alphabet(50))]
    #[case(&alphabet(120), "acegikmoqsuwyacegikmoqsuwyacegikmoqsuwyacegikmoqsu")]
    fn test_upload_seed(#[case] data: &str, #[case] expected: &str) {
        assert_eq!(upload_seed(data), expected);
    }

    #[rstest]
    #[case("abc", "AgABAgcCBgRVDQZQBQNWVQYBBw0CUFYODAVXBlFWDQMBVlBQV1RUAg==")]
    #[case(&alphabet(120), "AlMLBlYGBFYBDVYEAg4ABVIAA1VXBQJUAgUEV1UGAQdXAVIGBVdTAA==")]
    fn test_seed2(#[case] level: &str, #[case] expected: &str) {
        assert_eq!(seed2(level), expected);
    }
}

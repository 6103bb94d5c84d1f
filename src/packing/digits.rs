use crate::{Error, ErrorKind};

/// Radix of a packed digit
pub const BASE: u64 = 9999;

/// Smallest and largest digit value. Group 0 does not exist in the game so
/// every digit is shifted up by one.
pub const MIN_DIGIT: u16 = 1;
pub const MAX_DIGIT: u16 = 9999;

/// Source bytes consumed per chunk
pub const CHUNK_SIZE: usize = 8;

/// Digits emitted per chunk, as 9999^4 < 2^64 < 9999^5
pub const DIGITS_PER_CHUNK: usize = 5;

/// Digits used by the length header
pub const HEADER_DIGITS: usize = 2;

/// Largest payload length representable by the two digit header
pub const MAX_PAYLOAD_LEN: usize = (BASE * BASE - 1) as usize;

/// Convert one big endian chunk into five digits, most significant first
#[inline]
pub fn chunk_to_digits(chunk: [u8; CHUNK_SIZE]) -> [u16; DIGITS_PER_CHUNK] {
    let mut value = u64::from_be_bytes(chunk);
    let mut out = [MIN_DIGIT; DIGITS_PER_CHUNK];
    for slot in out.iter_mut().rev() {
        *slot = (value % BASE) as u16 + 1;
        value /= BASE;
    }

    debug_assert_eq!(value, 0);
    out
}

/// Fold a group of up to five digits back into an 8 byte chunk
pub fn digits_to_chunk(digits: &[u16]) -> Result<[u8; CHUNK_SIZE], Error> {
    let mut value: u64 = 0;
    for &digit in digits {
        let digit = check_digit(digit)?;
        value = value
            .checked_mul(BASE)
            .and_then(|x| x.checked_add(u64::from(digit - 1)))
            .ok_or_else(|| ErrorKind::format("digit group overflows 64 bits"))?;
    }

    Ok(value.to_be_bytes())
}

/// Encode a payload length as two digits
pub fn length_header(len: usize) -> Result<[u16; HEADER_DIGITS], Error> {
    if len > MAX_PAYLOAD_LEN {
        return Err(ErrorKind::format(format!(
            "payload of {} bytes exceeds the maximum of {} bytes",
            len, MAX_PAYLOAD_LEN
        ))
        .into());
    }

    let len = len as u64;
    Ok([(len / BASE) as u16 + 1, (len % BASE) as u16 + 1])
}

/// Decode the two digit length header
pub fn decode_length_header(high: u16, low: u16) -> Result<usize, Error> {
    let high = u64::from(check_digit(high)? - 1);
    let low = u64::from(check_digit(low)? - 1);
    Ok((high * BASE + low) as usize)
}

/// Convert a payload into its full digit sequence: length header followed by
/// five digits per (zero padded) 8 byte chunk
pub fn bytes_to_digits(payload: &[u8]) -> Result<Vec<u16>, Error> {
    let header = length_header(payload.len())?;
    let chunks = payload.len().div_ceil(CHUNK_SIZE);
    let mut out = Vec::with_capacity(HEADER_DIGITS + chunks * DIGITS_PER_CHUNK);
    out.extend_from_slice(&header);

    let mut iter = payload.chunks_exact(CHUNK_SIZE);
    for chunk in iter.by_ref() {
        let mut buf = [0u8; CHUNK_SIZE];
        buf.copy_from_slice(chunk);
        out.extend_from_slice(&chunk_to_digits(buf));
    }

    let rest = iter.remainder();
    if !rest.is_empty() {
        let mut buf = [0u8; CHUNK_SIZE];
        buf[..rest.len()].copy_from_slice(rest);
        out.extend_from_slice(&chunk_to_digits(buf));
    }

    Ok(out)
}

/// Reverse of [`bytes_to_digits`]
pub fn digits_to_bytes(digits: &[u16]) -> Result<Vec<u8>, Error> {
    let [high, low, data @ ..] = digits else {
        return Err(ErrorKind::format("not enough data to decode").into());
    };

    let len = decode_length_header(*high, *low)?;
    let mut out = Vec::with_capacity(data.len().div_ceil(DIGITS_PER_CHUNK) * CHUNK_SIZE);
    for group in data.chunks(DIGITS_PER_CHUNK) {
        out.extend_from_slice(&digits_to_chunk(group)?);
    }

    if out.len() < len {
        return Err(ErrorKind::Truncated {
            expected: len,
            actual: out.len(),
        }
        .into());
    }

    out.truncate(len);
    Ok(out)
}

#[inline]
fn check_digit(digit: u16) -> Result<u16, Error> {
    if (MIN_DIGIT..=MAX_DIGIT).contains(&digit) {
        Ok(digit)
    } else {
        Err(ErrorKind::format(format!("group {} is out of range", digit)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::*;

    #[rstest]
    #[case([0; 8], [1, 1, 1, 1, 1])]
    #[case([0, 0, 0, 0, 0, 0, 0, 1], [1, 1, 1, 1, 2])]
    #[case([0, 0, 0, 0, 0, 0, 0x27, 0x0f], [1, 1, 1, 2, 1])]
    #[case([0xff; 8], [1846, 4125, 2040, 42, 1897])]
    fn test_chunk_to_digits(#[case] chunk: [u8; 8], #[case] expected: [u16; 5]) {
        assert_eq!(chunk_to_digits(chunk), expected);
        assert_eq!(digits_to_chunk(&expected).unwrap(), chunk);
    }

    #[rstest]
    #[case(0, [1, 1])]
    #[case(1, [1, 2])]
    #[case(9998, [1, 9999])]
    #[case(9999, [2, 1])]
    #[case(10000, [2, 2])]
    #[case(MAX_PAYLOAD_LEN, [9999, 9999])]
    fn test_length_header(#[case] len: usize, #[case] expected: [u16; 2]) {
        let header = length_header(len).unwrap();
        assert_eq!(header, expected);
        assert_eq!(decode_length_header(header[0], header[1]).unwrap(), len);
    }

    #[rstest]
    #[case(MAX_PAYLOAD_LEN + 1)]
    #[case(99_999_998)]
    fn test_length_header_too_large(#[case] len: usize) {
        let err = length_header(len).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::FormatViolation { .. }));
    }

    #[test]
    fn test_digit_out_of_range() {
        assert!(digits_to_chunk(&[0]).is_err());
        assert!(digits_to_chunk(&[10000]).is_err());
        assert!(decode_length_header(0, 1).is_err());
    }

    #[test]
    fn test_overflowing_group() {
        let err = digits_to_chunk(&[9999; 5]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::FormatViolation { .. }));
    }

    #[test]
    fn test_short_digit_sequence() {
        assert!(digits_to_bytes(&[]).is_err());
        assert!(digits_to_bytes(&[1]).is_err());
        assert_eq!(digits_to_bytes(&[1, 1]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_truncated_digits() {
        // declares 9 bytes but carries a single chunk
        let err = digits_to_bytes(&[1, 10, 1, 1, 1, 1, 2]).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::Truncated {
                expected: 9,
                actual: 8
            }
        ));
    }

    #[rstest]
    #[case(0, 2)]
    #[case(1, 7)]
    #[case(8, 7)]
    #[case(9, 12)]
    #[case(26, 22)]
    fn test_digit_count(#[case] len: usize, #[case] expected: usize) {
        let digits = bytes_to_digits(&vec![0xab; len]).unwrap();
        assert_eq!(digits.len(), expected);
    }

    #[quickcheck]
    fn digits_roundtrip(data: Vec<u8>) -> bool {
        let digits = bytes_to_digits(&data).unwrap();
        digits.iter().all(|d| (MIN_DIGIT..=MAX_DIGIT).contains(d))
            && digits.len() == HEADER_DIGITS + DIGITS_PER_CHUNK * data.len().div_ceil(CHUNK_SIZE)
            && digits_to_bytes(&digits).unwrap() == data
    }
}

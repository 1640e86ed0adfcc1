//! Wire text representation.
//!
//! Values travel as lowercase hexadecimal, most significant byte first, without a `0x` prefix.
//! Decoding is lenient: upper case, odd lengths and any number of leading zeros are accepted.

use crate::error::SrpError;

/// Lowercase hex of every byte, leading zero bytes included.
pub(crate) fn hex_encode(b: &[u8]) -> String {
    ::hex::encode(b)
}

/// Lowercase hex of an integer given as minimal big endian bytes.
///
/// Zero encodes as `"0"`, otherwise there are no leading zeros.
pub(crate) fn hex_encode_integer(b: &[u8]) -> String {
    let s = ::hex::encode(b);
    let trimmed = s.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Decodes hex into bytes, left padding odd length input with a `0` nibble.
///
/// Leading zero bytes are kept.
pub(crate) fn hex_decode(s: &str) -> Result<Vec<u8>, SrpError> {
    if s.len() % 2 == 1 {
        let mut padded = String::with_capacity(s.len() + 1);
        padded.push('0');
        padded.push_str(s);
        return Ok(::hex::decode(padded)?);
    }

    Ok(::hex::decode(s)?)
}

/// Decodes hex into minimal big endian bytes. Zero decodes into the empty vector.
pub(crate) fn hex_decode_integer(s: &str) -> Result<Vec<u8>, SrpError> {
    let bytes = hex_decode(s)?;
    Ok(strip_leading_zeros(&bytes).to_vec())
}

pub(crate) fn strip_leading_zeros(b: &[u8]) -> &[u8] {
    let first_non_zero = b.iter().position(|v| *v != 0).unwrap_or(b.len());
    &b[first_non_zero..]
}

#[cfg(test)]
mod test {
    use crate::error::SrpError;
    use crate::hex::{hex_decode, hex_decode_integer, hex_encode, hex_encode_integer};

    #[test]
    fn integers_encode_without_leading_zeros() {
        assert_eq!(hex_encode_integer(&[0x0a, 0xbc]), "abc");
        assert_eq!(hex_encode_integer(&[]), "0");
        assert_eq!(hex_encode_integer(&[0, 0]), "0");
    }

    #[test]
    fn byte_strings_keep_leading_zeros() {
        assert_eq!(hex_encode(&[0, 0x01, 0xff]), "0001ff");
    }

    #[test]
    fn decoding_is_case_insensitive() {
        assert_eq!(hex_decode("DEADbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn odd_length_is_left_padded() {
        assert_eq!(hex_decode("abc").unwrap(), vec![0x0a, 0xbc]);
        assert_eq!(hex_decode_integer("0000abc").unwrap(), vec![0x0a, 0xbc]);
    }

    #[test]
    fn zero_decodes_to_empty_integer() {
        assert!(hex_decode_integer("0").unwrap().is_empty());
        assert!(hex_decode_integer("").unwrap().is_empty());
    }

    #[test]
    fn non_hex_is_rejected() {
        assert!(matches!(
            hex_decode("xyz"),
            Err(SrpError::InvalidEncoding(_))
        ));
        assert!(matches!(
            hex_decode("0x12"),
            Err(SrpError::InvalidEncoding(_))
        ));
    }
}

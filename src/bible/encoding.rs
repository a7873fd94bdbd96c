//! Text decoding for raw corpus files.
//!
//! The source files date from an era of mixed tooling: most are EUC-KR
//! (windows-949), a few re-saved copies are UTF-8. Decoding tries the legacy
//! encoding first and retries exactly once with UTF-8 before giving up.

use encoding_rs::{EUC_KR, UTF_8};

use crate::error::{Error, Result};

/// Decode raw corpus bytes to text.
///
/// Attempts EUC-KR first; if the decoder reports errors or the result is
/// empty, retries with UTF-8. If both attempts fail the caller receives
/// [`Error::DecodeFailure`] — decoding itself never halts the pipeline, the
/// caller decides the fallback policy.
pub fn decode_corpus_bytes(bytes: &[u8], filename: &str) -> Result<String> {
    let (decoded, _, had_errors) = EUC_KR.decode(bytes);
    if !had_errors && !decoded.trim().is_empty() {
        return Ok(decoded.into_owned());
    }

    tracing::warn!("EUC-KR decode of {filename} failed or was empty, retrying as UTF-8");

    let (decoded, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors && !decoded.trim().is_empty() {
        return Ok(decoded.into_owned());
    }

    Err(Error::DecodeFailure {
        filename: filename.to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_decode_euc_kr() {
        // "한글" in EUC-KR: 0xC7, 0xD1, 0xB1, 0xDB
        let bytes = [0xC7, 0xD1, 0xB1, 0xDB];
        assert_eq!(decode_corpus_bytes(&bytes, "test.txt").unwrap(), "한글");
    }

    #[test]
    fn test_decode_ascii() {
        assert_eq!(
            decode_corpus_bytes(b"1:1 in the beginning", "test.txt").unwrap(),
            "1:1 in the beginning"
        );
    }

    #[test]
    fn test_decode_round_trips_korean() {
        let text = "창1:1 태초에 하나님이 천지를 창조하시니라";
        let (encoded, _, _) = EUC_KR.encode(text);
        assert_eq!(decode_corpus_bytes(&encoded, "1-01창세기.txt").unwrap(), text);
    }

    #[test]
    fn test_utf8_fallback() {
        // 0xC2 0x80 is U+0080 in UTF-8 but an unmapped trail byte in
        // windows-949, so the first attempt errors and the retry succeeds.
        let mut bytes = b"1:1 ok".to_vec();
        bytes.extend_from_slice(&[0xC2, 0x80]);
        let text = decode_corpus_bytes(&bytes, "test.txt").unwrap();
        assert!(text.starts_with("1:1 ok"));
    }

    #[test]
    fn test_empty_input_is_decode_failure() {
        let err = decode_corpus_bytes(b"", "1-01창세기.txt").unwrap_err();
        assert!(matches!(err, Error::DecodeFailure { .. }));
    }

    #[test]
    fn test_whitespace_only_is_decode_failure() {
        let err = decode_corpus_bytes(b"  \n\n  ", "1-01창세기.txt").unwrap_err();
        assert!(matches!(err, Error::DecodeFailure { .. }));
    }

    #[test]
    fn test_garbage_in_both_encodings_is_decode_failure() {
        // 0xFF is not a valid lead byte in windows-949 and never valid UTF-8.
        let err = decode_corpus_bytes(&[0xFF, 0xFF, 0xFF], "test.txt").unwrap_err();
        assert!(matches!(err, Error::DecodeFailure { .. }));
    }
}

//! Text decoding for option files.
//!
//! Order of checks:
//! 1. byte-order mark (UTF-8, UTF-16 LE/BE), which is dropped
//! 2. strict UTF-8
//! 3. `chardetng` guess for anything else (Latin-1 era files, mostly)

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::borrow::Cow;

/// Decode raw file bytes to text, returning the encoding name used.
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, &'static str) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (text, encoding.name());
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return (Cow::Borrowed(text), encoding_rs::UTF_8.name());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, _) = encoding.decode_without_bom_handling(bytes);
    (text, encoding.name())
}

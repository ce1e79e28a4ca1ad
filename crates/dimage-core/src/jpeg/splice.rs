//! Re-inserting a captured metadata header into an encoded JPEG.

use super::segments::{scan, SOI};

/// Replace the leading metadata segments of `encoded` with `header`.
///
/// Whatever APPn/COM segments the encoder emitted (typically a JFIF APP0)
/// are dropped. `header` is inserted verbatim right after SOI, without any
/// validation; it is expected to be a run previously captured by
/// [`scan`](super::scan).
///
/// The output length is always `2 + header.len() + (encoded.len() - body_offset)`
/// where `body_offset` is the end of the encoder's own metadata run, or 2 when
/// it has none.
pub fn inject_header(encoded: &[u8], header: &[u8]) -> Vec<u8> {
    if !encoded.starts_with(&SOI) {
        tracing::warn!(
            "Splicing a {} byte header into {} bytes that do not start with SOI",
            header.len(),
            encoded.len()
        );
    }

    let result = scan(encoded);
    let body_offset = if result.segments.is_empty() {
        SOI.len()
    } else {
        result.header_end
    };
    let body = encoded.get(body_offset..).unwrap_or_default();

    let mut output = Vec::with_capacity(SOI.len() + header.len() + body.len());
    output.extend_from_slice(&SOI);
    output.extend_from_slice(header);
    output.extend_from_slice(body);
    output
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: output length and header placement hold for any input.
        #[test]
        fn prop_length_and_placement(
            encoded in prop::collection::vec(any::<u8>(), 0..256),
            header in prop::collection::vec(any::<u8>(), 0..64),
        ) {
            let result = scan(&encoded);
            let body_offset = if result.segments.is_empty() { 2 } else { result.header_end };
            let body_len = encoded.len().saturating_sub(body_offset);

            let out = inject_header(&encoded, &header);
            prop_assert_eq!(out.len(), 2 + header.len() + body_len);
            prop_assert_eq!(&out[..2], &SOI[..]);
            prop_assert_eq!(&out[2..2 + header.len()], header.as_slice());
        }
    }
}

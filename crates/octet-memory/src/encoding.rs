//! Base64 text encoding of memory views.

use ::base64::engine::general_purpose::{STANDARD, URL_SAFE};
use ::base64::engine::GeneralPurpose;
use ::base64::Engine;
use octet_core::{MemoryError, ReadMemory, Writeable};

/// A padded base64 alphabet.
///
/// [`STANDARD`](Self::STANDARD) uses `+` and `/`;
/// [`URL_SAFE`](Self::URL_SAFE) uses `-` and `_`. Both pad with `=`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Base64 {
    url_safe: bool,
}

impl Base64 {
    /// RFC 4648 standard alphabet.
    pub const STANDARD: Self = Self { url_safe: false };

    /// RFC 4648 URL- and filename-safe alphabet.
    pub const URL_SAFE: Self = Self { url_safe: true };

    fn engine(self) -> GeneralPurpose {
        if self.url_safe {
            URL_SAFE
        } else {
            STANDARD
        }
    }

    /// Encode the bytes of a view.
    pub fn encode(self, src: ReadMemory<'_>) -> String {
        self.engine().encode(src.as_slice())
    }

    /// Decode text into a fresh vector.
    pub fn decode(self, text: &str) -> Result<Vec<u8>, MemoryError> {
        self.engine()
            .decode(text)
            .map_err(|e| MemoryError::InvalidEncoding {
                detail: e.to_string(),
            })
    }

    /// Decode text straight into a sink, returning the number of bytes written.
    ///
    /// Nothing is written if the text is malformed.
    pub fn decode_into<W>(self, dst: &mut W, text: &str) -> Result<usize, MemoryError>
    where
        W: Writeable + ?Sized,
    {
        let bytes = self.decode(text)?;
        dst.request_can_write(bytes.len())?;
        dst.write_bytes(&bytes)?;
        Ok(bytes.len())
    }
}

impl Default for Base64 {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReusableMemory;

    const SAMPLE: [u8; 12] = [21, 42, 63, 84, 105, 126, 147, 168, 189, 210, 231, 252];

    #[test]
    fn standard_alphabet_vectors() {
        let b64 = Base64::STANDARD;
        assert_eq!(b64.encode(ReadMemory::new(&SAMPLE)), "FSo/VGl+k6i90uf8");
        assert_eq!(b64.encode(ReadMemory::new(&[1, 2, 3, 4, 5])), "AQIDBAU=");
        assert_eq!(b64.encode(ReadMemory::new(&[1, 2, 3, 4])), "AQIDBA==");
        assert_eq!(b64.encode(ReadMemory::empty()), "");
    }

    #[test]
    fn url_safe_alphabet_vectors() {
        let b64 = Base64::URL_SAFE;
        assert_eq!(b64.encode(ReadMemory::new(&SAMPLE)), "FSo_VGl-k6i90uf8");
        assert_eq!(b64.decode("FSo_VGl-k6i90uf8").unwrap(), SAMPLE);
    }

    #[test]
    fn decode_reverses_encode() {
        for text in ["FSo/VGl+k6i90uf8", "AQIDBAU=", "AQIDBA=="] {
            let bytes = Base64::STANDARD.decode(text).unwrap();
            assert_eq!(Base64::STANDARD.encode(ReadMemory::new(&bytes)), text);
        }
    }

    #[test]
    fn wrong_alphabet_is_invalid_encoding() {
        assert!(matches!(
            Base64::STANDARD.decode("FSo_VGl-k6i90uf8"),
            Err(MemoryError::InvalidEncoding { .. })
        ));
        assert!(Base64::URL_SAFE.decode("FSo/VGl+k6i90uf8").is_err());
    }

    #[test]
    fn decode_into_reusable_buffer() {
        let mut buf = ReusableMemory::array(4).unwrap();
        let view = buf
            .slice(|w| {
                let n = Base64::STANDARD.decode_into(w, "AQIDBAU=")?;
                assert_eq!(n, 5);
                Ok(())
            })
            .unwrap();
        assert_eq!(view.as_slice(), &[1, 2, 3, 4, 5]);
        // Sized up front, so nothing was copied.
        assert_eq!(buf.bytes_copied(), 0);
    }
}

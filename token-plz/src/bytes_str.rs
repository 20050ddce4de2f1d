use bytes::Bytes;

use std::{fmt, str};

// Immutable utf-8 token. Names compiled into the binary are borrowed from
// static memory, everything else owns a copy.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BytesStr(Bytes);

impl BytesStr {
    pub const fn from_static(value: &'static str) -> Self {
        BytesStr(Bytes::from_static(value.as_bytes()))
    }

    pub fn as_str(&self) -> &str {
        // Safety: every constructor receives or checks valid utf-8
        unsafe { str::from_utf8_unchecked(self.0.as_ref()) }
    }
}

impl From<&str> for BytesStr {
    fn from(value: &str) -> Self {
        BytesStr(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl TryFrom<&[u8]> for BytesStr {
    type Error = str::Utf8Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Ok(BytesStr::from(str::from_utf8(value)?))
    }
}

impl std::ops::Deref for BytesStr {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<[u8]> for BytesStr {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl fmt::Display for BytesStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_str_static_shares_memory() {
        const NAME: &str = "OPTIONS";
        let token = BytesStr::from_static(NAME);
        assert_eq!(token.as_str().as_ptr(), NAME.as_ptr());
        assert_eq!(&*token, "OPTIONS");
    }

    #[test]
    fn test_bytes_str_try_from_invalid_utf8() {
        BytesStr::try_from([0xC0].as_ref())
            .expect_err("Unexpectedly valid BytesStr");
    }

    #[test]
    fn test_bytes_str_try_from_valid() {
        let token = BytesStr::try_from(b"PROPFIND".as_ref()).unwrap();
        assert_eq!(token.to_string(), "PROPFIND");
    }
}

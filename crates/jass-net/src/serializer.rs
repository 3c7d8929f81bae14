use crate::error::ProtocolError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

pub fn serialize_u32(value: u32) -> String {
    format!("{value:x}")
}

pub fn serialize_u64(value: u64) -> String {
    format!("{value:x}")
}

pub fn deserialize_u32(text: &str) -> Result<u32, ProtocolError> {
    parse_hex(text).and_then(|value| {
        u32::try_from(value).map_err(|_| ProtocolError::InvalidHex(text.to_string()))
    })
}

pub fn deserialize_u64(text: &str) -> Result<u64, ProtocolError> {
    parse_hex(text)
}

fn parse_hex(text: &str) -> Result<u64, ProtocolError> {
    // from_str_radix accepts a leading '+', the wire format does not
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ProtocolError::InvalidHex(text.to_string()));
    }
    u64::from_str_radix(text, 16).map_err(|_| ProtocolError::InvalidHex(text.to_string()))
}

pub fn serialize_string(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

pub fn deserialize_string(encoded: &str) -> Result<String, ProtocolError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|_| ProtocolError::InvalidText(encoded.to_string()))?;
    String::from_utf8(bytes).map_err(|_| ProtocolError::InvalidText(encoded.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_unsigned_lowercase() {
        assert_eq!(serialize_u32(0xAB), "ab");
        assert_eq!(serialize_u32(u32::MAX), "ffffffff");
        assert_eq!(serialize_u64(0), "0");
        assert_eq!(deserialize_u32("ffffffff").ok(), Some(u32::MAX));
        assert_eq!(deserialize_u64("210002008d0088").ok(), Some(0x0021_0002_008d_0088));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(deserialize_u32("").is_err());
        assert!(deserialize_u32("+1").is_err());
        assert!(deserialize_u32("0x1").is_err());
        assert!(deserialize_u32("100000000").is_err());
    }

    #[test]
    fn names_use_base64_of_utf8() {
        for (name, encoded) in [
            ("Amélie", "QW3DqWxpZQ=="),
            ("Gaëlle", "R2HDq2xsZQ=="),
            ("Émile", "w4ltaWxl"),
            ("Nadège", "TmFkw6hnZQ=="),
        ] {
            assert_eq!(serialize_string(name), encoded);
            assert_eq!(deserialize_string(encoded).ok().as_deref(), Some(name));
        }
        assert!(deserialize_string("not base64!").is_err());
    }
}

//! 256-bit node identifier used as the custody sampling seed. Derived from a
//! node's cryptographic identity (for secp256k1 keys, the keccak256 hash of
//! the uncompressed public key).

use core::fmt;
use core::str::FromStr;

use crate::CustodyError;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId([u8; 32]);

impl NodeId {
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parses a hex numeric string, with or without a `0x` prefix. Strings
    /// shorter than 64 digits are treated as numbers and left-padded with
    /// zeros.
    pub fn from_hex(input: &str) -> Result<Self, CustodyError> {
        let digits = input.strip_prefix("0x").unwrap_or(input);
        if digits.is_empty() || digits.len() > 64 {
            return Err(CustodyError::InvalidIdentifierFormat {
                id: input.to_string(),
                reason: "expected between 1 and 64 hex digits".to_string(),
            });
        }
        let mut padded = [b'0'; 64];
        padded[64 - digits.len()..].copy_from_slice(digits.as_bytes());
        let mut bytes = [0u8; 32];
        const_hex::decode_to_slice(padded, &mut bytes).map_err(|e| {
            CustodyError::InvalidIdentifierFormat {
                id: input.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self(bytes))
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for NodeId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for NodeId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for NodeId {
    type Err = CustodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let hex = const_hex::encode(self.0);
        write!(f, "0x{}..{}", &hex[..4], &hex[hex.len() - 4..])
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", const_hex::encode(self.0))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for NodeId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&format!("0x{}", const_hex::encode(self.0)))
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for NodeId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;
        use serde::Deserialize as _;
        if deserializer.is_human_readable() {
            let s = <std::borrow::Cow<str>>::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(D::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(Self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID_HEX: &str = "5e17a23d36023ab1106e4ef1cd8657f4214f60776a2602a5ea081fcee2c72b88";

    #[test]
    fn parse_with_and_without_prefix() {
        let plain = NodeId::from_hex(ID_HEX).unwrap();
        let prefixed = NodeId::from_hex(&format!("0x{ID_HEX}")).unwrap();
        assert_eq!(plain, prefixed);
        assert_eq!(format!("{plain:?}"), format!("0x{ID_HEX}"));
    }

    #[test]
    fn short_input_is_left_padded() {
        let short = NodeId::from_hex("ff").unwrap();
        let mut expected = [0u8; 32];
        expected[31] = 0xff;
        assert_eq!(short, NodeId::new(expected));
        assert_eq!(short, NodeId::from_hex("0x00ff").unwrap());
    }

    #[test]
    fn display_is_abbreviated() {
        let id = NodeId::from_hex(ID_HEX).unwrap();
        assert_eq!(id.to_string(), "0x5e17..2b88");
    }

    #[test]
    fn rejects_malformed_input() {
        let too_long = "a".repeat(65);
        for input in ["", "0x", "zz", "0xfg00", too_long.as_str()] {
            assert!(matches!(
                NodeId::from_hex(input),
                Err(CustodyError::InvalidIdentifierFormat { .. })
            ));
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_json_roundtrip() {
        let id = NodeId::from_hex(ID_HEX).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"0x{ID_HEX}\""));
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}

//! Serde helpers for the encoded-series format.

/// Serialize pointer positions as integers while accepting either integers
/// or numeric strings on input.
///
/// Earlier producers of the format emitted positions as decimal strings;
/// both spellings denote the same position.
pub mod position {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &usize, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(*value as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<usize, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n as usize),
            Raw::Text(s) => s
                .parse::<usize>()
                .map_err(|_| serde::de::Error::custom(format!("invalid position: {s:?}"))),
        }
    }
}

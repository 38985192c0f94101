//! 标识符反序列化工具
//!
//! Relational rows carry numeric ids (`productId: 42`) while search documents carry
//! string ids (`id: "42"`). Both are normalised to `String`.

use serde::{Deserialize, Deserializer};

/// Deserialize a JSON number or string into a `String` id.
pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        String(String),
        U64(u64),
        I64(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::String(s) => s,
        RawId::U64(n) => n.to_string(),
        RawId::I64(n) => n.to_string(),
    })
}

use std::num::IntErrorKind;

use serde::{Deserialize, Deserializer};

// `?page=abc` is treated like a missing page rather than rejected, while an integer
// too large for i64 saturates so it still lands past the last page
pub fn deserialize_lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }))
}

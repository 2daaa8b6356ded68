//! Devices the backend can drive.

use serde::{Deserialize, Serialize};

use crate::error::NotFoundError;

/// One device reported by discovery, sent back as-is to connect to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub adb_path: String,
    pub address: String,
    pub screencap_methods: MethodMask,
    pub input_methods: MethodMask,
    /// Controller-specific extras, passed through untouched.
    #[serde(default)]
    pub config: serde_json::Map<String, serde_json::Value>,
}

/// Bit set of capture or input methods.
///
/// Discovery reports it as a decimal string, connecting expects a number;
/// both are accepted on input and a number is always written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MethodMaskRepr", into = "u64")]
pub struct MethodMask(pub u64);

#[derive(Deserialize)]
#[serde(untagged)]
enum MethodMaskRepr {
    Number(u64),
    Text(String),
}

impl TryFrom<MethodMaskRepr> for MethodMask {
    type Error = String;

    fn try_from(repr: MethodMaskRepr) -> Result<Self, Self::Error> {
        match repr {
            MethodMaskRepr::Number(bits) => Ok(Self(bits)),
            MethodMaskRepr::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| format!("method mask `{text}` is not a number")),
        }
    }
}

impl From<MethodMask> for u64 {
    fn from(mask: MethodMask) -> Self {
        mask.0
    }
}

/// Pick the device whose name or address equals `key`.
///
/// # Errors
///
/// Returns [`NotFoundError`] when no device matches.
pub fn find_device<'a>(devices: &'a [Device], key: &str) -> Result<&'a Device, NotFoundError> {
    devices
        .iter()
        .find(|device| device.name == key || device.address == key)
        .ok_or_else(|| NotFoundError {
            entity: "device",
            id: key.to_string(),
        })
}

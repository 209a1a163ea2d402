//! Serde adapters for the number and address encodings used by swap aggregators.

use ethers::types::{Address, U256};
use serde::{
    de::{Deserialize, Deserializer},
    ser::Serializer,
};

use crate::utils::{parse_quantity, to_hex_quantity};

/// Integer quantities sent as decimal strings (`"1000000000000000000"`), also
/// tolerating JSON numbers and 0x-hex. Serialized back as minimal hex.
pub mod quantity {
    use super::*;

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_hex_quantity(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => parse_quantity(&s).map_err(serde::de::Error::custom),
            Raw::Number(n) => Ok(U256::from(n)),
        }
    }
}

/// Optional variant of [`quantity`]; `null` or a missing field map to `None`.
pub mod option_quantity {
    use super::*;

    pub fn serialize<S>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(&to_hex_quantity(*v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<U256>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Wrapper(#[serde(with = "super::quantity")] U256);

        Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(v)| v))
    }
}

/// Spender addresses where the zero address means "no approval needed".
pub mod nonzero_address {
    use super::*;

    pub fn serialize<S>(value: &Option<Address>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(addr) => serializer.serialize_some(&format!("{:?}", addr)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Address>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => {
                let addr: Address = s.parse().map_err(serde::de::Error::custom)?;
                Ok((!addr.is_zero()).then_some(addr))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "quantity")]
        value: U256,
        #[serde(default, with = "option_quantity")]
        gas: Option<U256>,
        #[serde(default, with = "nonzero_address")]
        spender: Option<Address>,
    }

    #[test]
    fn test_quantity_accepts_decimal_string_and_number() {
        let s: Sample = serde_json::from_str(r#"{"value":"50000"}"#).unwrap();
        assert_eq!(s.value, U256::from(50_000u64));
        assert_eq!(s.gas, None);
        let s: Sample = serde_json::from_str(r#"{"value":7,"gas":"0x10"}"#).unwrap();
        assert_eq!(s.value, U256::from(7u64));
        assert_eq!(s.gas, Some(U256::from(16u64)));
    }

    #[test]
    fn test_quantity_rejects_garbage() {
        assert!(serde_json::from_str::<Sample>(r#"{"value":"1e18"}"#).is_err());
    }

    #[test]
    fn test_zero_spender_is_none() {
        let s: Sample = serde_json::from_str(
            r#"{"value":"0","spender":"0x0000000000000000000000000000000000000000"}"#,
        )
        .unwrap();
        assert_eq!(s.spender, None);

        let s: Sample = serde_json::from_str(
            r#"{"value":"0","spender":"0xDef1C0ded9bec7F1a1670819833240f027b25EfF"}"#,
        )
        .unwrap();
        assert_eq!(
            format!("{:?}", s.spender.unwrap()),
            "0xdef1c0ded9bec7f1a1670819833240f027b25eff"
        );
    }

    #[test]
    fn test_serialize_as_hex() {
        let s = Sample { value: U256::from(50_000u64), gas: None, spender: None };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["value"], "0xc350");
        assert!(json["gas"].is_null());
    }
}

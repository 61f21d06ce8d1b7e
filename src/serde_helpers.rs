// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Serde helpers for HeaderMap deserialization from ordered pairs.

use hyper::header::{HeaderName, HeaderValue};
use hyper::HeaderMap;
use serde::{Deserialize, Deserializer};

/// Deserialize `[[name, value], ...]` into a `HeaderMap`, keeping order and
/// repeated names.
pub fn deserialize_header_pairs<'de, D>(deserializer: D) -> Result<HeaderMap, D::Error>
where
    D: Deserializer<'de>,
{
    let pairs = Vec::<(String, String)>::deserialize(deserializer)?;
    let mut hm = HeaderMap::with_capacity(pairs.len());
    for (k, v) in pairs {
        let name = HeaderName::from_bytes(k.as_bytes())
            .map_err(|e| serde::de::Error::custom(format!("invalid header name '{}': {}", k, e)))?;
        let val = HeaderValue::from_str(&v)
            .map_err(|e| serde::de::Error::custom(format!("invalid value for header '{}': {}", k, e)))?;
        hm.append(name, val);
    }
    Ok(hm)
}

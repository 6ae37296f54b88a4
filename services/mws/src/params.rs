// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Parameter values and array flattening.

use std::collections::HashMap;

use mwsign_core::time::{format_iso8601_millis, DateTime};

use crate::ArrayPrefixes;

/// Parameters of a single call, keyed by name.
pub type Params = HashMap<String, ParamValue>;

/// Value of a request parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Absent value, dropped before signing.
    Null,
    /// String value.
    String(String),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Boolean value, sent as `true` or `false`.
    Bool(bool),
    /// Array value, must be flattened with [`normalize`] before signing.
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Render a scalar value the way it is sent on the wire.
    ///
    /// Returns `None` for `Null` and `List`.
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            ParamValue::Null | ParamValue::List(_) => None,
            ParamValue::String(v) => Some(v.clone()),
            ParamValue::Int(v) => Some(v.to_string()),
            ParamValue::Float(v) => Some(v.to_string()),
            ParamValue::Bool(v) => Some(v.to_string()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::String(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::String(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v.into())
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(v.into())
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<DateTime> for ParamValue {
    fn from(v: DateTime) -> Self {
        ParamValue::String(format_iso8601_millis(v))
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(v: Vec<T>) -> Self {
        ParamValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ParamValue::Null, Into::into)
    }
}

/// Flatten array parameters into `prefix + index` keys.
///
/// For every key in `prefixes` holding a list, the list is replaced by one
/// entry per element named `prefix` followed by the 1-based index. Keys
/// holding a scalar are left untouched. The input map is not modified.
pub fn normalize(params: &Params, prefixes: &ArrayPrefixes) -> Params {
    if prefixes.is_empty() {
        return params.clone();
    }

    let mut out = Params::with_capacity(params.len());
    for (key, value) in params {
        match (prefixes.get(key), value) {
            (Some(prefix), ParamValue::List(items)) => {
                for (idx, item) in items.iter().enumerate() {
                    out.insert(format!("{prefix}{}", idx + 1), item.clone());
                }
            }
            _ => {
                out.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
    }

    out
}

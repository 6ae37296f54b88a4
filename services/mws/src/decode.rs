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

//! Decode XML response bodies into a `serde_json::Value` tree.
//!
//! - Namespace prefixes are stripped from element names.
//! - Repeated sibling elements collapse into an array.
//! - Attributes, except namespace declarations, are stored under `"$"`.
//! - Text of an element that also has attributes or children is stored under `"_"`.
//! - Leaf text becomes a number only when it is a plain decimal that fits.

use log::debug;
use mwsign_core::{Error, ErrorKind, RemoteResponse, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::constants::ERROR_RESPONSE;

const ATTRS_KEY: &str = "$";
const TEXT_KEY: &str = "_";

#[derive(Default)]
struct Node {
    name: String,
    attrs: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Node {
    fn start(e: &BytesStart) -> Result<Self> {
        let mut node = Node {
            name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
            ..Default::default()
        };

        for attr in e.attributes() {
            let attr = attr.map_err(|err| {
                Error::malformed_response("failed to parse xml attribute").with_source(err)
            })?;
            if attr.key.as_ref().starts_with(b"xmlns") {
                continue;
            }
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|err| {
                Error::malformed_response("failed to unescape xml attribute").with_source(err)
            })?;
            node.attrs.insert(key, Value::String(value.into_owned()));
        }

        Ok(node)
    }

    fn push_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            None => {
                self.children.insert(name, value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }

    fn finish(self) -> (String, Value) {
        if self.attrs.is_empty() && self.children.is_empty() {
            return (self.name, coerce(self.text));
        }

        let mut obj = self.children;
        if !self.attrs.is_empty() {
            obj.insert(ATTRS_KEY.to_string(), Value::Object(self.attrs));
        }
        if !self.text.is_empty() {
            obj.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        (self.name, Value::Object(obj))
    }
}

/// Parse the whole XML document into a tree keyed by the root element name.
pub fn decode_document(body: &str) -> Result<Value> {
    let mut reader = Reader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = reader.read_event().map_err(|err| {
            Error::malformed_response(format!(
                "failed to parse xml at position {}",
                reader.buffer_position()
            ))
            .with_source(err)
        })?;

        match event {
            Event::Start(e) => stack.push(Node::start(&e)?),
            Event::Empty(e) => {
                let (name, value) = Node::start(&e)?.finish();
                attach(&mut stack, &mut root, name, value)?;
            }
            Event::Text(t) => {
                if let Some(node) = stack.last_mut() {
                    let text = t.unescape().map_err(|err| {
                        Error::malformed_response("failed to unescape xml text").with_source(err)
                    })?;
                    node.text.push_str(&text);
                }
            }
            Event::CData(t) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| Error::malformed_response("unexpected closing xml tag"))?;
                let (name, value) = node.finish();
                attach(&mut stack, &mut root, name, value)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::malformed_response("xml document is not closed"));
    }
    let (name, value) = root.ok_or_else(|| Error::malformed_response("xml document is empty"))?;

    let mut tree = Map::new();
    tree.insert(name, value);
    Ok(Value::Object(tree))
}

fn attach(
    stack: &mut [Node],
    root: &mut Option<(String, Value)>,
    name: String,
    value: Value,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.push_child(name, value),
        None if root.is_none() => *root = Some((name, value)),
        None => return Err(Error::malformed_response("xml document has multiple roots")),
    }
    Ok(())
}

/// Return the error envelope carried by `tree`, if any.
///
/// The returned response has status `0`; callers that know the HTTP status
/// fill it in.
pub fn error_envelope(tree: &Value) -> Option<RemoteResponse> {
    let envelope = tree.get(ERROR_RESPONSE)?;

    let error = match envelope.get("Error") {
        Some(Value::Array(items)) => items.first(),
        v => v,
    };
    let field = |v: Option<&Value>, key: &str| v.and_then(|v| v.get(key)).and_then(as_text);

    Some(RemoteResponse {
        status: 0,
        code: field(error, "Code"),
        message: field(error, "Message"),
        request_id: field(Some(envelope), "RequestId"),
    })
}

/// Scan a raw body for an error envelope.
pub(crate) fn parse_error_envelope(body: &[u8]) -> Option<RemoteResponse> {
    // Skip the parser for the common case.
    if !body
        .windows(ERROR_RESPONSE.len())
        .any(|w| w == ERROR_RESPONSE.as_bytes())
    {
        return None;
    }

    let body = String::from_utf8_lossy(body);
    decode_document(&body).ok().as_ref().and_then(error_envelope)
}

/// Decode `body` and return the `{action}Response/{action}Result` subtree.
///
/// An `ErrorResponse` document is reported as `UndefinedRemote` whatever the
/// HTTP status was.
pub fn decode(body: &str, action: &str) -> Result<Value> {
    let mut tree = decode_document(body)?;

    if let Some(resp) = error_envelope(&tree) {
        return Err(Error::new(
            ErrorKind::UndefinedRemote,
            "response carries an error envelope",
        )
        .with_context(format!("action: {action}"))
        .with_response(resp));
    }

    let response_key = format!("{action}Response");
    let result_key = format!("{action}Result");
    match tree
        .get_mut(&response_key)
        .and_then(|v| v.get_mut(&result_key))
    {
        Some(v) => Ok(v.take()),
        None => {
            debug!("decoded response misses {response_key}/{result_key}: {tree}");
            Err(Error::malformed_response(format!(
                "response does not contain {response_key}/{result_key}"
            )))
        }
    }
}

fn as_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Turn leaf text into a number when it is written as a plain decimal.
fn coerce(text: String) -> Value {
    if !is_plain_decimal(&text) {
        return Value::String(text);
    }

    if !text.contains('.') {
        return match text.parse::<i64>() {
            Ok(v) => Value::from(v),
            Err(_) => Value::String(text),
        };
    }
    match text.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(text),
    }
}

/// Match `-?(0|[1-9][0-9]*)(\.[0-9]+)?`.
fn is_plain_decimal(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };

    let int_ok = match int.as_bytes() {
        [b'0'] => true,
        [first, rest @ ..] => (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit),
        [] => false,
    };
    let frac_ok = match frac {
        Some(f) => !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    };

    int_ok && frac_ok
}

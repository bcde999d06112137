// Copyright 2025 RISC Zero, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::abi::MethodDescriptor;
use crate::error::EncodingError;
use alloy::dyn_abi::{DynSolType, DynSolValue};
use alloy::primitives::{hex, keccak256, Bytes, B256, U256};
use log::debug;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Everything the operator decided for one authorization.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub action_id: U256,
    pub method: MethodDescriptor,
    /// Raw operator input keyed by [MethodInput::label](crate::abi::MethodInput::label).
    pub arguments: BTreeMap<String, String>,
}

impl ActionRequest {
    /// ABI encodes the arguments, optionally truncates them and wraps the result.
    pub fn canonical_payload(&self, truncate: bool) -> Result<CanonicalPayload, EncodingError> {
        let encoded = encode_arguments(&self.method, &self.arguments)?;
        debug!("arguments encoding: {}", hex::encode_prefixed(&encoded));

        let arguments = if truncate {
            truncate_zero_bytes(&encoded)
        } else {
            &encoded[..]
        };
        Ok(CanonicalPayload::encode(self.action_id, &self.method.name, arguments))
    }
}

/// Parses an action id entered as decimal or `0x` prefixed hex.
pub fn parse_action_id(text: &str) -> Result<U256, EncodingError> {
    let text = text.trim();
    U256::from_str(text).map_err(|_| EncodingError::ActionId(text.to_string()))
}

/// Encodes the values of all encodable inputs of `method` as function parameters.
pub fn encode_arguments(
    method: &MethodDescriptor,
    arguments: &BTreeMap<String, String>,
) -> Result<Bytes, EncodingError> {
    let mut values = Vec::with_capacity(method.inputs.len());
    for (index, input) in method.encodable_inputs() {
        let label = input.label(index);
        let ty = input.encoding_type();
        let sol_type = DynSolType::parse(&ty).map_err(|source| EncodingError::UnsupportedType {
            param: label.clone(),
            ty: ty.clone(),
            source,
        })?;
        let raw = arguments
            .get(&label)
            .ok_or_else(|| EncodingError::MissingArgument(label.clone()))?;
        let value = sol_type.coerce_str(raw).map_err(|source| EncodingError::Mismatch {
            param: label,
            ty,
            value: raw.clone(),
            source,
        })?;
        values.push(value);
    }

    if values.is_empty() {
        return Ok(Bytes::new());
    }
    Ok(DynSolValue::Tuple(values).abi_encode_params().into())
}

/// Removes trailing `"00"` pairs from a hex string.
///
/// Stops at the first pair that is not `"00"`, or when fewer than two characters remain.
pub fn trim_zero_pairs(hex: &str) -> &str {
    let mut trimmed = hex;
    while trimmed.ends_with("00") {
        trimmed = &trimmed[..trimmed.len() - 2];
    }
    trimmed
}

/// Byte level counterpart of [trim_zero_pairs] on the hex form of `bytes`.
pub fn truncate_zero_bytes(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

/// The `(uint256 actionId, string methodName, bytes arguments)` parameter encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPayload(Bytes);

impl CanonicalPayload {
    pub const LAYOUT: &'static str = "(uint256,string,bytes)";

    pub fn encode(action_id: U256, method_name: &str, arguments: &[u8]) -> Self {
        let tuple = DynSolValue::Tuple(vec![
            DynSolValue::Uint(action_id, 256),
            DynSolValue::String(method_name.to_string()),
            DynSolValue::Bytes(arguments.to_vec()),
        ]);
        Self(tuple.abi_encode_params().into())
    }

    /// Recovers `(actionId, methodName, arguments)` from an encoded payload.
    pub fn decode(data: &[u8]) -> Result<(U256, String, Bytes), EncodingError> {
        let layout = DynSolType::parse(Self::LAYOUT)
            .map_err(|err| EncodingError::Payload(err.to_string()))?;
        let decoded = layout
            .abi_decode_params(data)
            .map_err(|err| EncodingError::Payload(err.to_string()))?;
        match decoded {
            DynSolValue::Tuple(fields) => match fields.as_slice() {
                [
                    DynSolValue::Uint(action_id, 256),
                    DynSolValue::String(name),
                    DynSolValue::Bytes(arguments),
                ] => Ok((*action_id, name.clone(), arguments.clone().into())),
                _ => Err(EncodingError::Payload(format!("unexpected fields {fields:?}"))),
            },
            other => Err(EncodingError::Payload(format!("unexpected value {other:?}"))),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Keccak-256 of the payload; this is what gets signed.
    pub fn digest(&self) -> B256 {
        keccak256(&self.0)
    }
}

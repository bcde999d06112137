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

use crate::error::{Error, Result};
use alloy::json_abi::StateMutability;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Name of the parameter that carries the produced signature itself.
pub const SIGNATURE_PARAM: &str = "_signature";

/// A single ABI entry of type `function`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default = "default_entry_type")]
    pub kind: String,
    /// Legacy flag, dropped from solc output since 0.5.
    #[serde(default)]
    pub constant: Option<bool>,
    #[serde(default)]
    pub state_mutability: Option<StateMutability>,
    #[serde(default)]
    pub inputs: Vec<MethodInput>,
}

/// A declared method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MethodInput {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub components: Vec<MethodInput>,
}

// solc omits `type` for functions in some legacy outputs
fn default_entry_type() -> String {
    "function".to_string()
}

#[derive(Deserialize)]
struct BuildArtifact {
    abi: Vec<MethodDescriptor>,
}

impl MethodDescriptor {
    pub fn is_function(&self) -> bool {
        self.kind == "function"
    }

    /// Whether the method cannot change contract state.
    ///
    /// Falls back to `stateMutability` when the legacy `constant` field is absent. Entries
    /// carrying neither are considered constant.
    pub fn is_constant(&self) -> bool {
        match (self.constant, self.state_mutability) {
            (Some(constant), _) => constant,
            (None, Some(mutability)) => {
                matches!(mutability, StateMutability::View | StateMutability::Pure)
            }
            (None, None) => true,
        }
    }

    /// The `name(type,...)` signature over every declared input, `_signature` included.
    ///
    /// Unlike the name it tells overloads apart.
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, join_types(&self.inputs))
    }

    /// Inputs the operator must supply, in declared order.
    pub fn encodable_inputs(&self) -> impl Iterator<Item = (usize, &MethodInput)> {
        self.inputs
            .iter()
            .enumerate()
            .filter(|(_, input)| input.name != SIGNATURE_PARAM)
    }
}

impl MethodInput {
    /// The canonical type string used for encoding, with tuples expanded to their components.
    pub fn encoding_type(&self) -> String {
        match self.ty.strip_prefix("tuple") {
            Some(suffix) => format!("({}){suffix}", join_types(&self.components)),
            None => self.ty.clone(),
        }
    }

    /// The key under which the value of this input is collected.
    pub fn label(&self, index: usize) -> String {
        if self.name.is_empty() {
            format!("arg{index}")
        } else {
            self.name.clone()
        }
    }
}

fn join_types(inputs: &[MethodInput]) -> String {
    let types: Vec<_> = inputs.iter().map(MethodInput::encoding_type).collect();
    types.join(",")
}

/// Parses an ABI document and returns its mutating functions in document order.
///
/// With `artifact` set the document is a build artifact holding the ABI array under `abi`.
pub fn parse_methods(json: &str, artifact: bool) -> Result<Vec<MethodDescriptor>> {
    let entries: Vec<MethodDescriptor> = if artifact {
        serde_json::from_str::<BuildArtifact>(json)?.abi
    } else {
        serde_json::from_str(json)?
    };
    let total = entries.len();

    let methods: Vec<_> = entries
        .into_iter()
        .filter(|entry| entry.is_function() && !entry.is_constant())
        .collect();
    debug!("{} of {total} ABI entries are mutating", methods.len());

    Ok(methods)
}

/// Reads the ABI document at `path`, see [parse_methods].
pub fn load_methods(path: impl AsRef<Path>, artifact: bool) -> Result<Vec<MethodDescriptor>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_methods(&json, artifact)
}

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

use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ABI document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("invalid private key: {0}")]
    Signing(String),

    #[error("the ABI declares no mutating methods")]
    NoMethods,
}

/// Failures while turning operator input into ABI encoded bytes.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("unsupported type `{ty}` of parameter `{param}`: {source}")]
    UnsupportedType {
        param: String,
        ty: String,
        #[source]
        source: alloy::dyn_abi::Error,
    },

    #[error("value {value:?} does not match type `{ty}` of parameter `{param}`: {source}")]
    Mismatch {
        param: String,
        ty: String,
        value: String,
        #[source]
        source: alloy::dyn_abi::Error,
    },

    #[error("no value supplied for parameter `{0}`")]
    MissingArgument(String),

    #[error("action id {0:?} is not an unsigned integer")]
    ActionId(String),

    #[error("payload does not decode as (uint256,string,bytes): {0}")]
    Payload(String),
}

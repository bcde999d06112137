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

//! Building blocks for producing off-chain authorizations of contract method calls.
//!
//! The flow is linear: [abi::load_methods] yields the mutating methods of a contract,
//! [encode::ActionRequest::canonical_payload] serializes the chosen call and
//! [signer::ActionSigner::sign] signs its Keccak-256 digest.

pub mod abi;
pub mod encode;
pub mod error;
pub mod signer;

pub use abi::{MethodDescriptor, MethodInput, SIGNATURE_PARAM};
pub use encode::{ActionRequest, CanonicalPayload};
pub use error::{EncodingError, Error, Result};
pub use signer::{ActionSigner, SignedAction};

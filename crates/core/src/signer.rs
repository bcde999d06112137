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

use crate::encode::CanonicalPayload;
use crate::error::{Error, Result};
use alloy::primitives::{eip191_hash_message, hex, Address, Signature, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

/// Signs canonical payloads with a local secp256k1 key.
#[derive(Clone, Debug)]
pub struct ActionSigner(PrivateKeySigner);

impl ActionSigner {
    /// Parses a hex encoded 32-byte key, with or without `0x` and surrounding whitespace.
    pub fn from_key_text(text: &str) -> Result<Self> {
        let text = text.trim();
        let text = text.strip_prefix("0x").unwrap_or(text);
        let bytes = hex::decode(text)
            .map_err(|err| Error::Signing(err.to_string()))?;
        if bytes.len() != 32 {
            return Err(Error::Signing(format!("expected 32 bytes, got {}", bytes.len())));
        }
        let signer = PrivateKeySigner::from_bytes(&B256::from_slice(&bytes))
            .map_err(|err| Error::Signing(err.to_string()))?;
        Ok(Self(signer))
    }

    /// Reads the key from a text file, see [ActionSigner::from_key_text].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_key_text(&text)
    }

    pub fn address(&self) -> Address {
        self.0.address()
    }

    /// Signs the Keccak-256 digest of `payload` as an Ethereum personal message.
    pub fn sign(&self, payload: &CanonicalPayload) -> Result<SignedAction> {
        let digest = payload.digest();
        let signature = self
            .0
            .sign_message_sync(digest.as_slice())
            .map_err(|err| Error::Signing(err.to_string()))?;

        Ok(SignedAction {
            digest,
            message_hash: eip191_hash_message(digest),
            signature,
        })
    }
}

/// A signature over a canonical payload together with the hashes it commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignedAction {
    /// Keccak-256 of the canonical payload.
    pub digest: B256,
    /// EIP-191 hash of `digest`; the value the ECDSA signature is computed over.
    pub message_hash: B256,
    pub signature: Signature,
}

impl SignedAction {
    pub fn r(&self) -> U256 {
        self.signature.r()
    }

    pub fn s(&self) -> U256 {
        self.signature.s()
    }

    /// Recovery id in its legacy `27`/`28` form.
    pub fn v(&self) -> u8 {
        27 + self.signature.v().y_parity() as u8
    }

    /// The `r || s || v` serialization expected by `ecrecover` based verifiers.
    pub fn to_bytes(&self) -> [u8; 65] {
        let r = self.r().to_be_bytes::<32>();
        let s = self.s().to_be_bytes::<32>();
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(&r);
        bytes[32..64].copy_from_slice(&s);
        bytes[64] = self.v();
        bytes
    }

    /// Recovers the address of the key that produced the signature.
    pub fn recover(&self) -> Result<Address> {
        self.signature
            .recover_address_from_msg(self.digest.as_slice())
            .map_err(|err| Error::Signing(err.to_string()))
    }
}

impl Display for SignedAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode_prefixed(self.to_bytes()))
    }
}

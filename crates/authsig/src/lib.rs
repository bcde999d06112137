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

use crate::cli::Cli;
use crate::collect::collect_request;
use crate::config::Config;
use crate::prompt::{Prompt, Terminal};
use alloy::primitives::hex;
use anyhow::Context;
use authsig_core::abi::load_methods;
use authsig_core::{ActionSigner, Error, SignedAction};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use std::io::{self, Write};

pub mod cli;
pub mod collect;
pub mod config;
pub mod prompt;

pub fn run() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut out = io::stdout().lock();
    execute(&cli, &mut Terminal::stdio(), &mut out)
}

/// Prints the help when no ABI file is given, otherwise authorizes and prints the signature.
pub fn execute(cli: &Cli, prompt: &mut impl Prompt, out: &mut impl Write) -> anyhow::Result<()> {
    let Some(config) = Config::from_cli(cli) else {
        write!(out, "{}", Cli::command().render_help())?;
        return Ok(());
    };

    let signed = authorize(&config, prompt)?;
    write_signature(out, &signed)?;
    Ok(())
}

/// Runs the whole pipeline: load the key and ABI, ask the operator, encode and sign.
pub fn authorize(config: &Config, prompt: &mut impl Prompt) -> anyhow::Result<SignedAction> {
    let key_path = config
        .private_key
        .as_ref()
        .context("no private key file given")?;
    let signer = ActionSigner::load(key_path)?;

    let methods = load_methods(&config.abi, config.artifact)?;
    let abi = config.abi.display();
    info!("Loaded {} mutating methods from {abi}.", methods.len());

    let request = collect_request(prompt, &methods, &config.presets)?;
    info!(
        "Authorizing `{}` with action id {}.",
        request.method.signature(),
        request.action_id
    );

    let payload = request
        .canonical_payload(config.truncate)
        .map_err(Error::from)?;
    debug!(
        "canonical payload: {}",
        hex::encode_prefixed(payload.as_bytes())
    );

    let signed = signer.sign(&payload)?;
    info!("Signed {} with {}.", signed.digest, signer.address());
    Ok(signed)
}

/// Prints the `_signature` block the way operators copy it into a transaction.
pub fn write_signature(out: &mut impl Write, signed: &SignedAction) -> io::Result<()> {
    writeln!(out, "\n_signature:\n{signed}\n")?;
    out.flush()
}

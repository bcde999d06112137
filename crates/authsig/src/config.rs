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
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Immutable settings of a single run, folded from the command line once.
#[derive(Debug, Clone)]
pub struct Config {
    pub abi: PathBuf,
    pub private_key: Option<PathBuf>,
    /// The ABI file is a build artifact.
    pub artifact: bool,
    pub truncate: bool,
    pub presets: Presets,
}

/// Answers given up front; every preset skips the matching prompt.
#[derive(Debug, Clone, Default)]
pub struct Presets {
    pub action_id: Option<String>,
    pub method: Option<String>,
    pub arguments: BTreeMap<String, String>,
}

impl Config {
    /// Returns `None` when no ABI file was given, there is nothing to do then.
    pub fn from_cli(cli: &Cli) -> Option<Self> {
        let abi = cli.abi.clone()?;
        Some(Self {
            abi,
            private_key: cli.private_key.clone(),
            artifact: cli.truffle,
            truncate: cli.truncate,
            presets: Presets {
                action_id: cli.action_id.clone(),
                method: cli.method.clone(),
                // later assignments of the same name win
                arguments: cli.args.iter().cloned().collect(),
            },
        })
    }

    pub fn new(abi: impl Into<PathBuf>, private_key: impl Into<PathBuf>) -> Self {
        Self {
            abi: abi.into(),
            private_key: Some(private_key.into()),
            artifact: false,
            truncate: false,
            presets: Presets::default(),
        }
    }
}

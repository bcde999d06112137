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

#[derive(clap::Parser, Debug, Clone)]
#[command(name = "authsig")]
#[command(bin_name = "authsig")]
#[command(author, version, about, long_about = None)]
/// Sign an authorization for a contract method call
pub struct Cli {
    #[clap(long = "privateKey", alias = "private-key", value_name = "PATH")]
    /// Path to a text file containing the private key
    pub private_key: Option<PathBuf>,

    #[clap(long, value_name = "PATH")]
    /// Path to the JSON file with the contract ABI (required)
    pub abi: Option<PathBuf>,

    #[clap(long, default_value_t = false)]
    /// Treat the ABI file as a Truffle build artifact with the ABI under `abi`
    pub truffle: bool,

    #[clap(long, default_value_t = false)]
    /// Strip trailing zero bytes from the encoded arguments before signing
    pub truncate: bool,

    #[clap(long, value_name = "ID")]
    /// Action id to sign, skips the prompt
    pub action_id: Option<String>,

    #[clap(long, value_name = "METHOD")]
    /// Method to authorize, as a name or a full `name(type,...)` signature; skips the prompt
    pub method: Option<String>,

    #[clap(long = "arg", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    /// Value of a method parameter, skips its prompt; may be repeated
    pub args: Vec<(String, String)>,
}

fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got `{arg}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rstest::rstest;

    #[test]
    fn original_flag_names() {
        let cli = Cli::try_parse_from([
            "authsig",
            "--privateKey",
            "key.txt",
            "--abi",
            "Token.json",
            "--truffle",
        ])
        .unwrap();
        assert_eq!(cli.private_key, Some(PathBuf::from("key.txt")));
        assert_eq!(cli.abi, Some(PathBuf::from("Token.json")));
        assert!(cli.truffle);
        assert!(!cli.truncate);
    }

    #[test]
    fn repeated_args() {
        let cli = Cli::try_parse_from([
            "authsig",
            "--private-key=key.txt",
            "--arg",
            "_to=0x01",
            "--arg=_data=a=b",
        ])
        .unwrap();
        let expected = [
            ("_to".to_string(), "0x01".to_string()),
            ("_data".to_string(), "a=b".to_string()),
        ];
        assert_eq!(cli.args, expected);
        assert_eq!(cli.abi, None);
    }

    #[rstest]
    #[case("=1")]
    #[case("novalue")]
    fn rejects_malformed_arg(#[case] arg: &str) {
        assert!(Cli::try_parse_from(["authsig", "--arg", arg]).is_err());
    }
}

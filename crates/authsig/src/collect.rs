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

use crate::config::Presets;
use crate::prompt::Prompt;
use anyhow::{bail, Context};
use authsig_core::encode::parse_action_id;
use authsig_core::{ActionRequest, Error, MethodDescriptor};
use log::warn;
use std::collections::BTreeMap;

/// Asks for the action id, the method and its arguments, in that order.
///
/// Values present in `presets` are taken as given. Argument text is not checked against the
/// declared types here, that happens when the request is encoded.
pub fn collect_request(
    prompt: &mut impl Prompt,
    methods: &[MethodDescriptor],
    presets: &Presets,
) -> anyhow::Result<ActionRequest> {
    let action_id = match &presets.action_id {
        Some(text) => text.clone(),
        None => prompt
            .input("actionId")
            .context("failed to read the action id")?,
    };
    let action_id = parse_action_id(&action_id).map_err(Error::from)?;

    let method = choose_method(prompt, methods, presets.method.as_deref())?;

    let mut arguments = BTreeMap::new();
    for (index, input) in method.encodable_inputs() {
        let label = input.label(index);
        let value = match presets.arguments.get(&label) {
            Some(value) => value.clone(),
            None => prompt
                .input(&format!("{label} ({})", input.encoding_type()))
                .with_context(|| format!("failed to read a value for `{label}`"))?,
        };
        arguments.insert(label, value);
    }
    for name in presets.arguments.keys() {
        if !arguments.contains_key(name) {
            warn!("`{}` has no parameter `{name}`, ignoring it", method.name);
        }
    }

    Ok(ActionRequest {
        action_id,
        method: method.clone(),
        arguments,
    })
}

fn choose_method<'a>(
    prompt: &mut impl Prompt,
    methods: &'a [MethodDescriptor],
    preset: Option<&str>,
) -> anyhow::Result<&'a MethodDescriptor> {
    if let Some(preset) = preset {
        return find_method(methods, preset);
    }

    let signatures: Vec<_> = methods.iter().map(MethodDescriptor::signature).collect();
    let choices: Vec<_> = signatures.iter().map(String::as_str).collect();
    let index = prompt
        .select("method", &choices)
        .context("failed to read the method choice")?;
    match index {
        Some(index) => Ok(&methods[index]),
        None => Err(Error::NoMethods.into()),
    }
}

/// Resolves a preset given as a full `name(type,...)` signature or as a name without overloads.
fn find_method<'a>(
    methods: &'a [MethodDescriptor],
    preset: &str,
) -> anyhow::Result<&'a MethodDescriptor> {
    if preset.contains('(') {
        return methods
            .iter()
            .find(|method| method.signature() == preset)
            .with_context(|| format!("the ABI has no mutating method `{preset}`"));
    }

    let overloads: Vec<_> = methods
        .iter()
        .filter(|method| method.name == preset)
        .collect();
    match overloads.as_slice() {
        [method] => Ok(*method),
        [] => bail!("the ABI has no mutating method named `{preset}`"),
        _ => {
            let signatures: Vec<_> = overloads.iter().map(|method| method.signature()).collect();
            let candidates = signatures.join(", ");
            bail!("`{preset}` is overloaded, use one of {candidates}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;
    use authsig_core::abi::parse_methods;
    use rstest::rstest;
    use std::collections::VecDeque;

    const RECIPIENT: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

    /// Replays canned answers and records every question.
    #[derive(Default)]
    struct Scripted {
        answers: VecDeque<&'static str>,
        asked: Vec<String>,
        offered: Vec<Vec<String>>,
    }

    impl Scripted {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                ..Default::default()
            }
        }

        fn next_answer(&mut self) -> &'static str {
            self.answers.pop_front().expect("unexpected question")
        }
    }

    impl Prompt for Scripted {
        fn input(&mut self, message: &str) -> std::io::Result<String> {
            self.asked.push(message.to_string());
            Ok(self.next_answer().to_string())
        }

        fn select(&mut self, message: &str, choices: &[&str]) -> std::io::Result<Option<usize>> {
            self.asked.push(message.to_string());
            let choices: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
            let empty = choices.is_empty();
            self.offered.push(choices);
            if empty {
                return Ok(None);
            }
            Ok(Some(self.next_answer().parse().unwrap()))
        }
    }

    fn methods() -> Vec<MethodDescriptor> {
        parse_methods(
            r#"[
            {"constant": true, "name": "owner", "type": "function", "inputs": []},
            {"constant": false, "name": "transfer", "type": "function", "inputs": [
                {"name": "_to", "type": "address"}, {"name": "_value", "type": "uint256"},
                {"name": "_signature", "type": "bytes"}]},
            {"stateMutability": "nonpayable", "name": "setFlag", "type": "function", "inputs": [
                {"name": "", "type": "bool"}, {"name": "_signature", "type": "bytes"}]}
        ]"#,
            false,
        )
        .unwrap()
    }

    fn overloads() -> Vec<MethodDescriptor> {
        parse_methods(
            r#"[
            {"stateMutability": "nonpayable", "name": "safeTransferFrom", "type": "function",
             "inputs": [{"name": "from", "type": "address"}, {"name": "to", "type": "address"},
                        {"name": "tokenId", "type": "uint256"}]},
            {"stateMutability": "nonpayable", "name": "safeTransferFrom", "type": "function",
             "inputs": [{"name": "from", "type": "address"}, {"name": "to", "type": "address"},
                        {"name": "tokenId", "type": "uint256"}, {"name": "data", "type": "bytes"}]}
        ]"#,
            false,
        )
        .unwrap()
    }

    fn collect(prompt: &mut Scripted, presets: &Presets) -> anyhow::Result<ActionRequest> {
        collect_request(prompt, &methods(), presets)
    }

    fn method_preset(method: &str) -> Presets {
        Presets {
            method: Some(method.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn asks_in_order_and_skips_signature() {
        let mut prompt = Scripted::new(&["12", "0", RECIPIENT, "100"]);
        let request = collect(&mut prompt, &Presets::default()).unwrap();

        assert_eq!(
            prompt.asked,
            ["actionId", "method", "_to (address)", "_value (uint256)"]
        );
        assert_eq!(prompt.offered.len(), 1);
        assert_eq!(
            prompt.offered[0],
            ["transfer(address,uint256,bytes)", "setFlag(bool,bytes)"]
        );
        assert_eq!(request.action_id, U256::from(12));
        assert_eq!(request.method.name, "transfer");
        assert_eq!(request.arguments["_value"], "100");
        assert!(!request.arguments.contains_key("_signature"));
    }

    #[test]
    fn unnamed_parameters_use_positional_labels() {
        let mut prompt = Scripted::new(&["1", "1", "true"]);
        let request = collect(&mut prompt, &Presets::default()).unwrap();
        assert_eq!(prompt.asked.last().unwrap(), "arg0 (bool)");
        assert_eq!(request.arguments["arg0"], "true");
    }

    #[test]
    fn tuple_parameters_show_component_types() {
        let abi = parse_methods(
            r#"[{"constant": false, "name": "fill", "type": "function", "inputs": [
                {"name": "order", "type": "tuple", "components": [
                    {"name": "maker", "type": "address"}, {"name": "amount", "type": "uint256"}]}
            ]}]"#,
            false,
        )
        .unwrap();
        let mut prompt = Scripted::new(&["1", "0", "(0x01,2)"]);
        let presets = Presets::default();
        collect_request(&mut prompt, &abi, &presets).unwrap();
        assert_eq!(prompt.asked[2], "order ((address,uint256))");
    }

    #[test]
    fn presets_skip_prompts() {
        let mut arguments = BTreeMap::new();
        arguments.insert("_to".to_string(), RECIPIENT.to_string());
        let presets = Presets {
            action_id: Some("3".into()),
            method: Some("transfer".into()),
            arguments,
        };
        let mut prompt = Scripted::new(&["5"]);
        let request = collect(&mut prompt, &presets).unwrap();
        assert_eq!(prompt.asked, ["_value (uint256)"]);
        assert_eq!(request.action_id, U256::from(3));
        assert_eq!(request.arguments.len(), 2);
    }

    #[rstest]
    #[case("owner")]
    #[case("transfer(address,uint256)")]
    fn unknown_preset_method(#[case] method: &str) {
        let mut prompt = Scripted::new(&["1"]);
        assert!(collect(&mut prompt, &method_preset(method)).is_err());
    }

    #[test]
    fn preset_signature_matches_a_method() {
        let mut prompt = Scripted::new(&["1", RECIPIENT, "7"]);
        let presets = method_preset("transfer(address,uint256,bytes)");
        let request = collect(&mut prompt, &presets).unwrap();
        assert_eq!(request.method.name, "transfer");
    }

    #[test]
    fn overloaded_preset_name_is_ambiguous() {
        let mut prompt = Scripted::new(&["1"]);
        let presets = method_preset("safeTransferFrom");
        let abi = overloads();
        let err = collect_request(&mut prompt, &abi, &presets).unwrap_err();
        assert_eq!(
            err.to_string(),
            "`safeTransferFrom` is overloaded, use one of \
             safeTransferFrom(address,address,uint256), \
             safeTransferFrom(address,address,uint256,bytes)"
        );
        assert_eq!(prompt.asked, ["actionId"]);
    }

    #[test]
    fn preset_signature_picks_the_overload() {
        let mut prompt = Scripted::new(&["1", RECIPIENT, RECIPIENT, "7", "0xbeef"]);
        let presets = method_preset("safeTransferFrom(address,address,uint256,bytes)");
        let abi = overloads();
        let request = collect_request(&mut prompt, &abi, &presets).unwrap();
        assert_eq!(request.method.inputs.len(), 4);
        assert_eq!(request.arguments["data"], "0xbeef");
        assert_eq!(prompt.asked.last().unwrap(), "data (bytes)");
    }

    #[test]
    fn overloads_are_offered_by_signature() {
        let mut prompt = Scripted::new(&["1", "0", RECIPIENT, RECIPIENT, "7"]);
        let presets = Presets::default();
        let abi = overloads();
        let request = collect_request(&mut prompt, &abi, &presets).unwrap();
        let expected = [
            "safeTransferFrom(address,address,uint256)",
            "safeTransferFrom(address,address,uint256,bytes)",
        ];
        assert_eq!(prompt.offered[0], expected);
        assert_eq!(request.method.inputs.len(), 3);
    }

    #[test]
    fn empty_method_list_is_presented() {
        let mut prompt = Scripted::new(&["1"]);
        let presets = Presets::default();
        let err = collect_request(&mut prompt, &[], &presets).unwrap_err();
        assert_eq!(prompt.offered, [Vec::<String>::new()]);
        assert!(
            matches!(err.downcast_ref::<Error>(), Some(Error::NoMethods)),
            "{err:?}"
        );
    }

    #[test]
    fn invalid_action_id() {
        let mut prompt = Scripted::new(&["first"]);
        let err = collect(&mut prompt, &Presets::default()).unwrap_err();
        assert!(
            matches!(err.downcast_ref::<Error>(), Some(Error::Encoding(_))),
            "{err:?}"
        );
    }
}

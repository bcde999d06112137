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

use std::io::{self, BufRead, Stderr, StdinLock, Write};

/// Source of operator answers.
pub trait Prompt {
    /// Asks for a line of free text.
    fn input(&mut self, message: &str) -> io::Result<String>;

    /// Asks to pick one of `choices` and returns its index, `None` if there is nothing to pick.
    fn select(&mut self, message: &str, choices: &[&str]) -> io::Result<Option<usize>>;
}

/// Line based prompt; questions go to `output`, answers are read from `input`.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<StdinLock<'static>, Stderr> {
    /// Reads stdin and writes to stderr, keeping stdout for the result.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no answer on input"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl<R: BufRead, W: Write> Prompt for Terminal<R, W> {
    fn input(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "? {message}: ")?;
        self.output.flush()?;
        self.read_answer()
    }

    fn select(&mut self, message: &str, choices: &[&str]) -> io::Result<Option<usize>> {
        writeln!(self.output, "? {message}:")?;
        if choices.is_empty() {
            writeln!(self.output, "  (no choices)")?;
            return Ok(None);
        }
        for (index, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {}) {choice}", index + 1)?;
        }

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let answer = self.read_answer()?;
            let answer = answer.trim();

            let by_number = answer
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=choices.len()).contains(n));
            if let Some(number) = by_number {
                return Ok(Some(number - 1));
            }
            if let Some(index) = match_choice(choices, answer) {
                return Ok(Some(index));
            }
            writeln!(
                self.output,
                "  answer with a number from 1 to {} or a unique name",
                choices.len()
            )?;
        }
    }
}

/// Finds the choice equal to `answer`, or else the only one whose text before `(` is `answer`.
fn match_choice(choices: &[&str], answer: &str) -> Option<usize> {
    if let Some(index) = choices.iter().position(|choice| *choice == answer) {
        return Some(index);
    }
    let mut named = choices
        .iter()
        .enumerate()
        .filter(|(_, choice)| choice.split('(').next() == Some(answer));
    match (named.next(), named.next()) {
        (Some((index, _)), None) => Some(index),
        _ => None,
    }
}

// Copyright 2025 Fernando Borretti
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

use std::io::BufRead;
use std::io::Write;

use crate::error::Fallible;

/// Line-oriented terminal input. `None` means the input ended.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> Fallible<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Print `prompt` and read one line, without the line ending.
    pub fn line(&mut self, prompt: &str) -> Fallible<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Read lines until one that is just `.`, or the end of input.
    pub fn multiline(&mut self, prompt: &str) -> Fallible<Option<String>> {
        writeln!(self.output, "{prompt} (finish with a line containing only '.')")?;
        let mut lines: Vec<String> = Vec::new();
        loop {
            let mut buf = String::new();
            if self.input.read_line(&mut buf)? == 0 {
                if lines.is_empty() {
                    return Ok(None);
                }
                break;
            }
            let line = buf.trim_end_matches(['\n', '\r']);
            if line == "." {
                break;
            }
            lines.push(line.to_string());
        }
        Ok(Some(lines.join("\n")))
    }

    /// Ask a yes/no question. Anything but `y`/`yes` is no; end of input is
    /// no.
    pub fn confirm(&mut self, question: &str) -> Fallible<bool> {
        match self.line(&format!("{question} [y/N] "))? {
            Some(answer) => Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")),
            None => Ok(false),
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_line() -> Fallible<()> {
        let mut p = Prompter::new(Cursor::new("hello\r\n"), Vec::new());
        assert_eq!(p.line("> ")?, Some("hello".to_string()));
        assert_eq!(p.line("> ")?, None);
        assert_eq!(String::from_utf8_lossy(&p.into_output()), "> > ");
        Ok(())
    }

    #[test]
    fn test_multiline() -> Fallible<()> {
        let mut p = Prompter::new(Cursor::new("one\n\ntwo\n.\nrest\n"), Vec::new());
        assert_eq!(p.multiline("Q")?, Some("one\n\ntwo".to_string()));
        // End of input finishes the block too.
        assert_eq!(p.multiline("Q")?, Some("rest".to_string()));
        assert_eq!(p.multiline("Q")?, None);
        Ok(())
    }

    #[test]
    fn test_confirm() -> Fallible<()> {
        let mut p = Prompter::new(Cursor::new("y\nno\nYES\n"), Vec::new());
        assert!(p.confirm("ok?")?);
        assert!(!p.confirm("ok?")?);
        assert!(p.confirm("ok?")?);
        assert!(!p.confirm("ok?")?);
        Ok(())
    }
}

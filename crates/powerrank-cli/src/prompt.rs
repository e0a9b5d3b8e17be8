// Line-based console prompting.
//
// Generic over the reader and writer so tests can drive it with in-memory
// buffers instead of a terminal.

use std::io::{self, BufRead, Write};

use powerrank_core::attendance::parse_absent_list;
use powerrank_core::member::{Member, Stat, StatLine};
use powerrank_core::update::{parse_delta, DeltaSource, UpdateError};

pub const ABSENT_PROMPT: &str = "Absent, please separate by commas: ";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Writer for non-prompt output (team sheets, banners).
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print `prompt` without a newline and read one line. Returns `None`
    /// once the input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask for the absent list. Closed input counts as nobody absent.
    pub fn read_absent_list(&mut self) -> io::Result<Vec<String>> {
        let line = self.ask(ABSENT_PROMPT)?.unwrap_or_default();
        Ok(parse_absent_list(&line))
    }
}

impl<R: BufRead, W: Write> DeltaSource for Prompter<R, W> {
    fn deltas_for(&mut self, member: &Member) -> Result<StatLine, UpdateError> {
        let io_err = |source: io::Error| UpdateError::Io {
            member: member.name.clone(),
            source,
        };

        writeln!(self.output, "Update stats for {}:", member.name).map_err(io_err)?;

        let mut values = [0i64; 6];
        for (slot, stat) in values.iter_mut().zip(Stat::ALL) {
            let answer = self
                .ask(&format!("{stat} change: "))
                .map_err(io_err)?
                .ok_or_else(|| UpdateError::InputClosed {
                    member: member.name.clone(),
                })?;
            *slot = parse_delta(&member.name, stat, &answer)?;
        }
        Ok(StatLine::from_ordered(values))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

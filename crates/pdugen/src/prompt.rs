//! Interactive prompting for device parameters.
//!
//! Prompts go to stderr so that the generated script can be redirected
//! from stdout.

use std::io::{self, BufRead, Write};
use tracing::warn;

use pdu_cfgmgr_common::{PduCfgError, PduCfgResult};

/// Line-based question/answer session over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompter reading stdin and writing to stderr
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks a question and returns the trimmed answer.
    ///
    /// End of input is an error: there is nobody left to answer.
    pub fn ask(&mut self, label: &str) -> PduCfgResult<String> {
        let terminal = |source: io::Error| PduCfgError::Terminal {
            field: label.to_string(),
            source,
        };

        write!(self.output, "{}: ", label).map_err(terminal)?;
        self.output.flush().map_err(terminal)?;

        let mut answer = String::new();
        let read = self.input.read_line(&mut answer).map_err(terminal)?;
        if read == 0 {
            return Err(PduCfgError::InputClosed {
                field: label.to_string(),
            });
        }
        Ok(answer.trim().to_string())
    }

    /// Asks until `parse` accepts the answer.
    ///
    /// Recoverable errors (bad configuration choices) are shown and the
    /// question is repeated; anything else is returned.
    pub fn ask_until<T, F>(&mut self, label: &str, parse: F) -> PduCfgResult<T>
    where
        F: Fn(&str) -> PduCfgResult<T>,
    {
        loop {
            let answer = self.ask(label)?;
            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_recoverable() => {
                    warn!(field = %label, answer = %answer, "Rejected answer");
                    self.say(&format!("❌ {}", e))?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Consumes the prompter, returning its reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Writes an informational line.
    pub fn say(&mut self, message: &str) -> PduCfgResult<()> {
        writeln!(self.output, "{}", message).map_err(|source| PduCfgError::Terminal {
            field: "message".to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdu_types::PsuCount;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_trims_answer() {
        let mut p = prompter("  pdu-r1a \n");
        assert_eq!(p.ask("Enter PDU name").unwrap(), "pdu-r1a");
        assert_eq!(String::from_utf8(p.output).unwrap(), "Enter PDU name: ");
    }

    #[test]
    fn test_ask_input_closed() {
        let mut p = prompter("");
        assert!(matches!(
            p.ask("Enter PDU IP"),
            Err(PduCfgError::InputClosed { .. })
        ));
    }

    #[test]
    fn test_ask_until_reprompts_on_recoverable_error() {
        let mut p = prompter("five\n3\n4\n");
        let psu = p
            .ask_until("Enter number of PSUs per server (2/4/6)", |s| {
                s.parse::<PsuCount>().map_err(PduCfgError::from)
            })
            .unwrap();
        assert_eq!(psu, PsuCount::Four);

        let transcript = String::from_utf8(p.output).unwrap();
        assert_eq!(transcript.matches("Enter number of PSUs").count(), 3);
        assert_eq!(transcript.matches("❌").count(), 2);
    }

    #[test]
    fn test_ask_until_gives_up_at_end_of_input() {
        let mut p = prompter("v9\n");
        let result = p.ask_until("Enter fabric version (v2/v3)", |s| {
            s.parse::<pdu_types::FabricVersion>()
                .map_err(PduCfgError::from)
        });
        assert!(matches!(result, Err(PduCfgError::InputClosed { .. })));
    }

    #[test]
    fn test_ask_until_returns_fatal_error() {
        let mut p = prompter("anything\n");
        let result: PduCfgResult<()> = p.ask_until("Enter value", |_| {
            Err(PduCfgError::ports_exhausted("srv1", 3, 0))
        });
        assert!(matches!(result, Err(PduCfgError::PortsExhausted { .. })));
    }
}

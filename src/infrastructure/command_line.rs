#[cfg(test)]
#[path = "command_line_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

/// A configured external program, such as a recorder or speech synthesizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Splits on whitespace. Quoting is not supported, wrap anything more
    /// involved in a script.
    pub fn parse(text: &str) -> Result<CommandLine> {
        let mut parts = text.split_whitespace().map(|part| return part.to_string());
        let program = match parts.next() {
            Some(program) => program,
            None => bail!("Command is empty"),
        };

        return Ok(CommandLine {
            program,
            args: parts.collect(),
        });
    }

    pub fn to_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        return cmd;
    }
}

//! Templated external commands.

use std::process::Command;

use tracing::debug;

/// An argv template whose `{placeholder}` tokens are filled per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    argv: Vec<String>,
}

impl CommandTemplate {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }

    /// Substitute every `{key}` in every argument.
    pub fn fill(&self, vars: &[(&str, &str)]) -> Vec<String> {
        self.argv
            .iter()
            .map(|arg| {
                vars.iter().fold(arg.clone(), |acc, (key, value)| {
                    acc.replace(&format!("{{{}}}", key), value)
                })
            })
            .collect()
    }

    /// Fill and run the command, returning a message on spawn failure or non-zero exit.
    pub fn run(&self, vars: &[(&str, &str)]) -> Result<(), String> {
        let argv = self.fill(vars);
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| "empty command".to_string())?;

        debug!(program = %program, args = ?args, "Running external command");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|err| format!("spawn {}: {}", program, err))?;

        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            stderr.trim()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(args: &[&str]) -> CommandTemplate {
        CommandTemplate::new(args.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_fill_placeholders() {
        let t = template(&["kgx", "--output={output}", "{input}", "{unknown}"]);
        let argv = t.fill(&[("input", "go.json"), ("output", "out/go")]);
        assert_eq!(argv, vec!["kgx", "--output=out/go", "go.json", "{unknown}"]);
    }

    #[test]
    fn test_run_empty_command() {
        assert!(template(&[]).run(&[]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_exit_status() {
        assert!(template(&["true"]).run(&[]).is_ok());
        let err = template(&["false"]).run(&[]).unwrap_err();
        assert!(err.starts_with("false exited with"));
    }
}

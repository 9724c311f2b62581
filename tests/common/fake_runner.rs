//! Scripted command runner for gate tests.

use async_trait::async_trait;
use gh_gate::command::{CommandOutput, CommandRunner};
use gh_gate::error::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// Command runner that replays canned outputs and records every invocation.
///
/// Commands without a scripted response report a non-zero exit, which the
/// gate treats like any other failing command.
pub struct FakeRunner {
    responses: Mutex<HashMap<String, CommandOutput>>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Register the output for an exact command line.
    pub fn respond(&self, command_line: &str, output: CommandOutput) {
        self.responses
            .lock()
            .unwrap()
            .insert(command_line.to_string(), output);
    }

    /// Register a zero-exit response with the given stdout.
    pub fn respond_ok(&self, command_line: &str, stdout: &str) {
        self.respond(
            command_line,
            CommandOutput {
                success: true,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
    }

    /// Register a non-zero-exit response with the given stderr.
    pub fn respond_err(&self, command_line: &str, stderr: &str) {
        self.respond(
            command_line,
            CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
        );
    }

    /// Every command line run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether an exact command line was run.
    pub fn was_called(&self, command_line: &str) -> bool {
        self.calls().iter().any(|c| c == command_line)
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let line = format!("{program} {}", args.join(" "));
        self.calls.lock().unwrap().push(line.clone());
        let responses = self.responses.lock().unwrap();
        Ok(responses.get(&line).cloned().unwrap_or(CommandOutput {
            success: false,
            stdout: String::new(),
            stderr: format!("no scripted response for: {line}"),
        }))
    }
}

// SPDX-License-Identifier: MIT

//! Process execution with privilege elevation and a per-command time budget.

use std::time::Instant;

use async_trait::async_trait;

use upkeep_core::{CommandError, CommandOutcome, CommandSpec};

/// Privilege-escalation prefix prepended when a spec asks to elevate.
const ELEVATION_PREFIX: &str = "sudo";

/// Longest stderr excerpt carried into a failure outcome.
const STDERR_SNIPPET_LIMIT: usize = 4096;

/// Adapter for running one external command.
///
/// Every failure is folded into the returned [`CommandOutcome`]; nothing
/// escapes this boundary as an error.
#[async_trait]
pub trait ProcessAdapter: Clone + Send + Sync + 'static {
    async fn execute(&self, spec: &CommandSpec) -> CommandOutcome;
}

/// Runs commands on the local host via `tokio::process`.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostProcessAdapter;

impl HostProcessAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessAdapter for HostProcessAdapter {
    async fn execute(&self, spec: &CommandSpec) -> CommandOutcome {
        let Some((program, args)) = resolve_argv(spec) else {
            return CommandOutcome::failure(spec.clone(), CommandError::NotFound);
        };

        let span = tracing::info_span!(
            "host.cmd",
            cmd = %spec.command_line(),
            elevate = spec.elevate,
            exit_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        let start = Instant::now();
        let mut process = tokio::process::Command::new(&program);
        process.args(&args);
        process.envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        process.stdin(std::process::Stdio::null());
        process.stdout(std::process::Stdio::piped());
        process.stderr(std::process::Stdio::piped());
        // Reaps the child when the budget drops the wait future mid-flight.
        process.kill_on_drop(true);

        let child = match process.spawn() {
            Ok(child) => child,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return CommandOutcome::failure(spec.clone(), CommandError::NotFound);
            }
            Err(source) => {
                return CommandOutcome::failure(
                    spec.clone(),
                    CommandError::ExitNonZero {
                        code: -1,
                        stderr: source.to_string(),
                    },
                );
            }
        };

        let waited = tokio::time::timeout(spec.budget, child.wait_with_output()).await;
        let duration = start.elapsed();
        span.record("duration_ms", duration.as_millis() as u64);

        match waited {
            Err(_elapsed) => CommandOutcome::failure(
                spec.clone(),
                CommandError::Timeout {
                    budget: spec.budget,
                },
            ),
            Ok(Err(source)) => CommandOutcome::failure(
                spec.clone(),
                CommandError::ExitNonZero {
                    code: -1,
                    stderr: source.to_string(),
                },
            ),
            Ok(Ok(output)) => {
                let exit_code = output.status.code().unwrap_or(-1);
                span.record("exit_code", exit_code);
                if output.status.success() {
                    let stdout = String::from_utf8_lossy(&output.stdout)
                        .trim_end()
                        .to_string();
                    CommandOutcome::success(spec.clone(), stdout)
                } else {
                    CommandOutcome::failure(
                        spec.clone(),
                        CommandError::ExitNonZero {
                            code: exit_code,
                            stderr: truncate_utf8(&output.stderr, STDERR_SNIPPET_LIMIT),
                        },
                    )
                }
            }
        }
    }
}

/// Map a spec to the argv actually spawned.
///
/// Elevation runs the whole token list under the escalation prefix; otherwise
/// the first token is the program. `None` for an empty spec.
fn resolve_argv(spec: &CommandSpec) -> Option<(String, Vec<String>)> {
    let program = spec.program()?;
    if spec.elevate {
        Some((ELEVATION_PREFIX.to_string(), spec.tokens.clone()))
    } else {
        Some((program.to_string(), spec.args().to_vec()))
    }
}

/// Trim trailing whitespace and truncate to a UTF-8-safe prefix.
fn truncate_utf8(bytes: &[u8], limit: usize) -> String {
    let s = String::from_utf8_lossy(bytes);
    let s = s.trim_end();
    if s.len() <= limit {
        return s.to_string();
    }
    let mut end = limit;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use upkeep_core::{CommandError, CommandOutcome, CommandSpec};

    use super::ProcessAdapter;

    struct FakeProcessState {
        script: VecDeque<Result<String, CommandError>>,
        executed: Vec<CommandSpec>,
    }

    /// Fake process adapter driven by a scripted result queue.
    ///
    /// Results are handed out in script order; once the script is exhausted,
    /// every command succeeds with empty output.
    #[derive(Clone)]
    pub struct FakeProcessAdapter {
        inner: Arc<Mutex<FakeProcessState>>,
    }

    impl Default for FakeProcessAdapter {
        fn default() -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeProcessState {
                    script: VecDeque::new(),
                    executed: Vec::new(),
                })),
            }
        }
    }

    impl FakeProcessAdapter {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a successful result with the given stdout.
        pub fn script_success(&self, stdout: &str) {
            self.inner.lock().script.push_back(Ok(stdout.to_string()));
        }

        /// Queue a failing result.
        pub fn script_failure(&self, error: CommandError) {
            self.inner.lock().script.push_back(Err(error));
        }

        /// Specs executed so far, in order.
        pub fn executed(&self) -> Vec<CommandSpec> {
            self.inner.lock().executed.clone()
        }
    }

    #[async_trait]
    impl ProcessAdapter for FakeProcessAdapter {
        async fn execute(&self, spec: &CommandSpec) -> CommandOutcome {
            let mut state = self.inner.lock();
            state.executed.push(spec.clone());
            match state.script.pop_front() {
                Some(Ok(stdout)) => CommandOutcome::success(spec.clone(), stdout),
                Some(Err(error)) => CommandOutcome::failure(spec.clone(), error),
                None => CommandOutcome::success(spec.clone(), ""),
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeProcessAdapter;

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;

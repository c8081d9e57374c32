// Copyright 2025 dentsusoken
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

use super::command::{ExecutionPlan, build_command};
use super::planner::{Planner, ToolInfo};
use super::registry::ToolName;
use crate::error::{ExecutionFailure, Result, ScError};
use log::{debug, info, warn};
use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Child, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub capture_output: bool,
    pub check_exit_code: bool,
    pub cwd: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            capture_output: true,
            check_exit_code: true,
            cwd: None,
            timeout: None,
        }
    }
}

impl RunOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn unchecked(mut self) -> Self {
        self.check_exit_code = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Resolves and runs external tools.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    planner: Planner,
    verbose: bool,
}

impl ToolRunner {
    /// `verbose` raises command logging from debug to info.
    pub fn new(planner: Planner, verbose: bool) -> Self {
        Self { planner, verbose }
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    pub fn resolve(&self, name: &ToolName) -> ToolInfo {
        self.planner.plan_execution(name, None)
    }

    /// Run `name` with `args`. No retries are attempted.
    pub fn run<S: AsRef<OsStr>>(
        &self,
        name: &ToolName,
        args: &[S],
        options: &RunOptions,
    ) -> Result<ExecutionResult> {
        let info = self.resolve(name);
        let plan = build_command(&info, args, &self.planner.compat())?;

        if self.verbose {
            info!("Running: {}", plan.display());
        } else {
            debug!("Running: {}", plan.display());
        }

        self.execute(name, &plan, options)
    }

    fn execute(
        &self,
        name: &ToolName,
        plan: &ExecutionPlan,
        options: &RunOptions,
    ) -> Result<ExecutionResult> {
        let mut command = plan.to_command();
        command.stdin(Stdio::null());
        if let Some(cwd) = &options.cwd {
            command.current_dir(cwd);
        }
        if options.capture_output {
            command.stdout(Stdio::piped()).stderr(Stdio::piped());
        }

        let start = Instant::now();
        let mut child = command.spawn().map_err(|e| spawn_error(name, plan, e))?;

        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = match wait(&mut child, options.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let timeout = options.timeout.unwrap_or_default();
                warn!("{name} timed out after {} seconds", timeout.as_secs_f64());
                let _ = child.kill();
                let _ = child.wait();
                return Err(ScError::ToolExecution {
                    tool: name.to_string(),
                    failure: ExecutionFailure::TimedOut { timeout },
                });
            }
            Err(e) => {
                let _ = child.kill();
                return Err(ScError::ToolExecution {
                    tool: name.to_string(),
                    failure: ExecutionFailure::Spawn {
                        message: format!("failed to wait for process: {e}"),
                    },
                });
            }
        };

        let result = ExecutionResult {
            code: status.code(),
            stdout: collect(stdout),
            stderr: collect(stderr),
            duration: start.elapsed(),
        };
        debug!(
            "{name} exited with {:?} after {:?}",
            result.code, result.duration
        );

        if options.check_exit_code && !status.success() {
            return Err(ScError::ToolExecution {
                tool: name.to_string(),
                failure: ExecutionFailure::ExitStatus {
                    code: result.code,
                    stdout: result.stdout,
                    stderr: result.stderr,
                },
            });
        }

        Ok(result)
    }
}

fn spawn_error(name: &ToolName, plan: &ExecutionPlan, error: io::Error) -> ScError {
    if error.kind() == io::ErrorKind::NotFound {
        ScError::ToolNotFound {
            tool: name.to_string(),
            path: Some(plan.program.clone()),
            hint: Some(format!(
                "{} disappeared before it could be started",
                plan.program.display()
            )),
        }
    } else {
        ScError::ToolExecution {
            tool: name.to_string(),
            failure: ExecutionFailure::Spawn {
                message: error.to_string(),
            },
        }
    }
}

/// Wait for the child, or give up once `timeout` has elapsed.
///
/// Returns `Ok(None)` on timeout; the child is still running at that point.
fn wait(child: &mut Child, timeout: Option<Duration>) -> io::Result<Option<ExitStatus>> {
    let Some(timeout) = timeout else {
        return child.wait().map(Some);
    };

    let start = Instant::now();
    loop {
        match child.try_wait()? {
            Some(status) => return Ok(Some(status)),
            None => {
                if start.elapsed() >= timeout {
                    return Ok(None);
                }
                thread::sleep(POLL_INTERVAL.min(timeout.saturating_sub(start.elapsed())));
            }
        }
    }
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let _ = reader.read_to_end(&mut buffer);
        buffer
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigStore};
    use crate::platform::{CompatLayer, OperatingSystem};
    use crate::tools::{Locator, Tool};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn runner(home: &std::path::Path, host_os: OperatingSystem) -> ToolRunner {
        let store = Arc::new(ConfigStore::with_config(
            home.join("sc2fla_config.json"),
            Config::default(),
        ));
        let planner = Planner::new(
            Locator::new(home, host_os),
            CompatLayer::unavailable(),
            store,
        );
        ToolRunner::new(planner, false)
    }

    #[test]
    fn test_default_options() {
        let options = RunOptions::default();
        assert!(options.capture_output);
        assert!(options.check_exit_code);
        assert_eq!(options.cwd, None);
        assert_eq!(options.timeout, None);
    }

    #[test]
    fn test_missing_tool_fails_without_spawning() {
        let temp = TempDir::new().unwrap();
        let runner = runner(temp.path(), OperatingSystem::Linux);

        let err = runner
            .run(&Tool::ScDowngrade.into(), &["a.sc", "a.sc"], &RunOptions::default())
            .unwrap_err();
        assert!(matches!(err, ScError::ToolNotFound { ref tool, path: None, .. } if tool == "sc_downgrade"));
    }

    #[test]
    fn test_windows_binary_without_wine_fails_with_hint() {
        let temp = TempDir::new().unwrap();
        crate::test::fixtures::touch(
            &crate::paths::home::windows_bin_dir(temp.path()).join("ScDowngrade.exe"),
        );
        let runner = runner(temp.path(), OperatingSystem::Linux);

        let err = runner
            .run(&Tool::ScDowngrade.into(), &["a.sc"], &RunOptions::default())
            .unwrap_err();
        match err {
            ScError::ToolNotFound { path, hint, .. } => {
                assert!(path.is_some());
                assert!(hint.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use crate::paths::home;
        use crate::test::fixtures::write_script;

        fn script_runner(body: &str) -> (TempDir, ToolRunner) {
            let temp = TempDir::new().unwrap();
            write_script(
                &home::platform_bin_dir(temp.path(), OperatingSystem::Linux).join("ScDowngrade"),
                body,
            );
            let runner = runner(temp.path(), OperatingSystem::Linux);
            (temp, runner)
        }

        #[test]
        fn test_captures_output() {
            let (_temp, runner) = script_runner("echo \"out:$1:$2\"\necho err >&2");
            let result = runner
                .run(&Tool::ScDowngrade.into(), &["in.sc", "out.sc"], &RunOptions::default())
                .unwrap();
            assert!(result.success());
            assert_eq!(result.stdout.trim(), "out:in.sc:out.sc");
            assert_eq!(result.stderr.trim(), "err");
        }

        #[test]
        fn test_non_zero_exit_is_execution_error() {
            let (_temp, runner) = script_runner("echo broken >&2\nexit 3");
            let err = runner
                .run(&Tool::ScDowngrade.into(), &["x"], &RunOptions::default())
                .unwrap_err();
            match err {
                ScError::ToolExecution {
                    failure: ExecutionFailure::ExitStatus { code, stderr, .. },
                    ..
                } => {
                    assert_eq!(code, Some(3));
                    assert_eq!(stderr.trim(), "broken");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn test_unchecked_exit_returns_result() {
            let (_temp, runner) = script_runner("exit 4");
            let result = runner
                .run(
                    &Tool::ScDowngrade.into(),
                    &["x"],
                    &RunOptions::default().unchecked(),
                )
                .unwrap();
            assert_eq!(result.code, Some(4));
            assert!(!result.success());
        }

        #[test]
        fn test_timeout_kills_child() {
            let (_temp, runner) = script_runner("exec sleep 5");
            let start = Instant::now();
            let err = runner
                .run(
                    &Tool::ScDowngrade.into(),
                    &["x"],
                    &RunOptions::default().with_timeout(Duration::from_millis(300)),
                )
                .unwrap_err();
            assert!(start.elapsed() < Duration::from_secs(4));
            match err {
                ScError::ToolExecution {
                    failure: ExecutionFailure::TimedOut { timeout },
                    ..
                } => assert_eq!(timeout, Duration::from_millis(300)),
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn test_cwd_is_applied() {
            let (temp, runner) = script_runner("pwd");
            let work = temp.path().join("work");
            std::fs::create_dir_all(&work).unwrap();
            let options = RunOptions {
                cwd: Some(work.clone()),
                ..RunOptions::default()
            };
            let result = runner
                .run(&Tool::ScDowngrade.into(), &[] as &[&str], &options)
                .unwrap();
            let reported = PathBuf::from(result.stdout.trim());
            assert_eq!(
                reported.canonicalize().unwrap(),
                work.canonicalize().unwrap()
            );
        }

        #[test]
        fn test_shim_launcher_receives_tool_path() {
            let temp = TempDir::new().unwrap();
            let exe = home::windows_bin_dir(temp.path()).join("ScDowngrade.exe");
            crate::test::fixtures::touch(&exe);
            let launcher = temp.path().join("fake-wine");
            write_script(&launcher, "echo \"$@\"");

            let store = Arc::new(ConfigStore::with_config(
                temp.path().join("sc2fla_config.json"),
                Config::default(),
            ));
            let planner = Planner::new(
                Locator::new(temp.path(), OperatingSystem::Linux),
                CompatLayer::with_launchers(None, Some(launcher)),
                store,
            );
            let result = ToolRunner::new(planner, true)
                .run(&Tool::ScDowngrade.into(), &["a.sc", "a.sc"], &RunOptions::default())
                .unwrap();
            assert_eq!(
                result.stdout.trim(),
                format!("{} a.sc a.sc", exe.display())
            );
        }
    }
}

use std::io;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{error, info};

use super::prefix_writer::{drain, PrefixWriter};
use crate::common::error::RepotreeError;
use crate::common::logging::banner;
use crate::common::result::RepotreeResult;
use crate::domain::value_objects::execution::Execution;

/// Outcome of running one repository's executions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Executions passed through, including skipped and failed ones
    pub advanced: usize,
    /// Not spawned because of dry-run or the execution's skip flag
    pub skipped: usize,
    /// Spawned and failed, only counted when continuing on error
    pub failed: usize,
}

/// Runs executions one after another, tagging their output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor {
    continue_on_error: bool,
    dry_run: bool,
}

impl ProcessExecutor {
    pub fn new(continue_on_error: bool, dry_run: bool) -> Self {
        Self {
            continue_on_error,
            dry_run,
        }
    }

    /// Runs `executions` in order.
    ///
    /// Without continue-on-error the first failure ends the loop and is
    /// returned with its index; otherwise it is logged and counted.
    pub async fn run(&self, executions: &[Execution]) -> RepotreeResult<RunReport> {
        let mut report = RunReport::default();

        for (index, execution) in executions.iter().enumerate() {
            info!("PATH: {}", execution.path.display());
            info!("CMD: {}", execution.command_line());

            if self.dry_run || execution.skip {
                report.advanced += 1;
                report.skipped += 1;
                continue;
            }

            match run_one(index, execution).await {
                Ok(()) => report.advanced += 1,
                Err(e) if self.continue_on_error => {
                    error!("{}", e);
                    report.advanced += 1;
                    report.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }
}

async fn run_one(index: usize, execution: &Execution) -> RepotreeResult<()> {
    let command_line = execution.command_line();

    let mut child = Command::new(&execution.command)
        .args(&execution.args)
        .current_dir(&execution.path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            RepotreeError::execution_error_with_source(
                "failed to start process",
                &command_line,
                index,
                e,
            )
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let prefix = banner();

    let stdout_task = tokio::spawn({
        let prefix = prefix.clone();
        async move {
            match stdout {
                Some(stream) => drain(stream, PrefixWriter::new(io::stdout(), prefix))
                    .await
                    .map(drop),
                None => Ok(()),
            }
        }
    });
    let stderr_task = tokio::spawn(async move {
        match stderr {
            Some(stream) => drain(stream, PrefixWriter::new(io::stderr(), prefix))
                .await
                .map(drop),
            None => Ok(()),
        }
    });

    // both drains finish before the exit status is collected
    let (stdout_result, stderr_result) = tokio::join!(stdout_task, stderr_task);
    let captured = [stdout_result, stderr_result]
        .into_iter()
        .map(|result| {
            result
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
                .and_then(|drained| drained)
        })
        .collect::<io::Result<()>>();

    let status = child.wait().await.map_err(|e| {
        RepotreeError::execution_error_with_source(
            "failed to wait for process",
            &command_line,
            index,
            e,
        )
    })?;

    captured.map_err(|e| {
        RepotreeError::execution_error_with_source(
            "failed to capture output",
            &command_line,
            index,
            e,
        )
    })?;

    if status.success() {
        return Ok(());
    }

    let message = match status.code() {
        Some(code) => format!("exited with code {code}"),
        None => "terminated by signal".to_string(),
    };
    Err(RepotreeError::execution_error(
        message,
        command_line,
        index,
        status.code(),
    ))
}

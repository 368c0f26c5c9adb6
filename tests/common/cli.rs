use std::{ffi::OsStr, process::Command};

use anyhow::{Context, Result};

pub struct CliOutput {
    pub code: Option<i32>,
    pub stderr: String,
}

/// Runs the `image-average` binary with `args` and captures its result.
pub fn run_cli<I, S>(args: I) -> Result<CliOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::new(env!("CARGO_BIN_EXE_image-average"))
        .args(args)
        .output()
        .context("failed to launch image-average")?;
    Ok(CliOutput {
        code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

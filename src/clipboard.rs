use std::process::Command;

use anyhow::{anyhow, Context};
use log::debug;

/// Reads plain text from the system clipboard using the platform's CLI tool.
pub fn read_text() -> anyhow::Result<String> {
    let mut last_err = anyhow!("no clipboard tool available");
    for (program, args) in readers() {
        match run(program, args) {
            Ok(text) => return Ok(text),
            Err(e) => {
                debug!("[clipboard] {} failed: {:#}", program, e);
                last_err = e;
            }
        }
    }
    Err(last_err)
}

#[cfg(target_os = "macos")]
fn readers() -> &'static [(&'static str, &'static [&'static str])] {
    &[("pbpaste", &[])]
}

#[cfg(target_os = "windows")]
fn readers() -> &'static [(&'static str, &'static [&'static str])] {
    &[("powershell", &["-NoProfile", "-Command", "Get-Clipboard -Raw"])]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn readers() -> &'static [(&'static str, &'static [&'static str])] {
    &[
        ("wl-paste", &["--no-newline"]),
        ("xclip", &["-selection", "clipboard", "-out"]),
        ("xsel", &["--clipboard", "--output"]),
    ]
}

fn run(program: &str, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("failed to run {}", program))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("{} exited with {}: {}", program, output.status, stderr.trim()));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Appends pasted text to the URL field as a single line.
/// Returns false when there was nothing to paste.
pub fn paste_into(field: &mut String, pasted: &str) -> bool {
    let pasted = pasted.trim();
    if pasted.is_empty() {
        return false;
    }
    field.extend(pasted.lines().map(str::trim));
    true
}

//! The GitHub Actions reporting channel: step outputs via the
//! `$GITHUB_OUTPUT` file and failure annotations via workflow commands.

use std::fs::OpenOptions;
use std::io::{self, Write};

pub fn in_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|value| !value.is_empty())
}

/// Append a step output. Outside a runner (no `$GITHUB_OUTPUT`) this is a
/// no-op. Multi-line values use the heredoc form the runner expects.
pub fn set_output(name: &str, value: &str) -> io::Result<()> {
    let Some(path) = std::env::var_os("GITHUB_OUTPUT") else {
        return Ok(());
    };

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if value.contains('\n') {
        writeln!(file, "{name}<<GH_OUTPUT_EOF\n{value}\nGH_OUTPUT_EOF")
    } else {
        writeln!(file, "{name}={value}")
    }
}

/// Emit an `::error::` workflow command so the step shows an annotation.
pub fn error(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// Workflow command data escaping: `%`, CR and LF are percent-encoded.
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

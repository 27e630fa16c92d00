//! Line input from stdin.

use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

pub(super) struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub(super) fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `label` and read one line. `None` once stdin is closed.
    pub(super) async fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        {
            let mut stdout = io::stdout().lock();
            stdout.write_all(label.as_bytes())?;
            stdout.flush()?;
        }
        self.next_line().await
    }

    /// Cancel safe, so it can race other futures in `select!`.
    pub(super) async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }
}

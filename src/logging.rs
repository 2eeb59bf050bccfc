use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use env_logger::{Env, Target};

static CONSOLE_MUTED: AtomicBool = AtomicBool::new(false);

/// Stop echoing log lines to stderr while the terminal UI owns the screen.
/// Problems during that time reach the operator through the footer instead.
pub fn mute_console(muted: bool) {
    CONSOLE_MUTED.store(muted, Ordering::SeqCst);
}

/// Log lines always go to the file (when it could be opened) and to the
/// console unless it is muted.
struct LogWriter<F, C> {
    file: Option<F>,
    console: C,
}

impl<F: Write, C: Write> Write for LogWriter<F, C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        if !CONSOLE_MUTED.load(Ordering::SeqCst) {
            self.console.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        self.console.flush()
    }
}

/// `RUST_LOG` filter, `info` by default.
pub fn init(log_path: &Path) {
    let file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Could not open log file {}: {}", log_path.display(), e);
            None
        }
    };

    let writer = LogWriter {
        file,
        console: io::stderr(),
    };
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(writer)))
        .init();
}

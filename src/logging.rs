//! Logging setup.
//!
//! Every record goes to stderr and to `<exe_dir>/logs/load_review_capture.log`
//! with a millisecond timestamp. The filter defaults to `info` and can be
//! overridden with `RUST_LOG`.

use chrono::Local;
use env_logger::{Builder, Env, Target};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

const LOG_FILE_NAME: &str = "load_review_capture.log";

/// Writes to stderr and, when available, to the log file.
struct Tee {
    file: Option<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        if let Some(file) = &mut self.file {
            let _ = file.write_all(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

/// Initialises the global logger, appending to a log file in `logs_dir`.
pub fn init(logs_dir: &Path) {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(logs_dir.join(LOG_FILE_NAME))
        .ok();

    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {:<5} {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(Tee { file })))
        .try_init();
}

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static EXE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Returns the directory containing the executable.
pub fn get_exe_dir() -> &'static PathBuf {
    EXE_DIR.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Returns the logs directory: `<exe_dir>/logs/`
pub fn get_logs_dir() -> PathBuf {
    get_exe_dir().join("logs")
}

/// Returns the default output directory for a load: `<exe_dir>/output/<load>/`
pub fn get_output_dir(load_name: &str) -> PathBuf {
    get_exe_dir().join("output").join(load_name)
}

/// Path of `<load><suffix>` inside `dir`.
pub fn load_file(dir: &Path, load_name: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{}{}", load_name, suffix))
}

/// Ensures the logs directory exists. Call at startup.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(get_logs_dir())?;
    Ok(())
}

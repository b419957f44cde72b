use std::env;
use std::path::PathBuf;

/// Overrides the data directory when `--data-dir` is not given
pub const DATA_DIR_ENV: &str = "AISLE_DATA_DIR";

/// `--data-dir`, then `$AISLE_DATA_DIR`, then the platform data dir
pub fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("aisle");
    path
}

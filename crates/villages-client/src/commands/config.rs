//! Configuration commands.

use std::path::Path;

use crate::config::FileConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the loaded file configuration to stdout.
pub fn dump(path: &Path, config: &FileConfig) -> ClientResult<()> {
    let yaml = config
        .to_yaml()
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# {}", path.display());
    print!("{}", yaml);
    Ok(())
}

/// Show the configuration file path.
pub fn path(path: &Path) -> ClientResult<()> {
    let status = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("config: {}{}", path.display(), status);
    Ok(())
}

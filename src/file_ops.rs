use anyhow::{bail, Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Read a text file, failing with a clear error if it does not exist.
pub fn read_file_safe(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read file at {}", path.display()))
}

/// Write a text file atomically, creating parent directories as
/// needed. Uses atomic-write-file so the target is never left in a
/// partially written state.
pub fn write_file_safe(path: &Path, content: &str) -> Result<()> {
    ensure_parent(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file at {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save file at {}", path.display()))?;

    Ok(())
}

/// Ensure a directory exists, creating it and any missing parents.
pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory at {}", path.display()))
}

/// List files under `directory` matching a glob pattern like `*.json`.
/// A missing directory or unparseable pattern yields an empty list.
pub fn list_files(directory: &Path, pattern: &str) -> Vec<PathBuf> {
    if !directory.exists() {
        return Vec::new();
    }

    let Some(full_pattern) = directory.join(pattern).to_str().map(str::to_owned) else {
        return Vec::new();
    };

    match glob::glob(&full_pattern) {
        Ok(paths) => paths.filter_map(|entry| entry.ok()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Load a JSON file into a deserializable value.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open file at {}", path.display()))?;

    serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Save a value as pretty-printed JSON, atomically, creating parent
/// directories as needed.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, value)
        .with_context(|| format!("Failed to serialize JSON for {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save file at {}", path.display()))?;

    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

//! Settings file persistence.
//!
//! One comma-separated line: `length,digits,symbols,exclude_ambiguous,copy`.
//! Anything that does not parse falls back to the defaults; a wrong-arity
//! line is rewritten wholesale so stale formats heal themselves.

use std::env;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::Settings;

pub fn save(settings: &Settings) -> std::io::Result<()> {
    save_to(settings, &get_path())
}

pub fn load(settings: &mut Settings) -> std::io::Result<()> {
    load_from(settings, &get_path())
}

fn save_to(settings: &Settings, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    let data = format!(
        "{},{},{},{},{}\n",
        settings.length,
        settings.digits,
        settings.symbols,
        settings.exclude_ambiguous,
        settings.copy
    );

    file.write_all(data.as_bytes())?;
    Ok(())
}

fn load_from(settings: &mut Settings, path: &Path) -> std::io::Result<()> {
    if !path.exists()
        && let Some(parent) = path.parent()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .read(true)
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)?;

    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader.read_line(&mut line)?;

    if line.is_empty() {
        save_to(settings, path)?;
        return Ok(());
    }

    let parts: Vec<&str> = line.trim().split(',').collect();
    if parts.len() == 5 {
        settings.length = parts[0].parse().unwrap_or(settings.length);
        settings.digits = parts[1].parse().unwrap_or(settings.digits);
        settings.symbols = parts[2].parse().unwrap_or(settings.symbols);
        settings.exclude_ambiguous = parts[3].parse().unwrap_or(settings.exclude_ambiguous);
        settings.copy = parts[4].parse().unwrap_or(settings.copy);
    } else {
        save_to(settings, path)?;
    }

    Ok(())
}

#[inline]
fn get_path() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".into());
    Path::new(&home).join(".config").join("dpass").join("settings")
}

use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Request body from `--input <file.json>`, or from stdin when piped.
pub fn read_body(path: Option<&str>, command: &str) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return read_json_file(path);
    }
    if let Some(value) = read_stdin()? {
        debug!(target: "ppu::input", command, "read request body from stdin");
        return Ok(value);
    }
    Err(format!("--input <file.json> or stdin required for {command}").into())
}

fn read_json_file(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let file = resolve_path(path)?;
    let contents = fs::read_to_string(&file)
        .map_err(|e| format!("Failed to read '{}': {}", file.display(), e))?;
    let value = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", file.display(), e))?;
    debug!(target: "ppu::input", path = %file.display(), bytes = contents.len(), "read request body");
    Ok(value)
}

/// None when stdin is a TTY or empty.
fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(trimmed)?))
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let file = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !file.is_file() {
        return Err(format!("Not a readable file: {}", file.display()).into());
    }
    Ok(file)
}

//! CLI Command Implementations

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::engine::{
    batch_it_crazy, export_wav, get_dbmax, is_silence, load_audio, ExportFormat, LoadOptions,
    NormMode,
};
use crate::error::{AeiouError, Result};
use crate::files::{fast_scandir, get_audio_filenames, is_tool, makedir, MakeDir, ScanResult};
use crate::nested::untuple_json;

/// List matching files under each root.
pub fn scan(paths: &[PathBuf], ext: &[String]) -> Result<()> {
    let result = if ext.is_empty() {
        get_audio_filenames(paths)
    } else {
        let mut merged = ScanResult::default();
        for path in paths {
            merged.extend(fast_scandir(path, ext));
        }
        merged
    };

    for file in &result.files {
        println!("{}", file.display());
    }

    if !result.is_complete() {
        warn!(
            "{} path(s) could not be read; results are partial",
            result.errors.len()
        );
    }
    info!("Found {} file(s)", result.files.len());

    Ok(())
}

/// Print basic facts about one file.
pub fn info(path: &Path, sample_rate: u32, thresh: f32) -> Result<()> {
    let audio = load_audio(path, &LoadOptions::new(sample_rate))?;
    let db = get_dbmax(&audio);

    println!("File:        {}", path.display());
    println!("Channels:    {}", audio.channels());
    println!("Samples:     {}", audio.len());
    println!("Sample rate: {} Hz", audio.sample_rate);
    println!("Duration:    {:.3}s", audio.duration_secs());
    println!("Peak:        {:.2} dB", db);
    println!("Silent:      {} (threshold {} dB)", is_silence(&audio, thresh), thresh);

    Ok(())
}

/// Normalize a file and write the result as WAV.
pub fn normalize(
    input: &Path,
    output: &Path,
    mode: &str,
    sample_rate: u32,
    bit_depth: u16,
) -> Result<()> {
    let norm: NormMode = mode.parse().unwrap_or_default();
    if norm == NormMode::None {
        warn!("Unknown normalization mode '{}'; writing audio unchanged", mode);
    }

    let options = LoadOptions::new(sample_rate).with_norm(norm);
    let audio = load_audio(input, &options)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let MakeDir::Failed(e) = makedir(parent) {
            return Err(AeiouError::Io(e));
        }
    }

    export_wav(&audio, output, ExportFormat { bit_depth })?;
    println!("Wrote {} ({} normalization)", output.display(), norm);

    Ok(())
}

/// Report the batch shape a file would be windowed into.
pub fn batch(path: &Path, win_len: usize, sample_rate: u32) -> Result<()> {
    let audio = load_audio(path, &LoadOptions::new(sample_rate))?;
    let windows = batch_it_crazy(&audio, win_len)?;
    let (batch, channels, len) = windows.dim();

    println!("Batch shape: ({}, {}, {})", batch, channels, len);
    println!("Padding:     {} samples", batch * len - audio.len());

    Ok(())
}

/// Report whether a program is on PATH.
pub fn which(name: &str) -> Result<()> {
    let found = is_tool(name);
    println!("{}: {}", name, if found { "found" } else { "not found" });
    Ok(())
}

/// Create a directory tree.
pub fn mkdir(path: &Path) -> Result<()> {
    match makedir(path) {
        MakeDir::Existed => println!("Exists:  {}", path.display()),
        MakeDir::Created => println!("Created: {}", path.display()),
        MakeDir::Failed(e) => return Err(AeiouError::Io(e)),
    }
    Ok(())
}

/// Print the first non-sequence value of a JSON document.
pub fn untuple(json: &str) -> Result<()> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    println!("{}", untuple_json(&value)?);
    Ok(())
}

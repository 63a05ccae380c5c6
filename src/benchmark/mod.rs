use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use log::{debug, info};
use serde::Serialize;
use tempfile::TempDir;

use crate::error::BenchmarkError;
use crate::subprocess::{exec, COMMAND_TIMEOUT};
use crate::tools::CompressionTool;

/// Result of a single compress-then-decompress trial.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkRow {
    pub method: String,
    pub compress_time: f64,      // Wall-clock seconds
    pub decompress_time: f64,    // Wall-clock seconds
    pub compression_level: i32,
    pub compression_ratio: f64,  // Compressed size / original size
}

/// Benchmarks one external compression tool over a sweep of levels.
///
/// For every level, `n_times` trials are run strictly one after another,
/// each in a fresh scratch directory that is emptied before the next trial
/// starts. The source file's size is captured once up front and used as the
/// ratio denominator for every trial in the run.
///
/// Any subprocess failure or missing output aborts the whole run for this
/// tool; rows from earlier trials are discarded with it.
pub fn benchmark(
    tool: &CompressionTool,
    src_file: &Path,
    n_times: usize,
    compression_levels: &[i32],
) -> Result<Vec<BenchmarkRow>, BenchmarkError> {
    if n_times == 0 {
        return Err(BenchmarkError::NoIterations);
    }
    if compression_levels.is_empty() {
        return Err(BenchmarkError::NoLevels);
    }
    let original_size = fs::metadata(src_file)
        .map_err(|source| BenchmarkError::SourceFile { path: src_file.to_path_buf(), source })?
        .len();

    let mut rows = Vec::with_capacity(compression_levels.len() * n_times);
    for &level in compression_levels {
        for idx in 0..n_times {
            rows.push(exec_single_iteration(tool, src_file, original_size, level, idx)?);
        }
        info!("finished benchmarking name={} level={}", tool.name, level);
    }
    info!("benchmarking {} finished", tool.name);

    Ok(rows)
}

fn exec_single_iteration(
    tool: &CompressionTool,
    src_file: &Path,
    original_size: u64,
    level: i32,
    idx: usize,
) -> Result<BenchmarkRow, BenchmarkError> {
    // A private directory per trial keeps artifacts from different trials
    // apart and makes cleanup a simple sweep of everything inside it.
    let scratch = TempDir::new()?;
    let src_name = src_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    let dst_file = scratch
        .path()
        .join(format!("{src_name}.{level}.{suffix}", suffix = tool.file_suffix));

    let compress_cmd = (tool.compress_cmd)(level, src_file, &dst_file);
    let start = Instant::now();
    exec(&compress_cmd, COMMAND_TIMEOUT)?;
    let compress_time = start.elapsed().as_secs_f64();

    let compressed_size = fs::metadata(&dst_file)
        .map_err(|_| BenchmarkError::MissingOutput {
            command: compress_cmd.join(" "),
            path: dst_file.clone(),
        })?
        .len();

    let start = Instant::now();
    exec(&(tool.decompress_cmd)(&dst_file), COMMAND_TIMEOUT)?;
    let decompress_time = start.elapsed().as_secs_f64();

    let compression_ratio = compressed_size as f64 / original_size as f64;

    // The compressed artifact plus whatever the decompressor left behind.
    clean_scratch(scratch.path())?;

    debug!(
        "benchmarked i={} name={} level={} time={:.2} ratio={:.2}",
        idx,
        tool.name,
        level,
        compress_time + decompress_time,
        compression_ratio,
    );

    Ok(BenchmarkRow {
        method: tool.name.to_string(),
        compress_time,
        decompress_time,
        compression_level: level,
        compression_ratio,
    })
}

/// Deletes every entry left in a trial's scratch directory.
fn clean_scratch(dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        fs::remove_file(entry?.path())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_scratch_removes_all_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.gz"), b"x").unwrap();
        fs::write(dir.path().join("a"), b"y").unwrap();

        clean_scratch(dir.path()).unwrap();

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_clean_scratch_on_empty_dir_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        clean_scratch(dir.path()).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

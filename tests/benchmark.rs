use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use compression_benchmark::benchmark::benchmark;
use compression_benchmark::error::BenchmarkError;
use compression_benchmark::tools::{all_tools, CompressionTool, GZIP};

const FOX: &str = "Quick brown fox jumps over the lazy dog\n";

fn write_fox_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("test.txt");
    fs::write(&path, FOX).unwrap();
    path
}

/// A descriptor that needs nothing but `cp` and `true`, so engine behavior
/// can be tested without any real compressor installed.
fn copy_tool() -> CompressionTool {
    CompressionTool {
        name: "copy",
        file_suffix: "cp",
        compress_cmd: |_level, src: &Path, dst: &Path| {
            vec!["cp".into(), src.display().to_string(), dst.display().to_string()]
        },
        decompress_cmd: |_src: &Path| vec!["true".into()],
        allowed_levels: &[1, 2, 3],
    }
}

#[test]
fn test_gzip_level_one_single_iteration() {
    let dir = TempDir::new().unwrap();
    let src = write_fox_file(&dir);

    let rows = benchmark(&GZIP, &src, 1, &[1]).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].method, "gzip");
    assert_eq!(rows[0].compression_level, 1);
    assert!(rows[0].compress_time >= 0.0);
    assert!(rows[0].decompress_time >= 0.0);
    assert!(rows[0].compression_ratio > 0.0);
}

#[test]
fn test_missing_binary_aborts_with_command_in_error() {
    let tool = CompressionTool {
        name: "broken",
        file_suffix: "xx",
        compress_cmd: |_level, src: &Path, dst: &Path| {
            vec![
                "no-such-compressor-9a8b7c".into(),
                src.display().to_string(),
                ">".into(),
                dst.display().to_string(),
            ]
        },
        decompress_cmd: |_src: &Path| vec!["true".into()],
        allowed_levels: &[1],
    };
    let dir = TempDir::new().unwrap();
    let src = write_fox_file(&dir);

    let err = benchmark(&tool, &src, 1, &[1]).unwrap_err();

    match err {
        BenchmarkError::CommandFailed { command, .. } => {
            assert!(command.contains("no-such-compressor-9a8b7c"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_two_levels_two_iterations_cover_every_pair() {
    let dir = TempDir::new().unwrap();
    let src = write_fox_file(&dir);

    let rows = benchmark(&copy_tool(), &src, 2, &[2, 3]).unwrap();

    assert_eq!(rows.len(), 4);
    let levels: Vec<i32> = rows.iter().map(|r| r.compression_level).collect();
    assert_eq!(levels, vec![2, 2, 3, 3]);
    assert!(rows.iter().all(|r| r.method == "copy"));
}

#[test]
fn test_n_iterations_share_one_level() {
    let dir = TempDir::new().unwrap();
    let src = write_fox_file(&dir);

    let rows = benchmark(&copy_tool(), &src, 3, &[1]).unwrap();

    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.compression_level == 1));
}

#[test]
fn test_copy_tool_reports_ratio_of_one() {
    let dir = TempDir::new().unwrap();
    let src = write_fox_file(&dir);

    let rows = benchmark(&copy_tool(), &src, 1, &[1]).unwrap();

    assert!((rows[0].compression_ratio - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_decompressor_byproducts_do_not_break_later_trials() {
    // Decompression leaves an extra file in the scratch directory; cleanup
    // between trials has to cope with it.
    let tool = CompressionTool {
        name: "messy",
        file_suffix: "cp",
        compress_cmd: |_level, src: &Path, dst: &Path| {
            vec!["cp".into(), src.display().to_string(), dst.display().to_string()]
        },
        decompress_cmd: |src: &Path| {
            vec![
                "cp".into(),
                src.display().to_string(),
                format!("{}.out", src.display()),
            ]
        },
        allowed_levels: &[1],
    };
    let dir = TempDir::new().unwrap();
    let src = write_fox_file(&dir);

    let rows = benchmark(&tool, &src, 3, &[1]).unwrap();

    assert_eq!(rows.len(), 3);
}

#[test]
fn test_successful_compress_with_no_output_is_fatal() {
    let tool = CompressionTool {
        name: "silent",
        file_suffix: "xx",
        compress_cmd: |_level, _src: &Path, _dst: &Path| vec!["true".into()],
        decompress_cmd: |_src: &Path| vec!["true".into()],
        allowed_levels: &[1],
    };
    let dir = TempDir::new().unwrap();
    let src = write_fox_file(&dir);

    let err = benchmark(&tool, &src, 1, &[1]).unwrap_err();

    assert!(matches!(err, BenchmarkError::MissingOutput { .. }));
}

#[test]
fn test_missing_source_file_is_rejected() {
    let err = benchmark(&copy_tool(), Path::new("/no/such/input.txt"), 1, &[1]).unwrap_err();
    assert!(matches!(err, BenchmarkError::SourceFile { .. }));
}

#[test]
fn test_zero_iterations_is_rejected() {
    let dir = TempDir::new().unwrap();
    let src = write_fox_file(&dir);

    let err = benchmark(&copy_tool(), &src, 0, &[1]).unwrap_err();

    assert!(matches!(err, BenchmarkError::NoIterations));
}

#[test]
fn test_empty_levels_is_rejected() {
    let dir = TempDir::new().unwrap();
    let src = write_fox_file(&dir);

    let err = benchmark(&copy_tool(), &src, 1, &[]).unwrap_err();

    assert!(matches!(err, BenchmarkError::NoLevels));
}

#[test]
fn test_registry_descriptors_build_commands_at_every_allowed_level() {
    let src = PathBuf::from("/tmp/in.txt");
    for tool in all_tools() {
        for &level in tool.allowed_levels {
            let dst = PathBuf::from(format!("/tmp/in.txt.{level}.{}", tool.file_suffix));
            assert!(!(tool.compress_cmd)(level, &src, &dst).is_empty());
            assert!(!(tool.decompress_cmd)(&dst).is_empty());
        }
    }
}

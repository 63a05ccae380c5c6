use std::path::Path;

/// Builds the external command line that compresses `src` into `dst` at the
/// given level.
pub type CompressCommand = fn(level: i32, src: &Path, dst: &Path) -> Vec<String>;

/// Builds the external command line that decompresses a file in place.
pub type DecompressCommand = fn(compressed: &Path) -> Vec<String>;

/// Immutable descriptor for one external compression utility.
///
/// Descriptors are pure data: the command builders are stateless `fn`
/// pointers that depend only on their arguments, so a descriptor can be
/// reused across arbitrarily many trials. Command lines use shell
/// redirection and are run through `sh -c` by the subprocess primitive.
pub struct CompressionTool {
    pub name: &'static str,
    /// Suffix appended to generated output filenames (informational).
    pub file_suffix: &'static str,
    pub compress_cmd: CompressCommand,
    pub decompress_cmd: DecompressCommand,
    /// The only levels meaningful for this tool. Never empty; a tool with a
    /// single fixed effort setting exposes exactly one level.
    pub allowed_levels: &'static [i32],
}

pub static GZIP: CompressionTool = CompressionTool {
    name: "gzip",
    file_suffix: "gz",
    compress_cmd: |level, src, dst| {
        vec![
            "gzip".into(),
            format!("-{level}"),
            src.display().to_string(),
            "--to-stdout".into(),
            ">".into(),
            dst.display().to_string(),
        ]
    },
    decompress_cmd: |src| vec!["gzip".into(), "-d".into(), src.display().to_string()],
    allowed_levels: &[1, 2, 3, 4, 5, 6, 7, 8, 9],
};

pub static GZIP_LIBDEFLATE: CompressionTool = CompressionTool {
    name: "gzip_libdeflate",
    file_suffix: "gz",
    compress_cmd: |level, src, dst| {
        vec![
            "libdeflate-gzip".into(),
            format!("-{level}"),
            src.display().to_string(),
            "-c".into(),
            ">".into(),
            dst.display().to_string(),
        ]
    },
    decompress_cmd: |src| vec!["libdeflate-gunzip".into(), "-d".into(), src.display().to_string()],
    allowed_levels: &[1, 2, 3, 4, 5, 6, 7, 8, 9],
};

pub static GZIP_CLOUDFLARE: CompressionTool = CompressionTool {
    name: "gzip_cloudflare",
    file_suffix: "gz",
    compress_cmd: |level, src, dst| {
        vec![
            "minigzip-cloudflare".into(),
            format!("-{level}"),
            "-c".into(),
            src.display().to_string(),
            ">".into(),
            dst.display().to_string(),
        ]
    },
    decompress_cmd: |src| vec!["minigzip-cloudflare".into(), "-d".into(), src.display().to_string()],
    allowed_levels: &[1, 2, 3, 4, 5, 6, 7, 8, 9],
};

pub static GZIP_NG: CompressionTool = CompressionTool {
    name: "gzip_ng",
    file_suffix: "gz",
    compress_cmd: |level, src, dst| {
        vec![
            "minigzip-ng".into(),
            format!("-{level}"),
            "-c".into(),
            src.display().to_string(),
            ">".into(),
            dst.display().to_string(),
        ]
    },
    decompress_cmd: |src| vec!["minigzip-ng".into(), "-d".into(), src.display().to_string()],
    allowed_levels: &[1, 2, 3, 4, 5, 6, 7, 8, 9],
};

/// Zopfli has no level knob; its output is gzip-compatible, so plain gzip
/// handles decompression.
pub static ZOPFLI: CompressionTool = CompressionTool {
    name: "zopfli",
    file_suffix: "gz",
    compress_cmd: |_level, src, dst| {
        vec![
            "zopfli".into(),
            "-c".into(),
            src.display().to_string(),
            ">".into(),
            dst.display().to_string(),
        ]
    },
    decompress_cmd: |src| vec!["gzip".into(), "-d".into(), src.display().to_string()],
    allowed_levels: &[11],
};

pub static ZSTD: CompressionTool = CompressionTool {
    name: "zstd",
    file_suffix: "zst",
    compress_cmd: |level, src, dst| {
        vec![
            "zstd".into(),
            format!("-{level}"),
            "-c".into(),
            src.display().to_string(),
            "--single-thread".into(),
            ">".into(),
            dst.display().to_string(),
        ]
    },
    decompress_cmd: |src| vec!["zstd".into(), "-d".into(), src.display().to_string()],
    allowed_levels: &[
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19,
    ],
};

/// All known tool descriptors, in a stable order.
pub fn all_tools() -> Vec<&'static CompressionTool> {
    vec![&GZIP, &GZIP_LIBDEFLATE, &GZIP_CLOUDFLARE, &GZIP_NG, &ZOPFLI, &ZSTD]
}

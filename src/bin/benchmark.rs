use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::{error, LevelFilter};
use prettytable::{row, Table};

use compression_benchmark::benchmark::{benchmark, BenchmarkRow};
use compression_benchmark::tools::all_tools;

#[derive(Parser)]
#[command(name = "benchmark", about = "Benchmark external file compression tools")]
struct Args {
    /// Input file to benchmark.
    #[arg(short = 'i', long)]
    input_file: PathBuf,

    /// Output CSV file to write results.
    #[arg(short = 'o', long)]
    output_csv_file: PathBuf,

    /// Number of iterations to run per (tool, level).
    #[arg(short = 'n', long)]
    iterations: usize,

    /// Enable debug-level logging.
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .init();

    fs::metadata(&args.input_file)?;

    let mut csv_out = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&args.output_csv_file)?;
    csv_out.write_record([
        "method",
        "compress_time",
        "decompress_time",
        "compression_level",
        "compression_ratio",
    ])?;

    let mut all_rows: Vec<BenchmarkRow> = Vec::new();
    for tool in all_tools() {
        // A broken install of one tool should not sink the rest of the sweep.
        match benchmark(tool, &args.input_file, args.iterations, tool.allowed_levels) {
            Ok(rows) => {
                for row in &rows {
                    csv_out.serialize(row)?;
                }
                csv_out.flush()?;
                all_rows.extend(rows);
            }
            Err(err) => error!("skipping {}: {}", tool.name, err),
        }
    }

    if !all_rows.is_empty() {
        print_summary(&all_rows);
    }

    Ok(())
}

/// Prints per-(method, level) means over all iterations.
fn print_summary(rows: &[BenchmarkRow]) {
    let mut order: Vec<(String, i32)> = Vec::new();
    let mut groups: HashMap<(String, i32), Vec<&BenchmarkRow>> = HashMap::new();
    for row in rows {
        let key = (row.method.clone(), row.compression_level);
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(row);
    }

    let mut table = Table::new();
    table.add_row(row!["Method", "Level", "Comp Time (s)", "Decomp Time (s)", "Ratio"]);
    for key in &order {
        let group = &groups[key];
        let n = group.len() as f64;
        let compress_time: f64 = group.iter().map(|r| r.compress_time).sum::<f64>() / n;
        let decompress_time: f64 = group.iter().map(|r| r.decompress_time).sum::<f64>() / n;
        let ratio: f64 = group.iter().map(|r| r.compression_ratio).sum::<f64>() / n;
        table.add_row(row![
            key.0,
            key.1,
            format!("{compress_time:.6}"),
            format!("{decompress_time:.6}"),
            format!("{ratio:.6}"),
        ]);
    }
    table.printstd();
}

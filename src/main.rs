use roundtrace::commands::{run_breakdown, run_scaling, ScalingOptions};
use roundtrace::config::{GridManifest, PhaseFile};
use roundtrace::output::{
    create_breakdown_chart, create_scaling_chart, print_breakdown_statistics,
    print_scaling_statistics, save_breakdown_to_csv, save_scaling_to_csv, PlottersConfig,
};
use roundtrace::utils::Logger;
use roundtrace::{log, log_error};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Scaling,
    Breakdown,
}

#[derive(Debug)]
struct CliArgs {
    mode: Mode,
    input: PathBuf,
    output_prefix: String,
    export_csv: bool,
    draw_charts: bool,
    scaling: ScalingOptions,
}

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {} [options] --scaling <manifest.json> <output_prefix>   - Latency vs users from trial logs", program);
    eprintln!("  {} [options] --breakdown <phases.json> <output_prefix>   - Round time breakdown from phase counters", program);
    eprintln!("\nOptions:");
    eprintln!("  --csv          - Export results to CSV files");
    eprintln!("  --no-chart     - Do not write PNG charts");
    eprintln!("  --skip-empty   - Skip grid cells without client samples instead of aborting");
    eprintln!("  --best-effort  - Ignore the manifest's declared grid and plot whatever cells exist");
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut mode = None;
    let mut positional = Vec::new();
    let mut export_csv = false;
    let mut draw_charts = true;
    let mut scaling = ScalingOptions::default();

    for arg in &args[1..] {
        match arg.as_str() {
            "--scaling" | "--breakdown" => {
                if mode.is_some() {
                    return Err("Only one of --scaling and --breakdown may be given".to_string());
                }
                mode = Some(if arg == "--scaling" {
                    Mode::Scaling
                } else {
                    Mode::Breakdown
                });
            }
            "--csv" => export_csv = true,
            "--no-chart" => draw_charts = false,
            "--skip-empty" => scaling.skip_empty = true,
            "--best-effort" => scaling.best_effort = true,
            other if other.starts_with("--") => {
                return Err(format!("Unknown option '{other}'"));
            }
            _ => positional.push(arg.clone()),
        }
    }

    let mode = mode.ok_or("One of --scaling or --breakdown is required")?;
    if positional.len() != 2 {
        return Err(format!(
            "Expected <input> and <output_prefix>, got {} positional argument(s)",
            positional.len()
        ));
    }
    let output_prefix = positional.pop().unwrap_or_default();
    let input = PathBuf::from(positional.pop().unwrap_or_default());

    Ok(CliArgs {
        mode,
        input,
        output_prefix,
        export_csv,
        draw_charts,
        scaling,
    })
}

fn scaling_main(cli: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = GridManifest::load(&cli.input)?;
    // 매니페스트 기준 상대 경로
    let base_dir = cli.input.parent().unwrap_or_else(|| Path::new("."));
    let report = run_scaling(&manifest, base_dir, &cli.scaling)?;
    print_scaling_statistics(&report);

    if cli.export_csv {
        let filename = save_scaling_to_csv(&report.aggregates, &cli.output_prefix)?;
        log!("Scaling CSV saved to: {}", filename);
    }

    if cli.draw_charts {
        let title = report.title.as_deref().unwrap_or("Round Latency vs Number of Users");
        match create_scaling_chart(&report.series, title, &cli.output_prefix, &PlottersConfig::default()) {
            Ok(path) => log!("Scaling PNG chart saved to: {}", path),
            Err(e) => log_error!("Error generating scaling chart: {}", e),
        }
    }
    Ok(())
}

fn breakdown_main(cli: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let phase_file = PhaseFile::load(&cli.input)?;
    let report = run_breakdown(&phase_file)?;
    print_breakdown_statistics(&report);

    if cli.export_csv {
        let filename = save_breakdown_to_csv(&report.entries, &cli.output_prefix)?;
        log!("Breakdown CSV saved to: {}", filename);
    }

    if cli.draw_charts {
        let title = report.title.as_deref().unwrap_or("Breakdown of Round Time");
        match create_breakdown_chart(&report.entries, title, &cli.output_prefix, &PlottersConfig::default()) {
            Ok(path) => log!("Breakdown PNG chart saved to: {}", path),
            Err(e) => log_error!("Error generating breakdown chart: {}", e),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("roundtrace");

    if args.len() <= 1 {
        eprintln!("Error: No arguments provided");
        print_usage(program);
        return ExitCode::FAILURE;
    }

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage(program);
            return ExitCode::FAILURE;
        }
    };

    Logger::init(&cli.output_prefix);

    let result = match cli.mode {
        Mode::Scaling => scaling_main(&cli),
        Mode::Breakdown => breakdown_main(&cli),
    };

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!("{}", e);
            ExitCode::FAILURE
        }
    };
    if let Err(e) = Logger::flush() {
        eprintln!("Failed to flush log file: {e}");
    }
    code
}

mod logging;

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use rp_app::{AppResult, DeriveKind, import_service, inspect, summary_service};
use tracing::debug;

#[derive(Parser)]
#[command(name = "rp-cli")]
#[command(about = "Reservoir profiles tool - summary files, OFM and well data", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the blocks of a binary file
    List {
        /// Binary file (SMSPEC, UNSMRY, S0001, ...)
        path: PathBuf,
    },
    /// List the blocks of a binary file with their values
    Dump {
        /// Binary file (SMSPEC, UNSMRY, S0001, ...)
        path: PathBuf,
    },
    /// Show an overview of a summary set
    Info {
        /// Summary root, without extension
        root: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export one vector as CSV
    Export {
        /// Summary root, without extension
        root: PathBuf,
        /// Vector keyword, e.g. WOPR
        keyword: String,
        /// Well or group name
        #[arg(short, long)]
        name: Option<String>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert an OFM file to a summary set using a YAML job file
    ImportOfm {
        /// Path to the import YAML file
        config: PathBuf,
    },
    /// Convert well data text to a summary set
    ImportWelldata {
        /// Well data text file
        input: PathBuf,
        /// Output summary root
        output_root: PathBuf,
        /// Write numbered data files instead of one unified file
        #[arg(long)]
        numbered: bool,
    },
    /// Write the well vectors of a summary set as well data text
    ExportWelldata {
        /// Summary root, without extension
        root: PathBuf,
        /// Output text file
        output: PathBuf,
    },
    /// Write the difference of two summary sets
    Diff {
        /// Summary root of the first set
        a: PathBuf,
        /// Summary root of the second set
        b: PathBuf,
        /// Output summary root
        output_root: PathBuf,
        /// Write numbered data files instead of one unified file
        #[arg(long)]
        numbered: bool,
    },
    /// Add a cumulative or rate vector derived from another one
    Derive {
        /// Summary root, without extension
        root: PathBuf,
        /// Source keyword
        source: String,
        /// New keyword
        target: String,
        /// What to compute
        #[arg(long, value_enum)]
        kind: Kind,
        /// Well or group name of the source
        #[arg(short, long)]
        name: Option<String>,
        /// Output summary root (defaults to rewriting the input set)
        #[arg(short, long)]
        output_root: Option<PathBuf>,
        /// Write numbered data files instead of one unified file
        #[arg(long)]
        numbered: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Cumulative,
    Rate,
}

impl From<Kind> for DeriveKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Cumulative => DeriveKind::Cumulative,
            Kind::Rate => DeriveKind::Rate,
        }
    }
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::List { path } => inspect::list_blocks(&path, &mut io::stdout().lock()),
        Commands::Dump { path } => inspect::dump_blocks(&path, &mut io::stdout().lock()),
        Commands::Info { root, json } => cmd_info(&root, json),
        Commands::Export {
            root,
            keyword,
            name,
            output,
        } => cmd_export(&root, &keyword, name.as_deref(), output.as_deref()),
        Commands::ImportOfm { config } => cmd_import_ofm(&config),
        Commands::ImportWelldata {
            input,
            output_root,
            numbered,
        } => {
            let report = import_service::import_welldata(&input, &output_root, !numbered)?;
            print_report(&report);
            Ok(())
        }
        Commands::ExportWelldata { root, output } => {
            let wells = import_service::export_welldata(&root, &output)?;
            println!("✓ Wrote {} wells to {}", wells, output.display());
            Ok(())
        }
        Commands::Diff {
            a,
            b,
            output_root,
            numbered,
        } => {
            let report = summary_service::diff_summaries(&a, &b, &output_root, !numbered)?;
            println!(
                "✓ Compared {} vectors, {} identical",
                report.compared, report.identical
            );
            for f in &report.files {
                println!("  {}", f.display());
            }
            Ok(())
        }
        Commands::Derive {
            root,
            source,
            target,
            kind,
            name,
            output_root,
            numbered,
        } => cmd_derive(
            &root,
            &source,
            &target,
            kind.into(),
            name.as_deref(),
            output_root.as_deref().unwrap_or(&root),
            !numbered,
        ),
    }
}

fn cmd_info(root: &Path, json: bool) -> AppResult<()> {
    let profiles = summary_service::load_summary(root)?;
    let info = summary_service::summary_info(&profiles);
    if json {
        let text = serde_json::to_string_pretty(&info)
            .map_err(|e| rp_app::AppError::InvalidInput(e.to_string()))?;
        println!("{}", text);
        return Ok(());
    }

    println!("Summary set: {}", root.display());
    println!("  Id: {}", info.id.as_deref().unwrap_or("-"));
    println!("  Start date: {}", info.start_date);
    println!("  Vectors: {}", info.vectors);
    println!("  Time steps: {}", info.steps);
    if let Some((first, last)) = info.time_range {
        println!("  Time range: {} - {} days", first, last);
    }
    let (nx, ny, nz) = info.grid_dim;
    println!("  Grid: {} x {} x {}", nx, ny, nz);
    println!("  Wells ({}): {}", info.wells.len(), info.wells.join(" "));
    println!("  Groups ({}): {}", info.groups.len(), info.groups.join(" "));
    Ok(())
}

fn cmd_export(
    root: &Path,
    keyword: &str,
    name: Option<&str>,
    output: Option<&Path>,
) -> AppResult<()> {
    let profiles = summary_service::load_summary(root)?;
    let series = summary_service::extract_series(&profiles, keyword, name)?;
    let column = match name {
        Some(n) => format!("{}:{}", keyword, n),
        None => keyword.to_string(),
    };

    if let Some(path) = output {
        let mut file = io::BufWriter::new(std::fs::File::create(path)?);
        summary_service::write_series_csv(&mut file, &column, &series)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        let mut out = io::stdout().lock();
        summary_service::write_series_csv(&mut out, &column, &series)?;
        out.flush()?;
    }
    Ok(())
}

fn cmd_import_ofm(config_path: &Path) -> AppResult<()> {
    println!("Importing with job file: {}", config_path.display());
    let config = rp_app::load_import_config(config_path)?;
    debug!(
        input = %config.input.display(),
        output = %config.output_root.display(),
        "loaded import job"
    );
    let report = import_service::import_ofm(&config)?;
    print_report(&report);
    Ok(())
}

fn cmd_derive(
    root: &Path,
    source: &str,
    target: &str,
    kind: DeriveKind,
    name: Option<&str>,
    output_root: &Path,
    unified: bool,
) -> AppResult<()> {
    let mut profiles = summary_service::load_summary(root)?;
    summary_service::derive_vector(&mut profiles, source, name, target, kind)?;
    let files = rp_app::write_summary_set(&profiles, output_root, unified)?;
    println!("✓ Added {} to {}", target, output_root.display());
    for f in &files {
        println!("  {}", f.display());
    }
    Ok(())
}

fn print_report(report: &import_service::ImportReport) {
    println!(
        "✓ Wrote {} wells, {} vectors, {} time steps",
        report.wells, report.vectors, report.steps
    );
    for f in &report.files {
        println!("  {}", f.display());
    }
}

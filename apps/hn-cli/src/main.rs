use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use hn_catalog::{CatalogError, PipeMaterial};
use hn_project::{NetworkFile, NetworkReport, ProjectError, SegmentReport};
use hn_solver::{OPTIMAL_RECOMMENDATION, SolverError, calculate_network_with_config};
use tracing::info;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Project(#[from] ProjectError),

    #[error("Calculation failed: {0}")]
    Solver(#[from] SolverError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "hn-cli")]
#[command(about = "hydronet - domestic water network sizing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a network file
    Validate {
        /// Path to the network file (YAML or JSON)
        network_path: PathBuf,
    },
    /// Size every segment of a network
    Calculate {
        /// Path to the network file (YAML or JSON)
        network_path: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the diameter table of a pipe material
    Catalog {
        /// Material key (copper, pex, multilayer, steel)
        material: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { network_path } => cmd_validate(&network_path),
        Commands::Calculate {
            network_path,
            format,
            output,
        } => cmd_calculate(&network_path, format, output.as_deref()),
        Commands::Catalog { material } => cmd_catalog(&material),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn cmd_validate(network_path: &Path) -> CliResult<()> {
    println!("Validating network: {}", network_path.display());
    let file = hn_project::load(network_path)?;
    let params = file.to_parameters()?;
    let roots = params.segments.iter().filter(|s| s.is_root()).count();
    println!("✓ Network is valid");
    println!("  Name: {}", file.name);
    println!("  Type: {}", params.network_type);
    println!("  Material: {}", params.material.display_name());
    println!("  Segments: {} ({} roots)", params.segments.len(), roots);
    println!("  Developed length: {:.1} m", params.loop_length_m());
    Ok(())
}

fn cmd_calculate(
    network_path: &Path,
    format: OutputFormat,
    output: Option<&Path>,
) -> CliResult<()> {
    let file = hn_project::load(network_path)?;
    let mut params = file.to_parameters()?;
    let config = file.solver_config();
    info!(path = %network_path.display(), "calculating");

    let outcome = calculate_network_with_config(&mut params, &config)?;
    let report = NetworkReport::new(&file.name, &params, &outcome);

    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Table => render_table(&file, &report),
    };

    match output {
        Some(path) => {
            std::fs::write(path, text).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            println!("✓ Report written to {}", path.display());
        }
        None => println!("{text}"),
    }

    if !outcome.is_fully_converged() {
        eprintln!("warning: loop return solver did not fully converge");
    }
    Ok(())
}

fn cmd_catalog(material: &str) -> CliResult<()> {
    let material: PipeMaterial = material.parse()?;
    println!(
        "{} (roughness {} mm)",
        material.display_name(),
        material.roughness_mm()
    );
    println!("  {:>8}  {:>8}", "DN (mm)", "ID (mm)");
    for &dn in material.diameters() {
        println!("  {:>8.1}  {:>8.1}", dn, material.internal_diameter(dn));
    }
    Ok(())
}

fn render_table(file: &NetworkFile, report: &NetworkReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} - {} / {}\n",
        file.name, report.network_type, report.material
    ));
    out.push_str(&format!(
        "{:<14} {:>8} {:>6} {:>6} {:>8} {:>8} {:>7}",
        "segment", "Q l/min", "DN", "v m/s", "dp mCE", "Pout bar", "Tout C"
    ));
    let with_loop = report.loop_summary.is_some();
    if with_loop {
        out.push_str(&format!(" {:>8} {:>6} {:>7}", "Qr l/min", "DNr", "Tr C"));
    }
    out.push('\n');

    for seg in &report.segments {
        out.push_str(&segment_row(seg, with_loop));
        out.push('\n');
    }

    out.push_str(&format!(
        "\nSource flow: {:.2} l/min, developed length: {:.1} m\n",
        report.source_flow_lpm, report.loop_length_m
    ));
    if let (Some(p), Some(id)) = (
        report.lowest_outlet_pressure_bar,
        report.critical_segment_id.as_deref(),
    ) {
        out.push_str(&format!("Lowest outlet pressure: {p:.2} bar at {id}\n"));
    }
    if report.total_heat_loss_w > 0.0 {
        out.push_str(&format!(
            "Heat loss: supply {:.0} W, return {:.0} W\n",
            report.total_heat_loss_w, report.total_return_heat_loss_w
        ));
    }
    if let Some(summary) = &report.loop_summary {
        out.push_str(&format!(
            "Loop: {} iterations, converged={}, last change {:.2}%\n",
            summary.iterations,
            summary.converged,
            summary.max_relative_change * 100.0
        ));
        for repair in &summary.repairs {
            out.push_str(&format!(
                "  root {}: {} repair steps, satisfied={}, deficit {:.2} C\n",
                repair.root_id, repair.attempts, repair.satisfied, repair.final_deficit_c
            ));
        }
    }

    out.push_str(&format!("Warnings: {}\n", report.warning_count));
    let flagged = report
        .segments
        .iter()
        .filter(|s| s.recommendation != OPTIMAL_RECOMMENDATION);
    for seg in flagged {
        out.push_str(&format!("  {}: {}\n", seg.id, seg.recommendation));
    }
    out
}

fn segment_row(seg: &SegmentReport, with_loop: bool) -> String {
    let outlet_temp = seg
        .supply
        .as_ref()
        .map(|s| format!("{:.1}", s.outlet_temperature_c))
        .unwrap_or_else(|| "-".to_string());
    let mut row = format!(
        "{:<14} {:>8.2} {:>6.1} {:>6.2} {:>8.3} {:>8.2} {:>7}",
        seg.id,
        seg.flow_rate_lpm,
        seg.nominal_diameter_mm,
        seg.velocity_mps,
        seg.pressure_drop_mce,
        seg.outlet_pressure_bar,
        outlet_temp
    );
    if with_loop && let Some(ret) = &seg.return_path {
        row.push_str(&format!(
            " {:>8.3} {:>6.1} {:>7.1}",
            ret.flow_rate_lpm, ret.nominal_diameter_mm, ret.outlet_temperature_c
        ));
    }
    row
}

//! linegrid CLI - transpose line files and reconstruct transaction batches
//!
//! # Commands
//!
//! ```bash
//! linegrid transpose a.txt b.txt              # Lines → columns, quoted CSV to stdout
//! linegrid transpose a.txt --download         # ... written to table_export.csv
//! linegrid reconstruct day1.txt day2.txt      # KEY,VALUE batches → field matrix
//! linegrid reconstruct *.txt --html out.html  # ... plus an HTML report
//! linegrid layout                             # Show the default layout JSON
//! ```

use clap::{Parser, Subcommand};
use linegrid::logs::{log_info_indent, LOG_BROADCASTER};
use linegrid::reconstruct::{export, render};
use linegrid::{export_matrix, run_reconstruct, run_transpose, transpose, Layout, TransposeOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "linegrid")]
#[command(about = "Transpose line files and reconstruct transaction batches", long_about = None)]
struct Cli {
    /// Do not print progress logs
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Turn every line of every file into a table column
    Transpose {
        /// Input files, in column order
        files: Vec<PathBuf>,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the CSV to table_export.csv in the current directory
        #[arg(long, conflicts_with = "output")]
        download: bool,

        /// Also write the table as HTML
        #[arg(long)]
        html: Option<PathBuf>,

        /// Fixed row labels, comma separated (default: one row per field)
        #[arg(long, value_delimiter = ',')]
        rows: Option<Vec<String>>,

        /// Label of the row-label column
        #[arg(long, default_value = transpose::DEFAULT_CORNER)]
        corner: String,
    },

    /// Rebuild transactions from KEY,VALUE batch files
    Reconstruct {
        /// Input batch files
        files: Vec<PathBuf>,

        /// Output file for the matrix export (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the export to downloadedcsv.txt in the current directory
        #[arg(long, conflicts_with = "output")]
        download: bool,

        /// Also write an HTML report (gap summary + table)
        #[arg(long)]
        html: Option<PathBuf>,

        /// Layout JSON file (default: built-in layout)
        #[arg(short, long, env = "LINEGRID_LAYOUT")]
        layout: Option<PathBuf>,

        /// Print the full report as JSON instead of the export
        #[arg(long)]
        json: bool,
    },

    /// Show the default reconstruction layout
    Layout,
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    LOG_BROADCASTER.set_muted(cli.quiet);

    let result = match cli.command {
        Commands::Transpose {
            files,
            output,
            download,
            html,
            rows,
            corner,
        } => {
            let options = TransposeOptions {
                row_labels: rows,
                corner_label: corner,
            };
            let target = output_target(output, download, transpose::DOWNLOAD_NAME);
            cmd_transpose(&files, &options, target.as_deref(), html.as_deref()).await
        }

        Commands::Reconstruct {
            files,
            output,
            download,
            html,
            layout,
            json,
        } => {
            let target = output_target(output, download, export::DOWNLOAD_NAME);
            cmd_reconstruct(&files, layout.as_deref(), target.as_deref(), html.as_deref(), json)
                .await
        }

        Commands::Layout => cmd_layout(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn output_target(output: Option<PathBuf>, download: bool, download_name: &str) -> Option<PathBuf> {
    if download {
        Some(PathBuf::from(download_name))
    } else {
        output
    }
}

async fn cmd_transpose(
    files: &[PathBuf],
    options: &TransposeOptions,
    output: Option<&Path>,
    html: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = run_transpose(files, options).await?;

    if let Some(html_path) = html {
        fs::write(html_path, report.table.to_html())?;
        eprintln!("💾 HTML written to: {}", html_path.display());
    }

    write_output(&report.table.to_csv()?, output)
}

async fn cmd_reconstruct(
    files: &[PathBuf],
    layout_path: Option<&Path>,
    output: Option<&Path>,
    html: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout = match layout_path {
        Some(path) => Layout::from_file(path)?,
        None => Layout::default(),
    };

    let report = run_reconstruct(files, &layout).await?;
    let result = &report.result;

    if let Some(html_path) = html {
        fs::write(html_path, render::render_page(&result.matrix, &result.gaps))?;
        eprintln!("💾 HTML written to: {}", html_path.display());
    }

    if json {
        return write_output(&serde_json::to_string_pretty(&report)?, output);
    }

    for (position, number) in result.gaps.rows() {
        log_info_indent(format!("{:>4}  {}", position, number), 1);
    }

    write_output(&export_matrix(&result.matrix), output)
}

fn cmd_layout() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", Layout::default().to_json()?);
    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

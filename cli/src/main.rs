//! reportpdf CLI - markdown sprint report to PDF renderer

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use reportpdf::{
    extract_key_sections, find_latest_report, list_reports, to_text, Document, PageGeometry,
    RenderOptions, RenderStats, ReportRenderer,
};

#[derive(Parser)]
#[command(name = "reportpdf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render markdown sprint reports to PDF", long_about = None)]
struct Cli {
    /// Input markdown file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a markdown report to PDF
    Render {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file (default: input with .pdf extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Print render statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the plain-text preview of a report
    Text {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the risk, overdue and goals sections of a report
    Sections {
        /// Input markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the most recently modified report in a directory
    Latest {
        /// Directory to search
        #[arg(long, value_name = "DIR", default_value = ".")]
        dir: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Render every report in a directory in parallel
    Batch {
        /// Directory containing markdown reports
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args, Default)]
struct LayoutArgs {
    /// Directory image paths resolve against
    #[arg(long, value_name = "DIR", env = "REPORTPDF_IMAGE_DIR")]
    image_dir: Option<PathBuf>,

    /// Directory to write PDFs into
    #[arg(long, value_name = "DIR", env = "REPORTPDF_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Use US Letter instead of A4
    #[arg(long)]
    letter: bool,

    /// Write uncompressed content streams
    #[arg(long)]
    no_compress: bool,
}

impl LayoutArgs {
    fn options(&self) -> RenderOptions {
        let mut options = RenderOptions::new().with_compression(!self.no_compress);
        if self.letter {
            options = options.with_geometry(PageGeometry::letter());
        }
        if let Some(dir) = &self.image_dir {
            options = options.with_image_dir(dir);
        }
        if let Some(dir) = &self.output_dir {
            options = options.with_output_dir(dir);
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            output,
            layout,
            json,
        }) => cmd_render(&input, output.as_deref(), &layout, json),
        Some(Commands::Text { input }) => cmd_text(&input),
        Some(Commands::Sections { input, json }) => cmd_sections(&input, json),
        Some(Commands::Latest { dir, layout }) => cmd_latest(&dir, &layout),
        Some(Commands::Batch { dir, layout }) => cmd_batch(&dir, &layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render if input is provided
            if let Some(input) = cli.input {
                cmd_render(&input, cli.output.as_deref(), &cli.layout, false)
            } else {
                println!("{}", "Usage: reportpdf <FILE> [OUTPUT]".yellow());
                println!("       reportpdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    layout: &LayoutArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let renderer = ReportRenderer::with_options(layout.options());
    let result = match output {
        Some(path) => renderer.render_file_to(input, path)?,
        None => renderer.render_file(input)?,
    };

    if json {
        println!("{}", result.to_json()?);
    } else {
        println!("{} {}", "Saved to".green(), result.pdf_path.display());
        print_stats(&result.stats);
    }

    Ok(())
}

fn cmd_text(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = Document::open(input)?;
    let banner = "=".repeat(60);

    println!("{}", banner.dimmed());
    println!("{}", "REPORT PREVIEW".cyan().bold());
    println!("{}", banner.dimmed());
    println!("{}", to_text(&doc.markdown()));
    println!("{}", banner.dimmed());

    Ok(())
}

fn cmd_sections(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = Document::open(input)?;
    let sections = extract_key_sections(&doc.markdown());

    if json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
        return Ok(());
    }

    if sections.is_empty() {
        println!("{}", "No key sections found".yellow());
        return Ok(());
    }

    let entries = [
        ("Risk Analysis", &sections.risk_analysis),
        ("Overdue Tasks", &sections.overdue_tasks),
        ("Goals Until Next Sprint Meeting", &sections.goals),
    ];
    for (title, body) in entries {
        if let Some(body) = body {
            println!("{}", title.cyan().bold());
            println!("{}", "─".repeat(40).dimmed());
            println!("{}\n", body);
        }
    }

    Ok(())
}

fn cmd_latest(dir: &Path, layout: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let latest = find_latest_report(dir)?
        .ok_or_else(|| format!("No markdown reports found in {}", dir.display()))?;
    log::debug!("Latest report: {}", latest.display());
    println!("{} {}", "Rendering".cyan(), latest.display());
    cmd_render(&latest, None, layout, false)
}

fn cmd_batch(dir: &Path, layout: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let reports = list_reports(dir)?;
    if reports.is_empty() {
        println!("{}", "No markdown reports found".yellow());
        return Ok(());
    }

    let pb = ProgressBar::new(reports.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Rendering reports...");

    let renderer = ReportRenderer::with_options(layout.options());
    let results = renderer.render_files_with_progress(&reports, |path, _| {
        if let Some(name) = path.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    });
    pb.finish_with_message("Done!");

    let mut total = RenderStats::new();
    let mut failures = 0;
    println!();
    for (source, result) in reports.iter().zip(&results) {
        match result {
            Ok(r) => {
                total.merge(&r.stats);
                println!("  {} {}", "✓".green(), r.pdf_path.display());
            }
            Err(e) => {
                failures += 1;
                println!("  {} {}: {}", "✗".red(), source.display(), e);
            }
        }
    }

    println!();
    print_stats(&total);

    if failures > 0 {
        return Err(format!("{} of {} reports failed", failures, reports.len()).into());
    }
    Ok(())
}

fn print_stats(stats: &RenderStats) {
    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!(
        "{}: {} placed ({} inline, {} swept)",
        "Images".bold(),
        stats.images_placed(),
        stats.images_inline,
        stats.images_swept
    );
    if stats.images_missing > 0 {
        println!("{}: {}", "Missing".yellow().bold(), stats.images_missing);
    }
    if stats.images_failed > 0 {
        println!("{}: {}", "Failed".red().bold(), stats.images_failed);
    }
}

fn cmd_version() {
    println!("{} {}", "reportpdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown sprint report to PDF renderer");
    println!();
    println!("License: MIT");
}

//! Command-line front end: format a document with a template's styles, or
//! convert a document to LaTeX.
use clap::{Parser, Subcommand};
use restyle::{FormatOptions, LatexOptions, RestyleConfig};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[clap(name = "restyle", version, about = "Apply a Word template's styles to documents, or convert them to LaTeX")]
struct Cli {
    /// Log what is assigned to every paragraph
    #[clap(long, short, global = true)]
    verbose: bool,

    /// YAML configuration file
    #[clap(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Restyle TARGET with the styles defined in TEMPLATE
    Format {
        #[clap(value_name = "TEMPLATE")]
        template: PathBuf,
        #[clap(value_name = "TARGET")]
        target: PathBuf,
        /// Output file; defaults to a timestamped name in the current directory
        #[clap(long, short, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
    /// Convert INPUT to a LaTeX source file
    Latex {
        #[clap(value_name = "INPUT")]
        input: PathBuf,
        /// Output file; the LaTeX source goes to stdout without one
        #[clap(long, short, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> restyle::Result<()> {
    let config = match &cli.config {
        Some(path) => RestyleConfig::load(path)?,
        None => RestyleConfig::default(),
    };

    match cli.command {
        Command::Format {
            template,
            target,
            output,
        } => {
            require_docx(&template)?;
            require_docx(&target)?;
            let options = FormatOptions {
                verbose: cli.verbose || config.format.verbose,
                ..config.format
            };
            let output = output.unwrap_or_else(default_output_name);
            let report = restyle::apply_formatting_files(&template, &target, &output, &options)?;
            println!(
                "Formatted {} paragraphs ({} fell back to Normal) -> {}",
                report.len(),
                report.fallback_count(),
                output.display()
            );
        },
        Command::Latex { input, output } => {
            require_docx(&input)?;
            let options = LatexOptions {
                verbose: cli.verbose || config.latex.verbose,
                ..config.latex
            };
            let latex = restyle::convert_file_to_latex(&input, &options)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &latex)?;
                    log::info!("wrote {}", path.display());
                },
                None => print!("{latex}"),
            }
        },
    }
    Ok(())
}

fn require_docx(path: &Path) -> restyle::Result<()> {
    let is_docx = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));
    if is_docx {
        Ok(())
    } else {
        Err(restyle::Error::Other(format!(
            "{} is not a .docx file",
            path.display()
        )))
    }
}

fn default_output_name() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("formatted_document_{stamp}.docx"))
}

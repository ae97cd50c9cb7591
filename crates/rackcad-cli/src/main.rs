//! rackcad CLI - build rack hardware from the part catalog
//!
//! Lists the catalog, builds parts to OpenSCAD or JSON, and prints part
//! summaries.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rackcad::{parts, Part, PartConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rackcad")]
#[command(about = "Parametric rack hardware generator", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the parts in the catalog
    List,
    /// Build one part
    Build {
        /// Catalog name of the part
        part: String,
        /// Output file (default: <part>.<format> in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// TOML file with parameter overrides
        #[arg(long)]
        params: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Scad)]
        format: Format,
    },
    /// Build every part in the catalog
    BuildAll {
        /// Directory for the generated files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// TOML file with parameter overrides
        #[arg(long)]
        params: Option<PathBuf>,
    },
    /// Display node count and bounds of a part
    Info {
        /// Catalog name of the part
        part: String,
        /// TOML file with parameter overrides
        #[arg(long)]
        params: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// OpenSCAD source
    Scad,
    /// JSON IR document
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Scad => "scad",
            Format::Json => "json",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::List => list_parts(),
        Commands::Build {
            part,
            output,
            params,
            format,
        } => {
            let config = load_config(params.as_deref())?;
            let output = output.unwrap_or_else(|| default_output(Path::new("."), &part, format));
            build_part(&part, &config, &output, format)?;
        }
        Commands::BuildAll { out_dir, params } => {
            let config = load_config(params.as_deref())?;
            build_all(&config, &out_dir)?;
        }
        Commands::Info { part, params } => {
            let config = load_config(params.as_deref())?;
            show_info(&part, &config)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<PartConfig> {
    match path {
        Some(path) => PartConfig::load(path)
            .with_context(|| format!("failed to load parameters from {}", path.display())),
        None => Ok(PartConfig::new()),
    }
}

fn default_output(dir: &Path, part: &str, format: Format) -> PathBuf {
    dir.join(format!("{part}.{}", format.extension()))
}

fn list_parts() {
    let width = parts::catalog()
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(0);
    for entry in parts::catalog() {
        println!("{:width$}  {}", entry.name, entry.description);
    }
}

fn build(name: &str, config: &PartConfig) -> Result<Part> {
    parts::build(name, config).with_context(|| format!("failed to build {name}"))
}

fn build_part(name: &str, config: &PartConfig, output: &Path, format: Format) -> Result<()> {
    let part = build(name, config)?;
    match format {
        Format::Scad => part
            .write_scad(output)
            .with_context(|| format!("failed to write {}", output.display()))?,
        Format::Json => {
            let json = part.to_json()?;
            std::fs::write(output, json)
                .with_context(|| format!("failed to write {}", output.display()))?;
            tracing::info!(path = %output.display(), "wrote JSON document");
        }
    }
    println!("Built {name} to {}", output.display());
    Ok(())
}

fn build_all(config: &PartConfig, out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    for name in config.part_names() {
        if parts::find(name).is_none() {
            tracing::warn!(part = name, "parameters given for a part not in the catalog");
        }
    }

    for entry in parts::catalog() {
        let output = default_output(out_dir, entry.name, Format::Scad);
        build_part(entry.name, config, &output, Format::Scad)?;
    }
    println!("Built {} parts", parts::catalog().len());
    Ok(())
}

fn show_info(name: &str, config: &PartConfig) -> Result<()> {
    let part = build(name, config)?;
    let doc = part.to_document();

    println!("rackcad part: {name}");
    if let Some(entry) = parts::find(name) {
        println!("  {}", entry.description);
    }
    println!("  IR version: {}", doc.version);
    println!("  Nodes: {}", part.node_count());
    println!("  Root: {}", part.root_op().kind());

    match part.bounds() {
        Some(b) => {
            let size = b.size();
            println!("\nBounds (mm):");
            println!("  Min: [{:.3}, {:.3}, {:.3}]", b.min.x, b.min.y, b.min.z);
            println!("  Max: [{:.3}, {:.3}, {:.3}]", b.max.x, b.max.y, b.max.z);
            println!("  Size: {:.3} x {:.3} x {:.3}", size.x, size.y, size.z);
        }
        None => println!("\nBounds: empty"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_build_with_options() {
        let cli = Cli::parse_from([
            "rackcad",
            "-v",
            "build",
            "netstack_v2_top",
            "-o",
            "top.json",
            "--format",
            "json",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Build {
                part,
                output,
                params,
                format,
            } => {
                assert_eq!(part, "netstack_v2_top");
                assert_eq!(output, Some(PathBuf::from("top.json")));
                assert_eq!(params, None);
                assert_eq!(format, Format::Json);
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn build_all_defaults_to_current_dir() {
        let cli = Cli::parse_from(["rackcad", "build-all"]);
        match cli.command {
            Commands::BuildAll { out_dir, params } => {
                assert_eq!(out_dir, PathBuf::from("."));
                assert!(params.is_none());
            }
            _ => panic!("expected build-all"),
        }
    }

    #[test]
    fn default_output_uses_format_extension() {
        let dir = Path::new("out");
        assert_eq!(
            default_output(dir, "m3_bolt_tolerance", Format::Scad),
            PathBuf::from("out/m3_bolt_tolerance.scad")
        );
        assert_eq!(
            default_output(dir, "m3_bolt_tolerance", Format::Json),
            PathBuf::from("out/m3_bolt_tolerance.json")
        );
    }

    #[test]
    fn build_all_writes_every_part() {
        let dir = std::env::temp_dir().join(format!("rackcad-cli-{}", std::process::id()));
        build_all(&PartConfig::new(), &dir).unwrap();
        for entry in parts::catalog() {
            let path = dir.join(format!("{}.scad", entry.name));
            let src = std::fs::read_to_string(&path).unwrap();
            assert!(src.contains(&format!("// {}", entry.name)));
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unknown_part_is_an_error() {
        let err = show_info("nope", &PartConfig::new()).unwrap_err();
        assert!(err.to_string().contains("failed to build nope"));
    }
}

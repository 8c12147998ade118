//! layoutdoc CLI - layout parser output to chunks, Markdown, HTML and JSON

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use layoutdoc::render::{self, DocumentStats};
use layoutdoc::{
    CleanupPreset, Document, JsonFormat, LayoutReader, NestingPolicy, RenderOptions,
    TableFallback,
};

#[derive(Parser)]
#[command(name = "layoutdoc")]
#[command(version)]
#[command(about = "Build document trees from PDF layout-parser output", long_about = None)]
struct Cli {
    #[command(flatten)]
    read: ReadArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads a file.
#[derive(Args)]
struct ReadArgs {
    /// Fail on the first malformed record or table
    #[arg(long, global = true)]
    strict: bool,

    /// How body content nests under headings
    #[arg(long, value_enum, global = true, default_value = "strict")]
    nesting: NestingMode,

    /// Text cleanup preset
    #[arg(long, value_enum, global = true)]
    cleanup: Option<CleanupLevel>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the document as plain text
    Text {
        /// Parser response (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Leave tables out
        #[arg(long)]
        no_tables: bool,
    },

    /// Render the document as Markdown
    #[command(alias = "md")]
    Markdown {
        /// Parser response (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Table rendering mode
        #[arg(long, value_enum, default_value = "markdown")]
        table_mode: TableMode,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,
    },

    /// Render the document as HTML
    Html {
        /// Parser response (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dump the document tree as JSON
    Json {
        /// Parser response (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print content chunks in reading order
    Chunks {
        /// Parser response (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Prefix each chunk with its section path
        #[arg(long)]
        context: bool,

        /// Print chunk records as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Show document statistics and diagnostics
    Info {
        /// Parser response (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the document tree outline
    Outline {
        /// Parser response (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Unicode normalization and whitespace only
    Minimal,
    /// Also ligatures, control and replacement characters
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum NestingMode {
    /// Content nests under a heading only when deeper
    Strict,
    /// Content continues the innermost heading at any level
    Continuation,
}

impl From<NestingMode> for NestingPolicy {
    fn from(mode: NestingMode) -> Self {
        match mode {
            NestingMode::Strict => NestingPolicy::Strict,
            NestingMode::Continuation => NestingPolicy::Continuation,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TableMode {
    /// Standard Markdown tables
    Markdown,
    /// HTML tables for tables with spanning cells
    Html,
}

impl From<TableMode> for TableFallback {
    fn from(mode: TableMode) -> Self {
        match mode {
            TableMode::Markdown => TableFallback::Markdown,
            TableMode::Html => TableFallback::Html,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let read = &cli.read;

    let result = match cli.command {
        Commands::Text {
            input,
            output,
            no_tables,
        } => cmd_text(&input, output.as_deref(), no_tables, read),
        Commands::Markdown {
            input,
            output,
            table_mode,
            max_heading,
        } => cmd_markdown(&input, output.as_deref(), table_mode, max_heading, read),
        Commands::Html { input, output } => cmd_html(&input, output.as_deref(), read),
        Commands::Json {
            input,
            output,
            compact,
        } => cmd_json(&input, output.as_deref(), compact, read),
        Commands::Chunks {
            input,
            context,
            json,
        } => cmd_chunks(&input, context, json, read),
        Commands::Info { input } => cmd_info(&input, read),
        Commands::Outline { input } => cmd_outline(&input, read),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load(input: &Path, args: &ReadArgs) -> layoutdoc::Result<Document> {
    let mut reader = LayoutReader::new().with_nesting(args.nesting.into());
    if args.strict {
        reader = reader.strict();
    }
    if let Some(level) = args.cleanup {
        reader = reader.with_cleanup(level.into());
    }

    let doc = reader.read_file(input)?;
    log::info!(
        "read {} records into {} nodes from {}",
        doc.record_count(),
        doc.node_count(),
        input.display()
    );
    for diagnostic in doc.diagnostics() {
        eprintln!(
            "{} record {}: {}",
            "Warning".yellow().bold(),
            diagnostic.record_index,
            diagnostic.message
        );
    }
    Ok(doc)
}

fn emit(content: &str, output: Option<&Path>) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_text(input: &Path, output: Option<&Path>, no_tables: bool, read: &ReadArgs) -> CliResult {
    let doc = load(input, read)?;
    let options = RenderOptions::new().with_tables(!no_tables);
    let text = render::to_text(&doc, &options)?;
    emit(&text, output)
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    table_mode: TableMode,
    max_heading: u8,
    read: &ReadArgs,
) -> CliResult {
    let doc = load(input, read)?;
    let options = RenderOptions::new()
        .with_table_fallback(table_mode.into())
        .with_max_heading(max_heading);
    let markdown = render::to_markdown(&doc, &options)?;
    emit(&markdown, output)
}

fn cmd_html(input: &Path, output: Option<&Path>, read: &ReadArgs) -> CliResult {
    let doc = load(input, read)?;
    emit(&render::to_html(&doc), output)
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool, read: &ReadArgs) -> CliResult {
    let doc = load(input, read)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;
    emit(&json, output)
}

fn cmd_chunks(input: &Path, context: bool, json: bool, read: &ReadArgs) -> CliResult {
    let doc = load(input, read)?;

    if json {
        for record in render::to_chunk_records(&doc) {
            println!("{}", serde_json::to_string(&record)?);
        }
        return Ok(());
    }

    for (i, text) in render::chunk_texts(&doc, context).iter().enumerate() {
        println!("{}", format!("--- chunk {} ---", i + 1).dimmed());
        println!("{}", text);
    }
    Ok(())
}

fn cmd_info(input: &Path, read: &ReadArgs) -> CliResult {
    let doc = load(input, read)?;
    let stats = DocumentStats::collect(&doc);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Records".bold(), stats.record_count);
    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!("{}: {}", "Max depth".bold(), stats.max_depth);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!(
        "{}: {} ({} malformed)",
        "Tables".bold(),
        stats.table_count,
        stats.malformed_table_count
    );
    println!("{}: {}", "Other blocks".bold(), stats.block_count);
    println!("{}: {}", "Chunks".bold(), stats.chunk_count);
    println!("{}: {}", "Sentences".bold(), stats.sentence_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    if !doc.diagnostics().is_empty() {
        println!();
        println!("{}", "Diagnostics".yellow().bold());
        println!("{}", "─".repeat(40).dimmed());
        for diagnostic in doc.diagnostics() {
            println!(
                "  record {} ({:?}): {}",
                diagnostic.record_index, diagnostic.kind, diagnostic.message
            );
        }
    }

    Ok(())
}

fn cmd_outline(input: &Path, read: &ReadArgs) -> CliResult {
    let doc = load(input, read)?;
    println!("{}", doc.outline());
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "layoutdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document trees from PDF layout-parser output");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/layoutdoc/layoutdoc".dimmed()
    );
    println!("License: MIT");
}

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use target_pipeline::config::{self, PipelineSettings};
use target_pipeline::{
    Document, EditorHandle, InMemoryHatTokenMap, MarkHistory, Modifier, NoSyntax,
    PipelineContext, PipelineResult, Range, ScopeType, SelectionWithEditor, Target,
    TargetPosition, TypedSelection,
};

/// Resolve editor targets into annotated selections
#[derive(Parser)]
#[command(name = "target-pipeline")]
#[command(version)]
#[command(about = "Resolve editor targets into annotated selections")]
struct Cli {
    /// Settings file to use instead of the user config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a target against a file and print the selections as JSON
    Resolve {
        /// File the target refers to
        #[arg(long)]
        file: PathBuf,

        /// Target descriptor as JSON
        #[arg(long)]
        target: String,

        /// Cursor selection as LINE:COL-LINE:COL (repeatable)
        #[arg(long = "selection")]
        selections: Vec<Range>,

        /// Range of the previous command's "that" mark (repeatable)
        #[arg(long)]
        that: Vec<Range>,

        /// Range of the previous command's "source" mark (repeatable)
        #[arg(long)]
        source: Vec<Range>,
    },
    /// Print an example of every supported modifier descriptor
    Modifiers,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedSelection<'a> {
    text: Option<&'a str>,
    #[serde(flatten)]
    selection: &'a TypedSelection,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> PipelineResult<()> {
    let settings = config::resolve_settings(cli.config.as_deref())?;
    init_logging(&settings);

    match cli.command {
        Commands::Resolve {
            file,
            target,
            selections,
            that,
            source,
        } => resolve(&settings, &file, &target, &selections, &that, &source),
        Commands::Modifiers => print_modifiers(),
    }
}

fn init_logging(settings: &PipelineSettings) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log.filter.as_str()),
    )
    .format_timestamp(None)
    .init();
}

fn resolve(
    settings: &PipelineSettings,
    file: &Path,
    target: &str,
    selections: &[Range],
    that: &[Range],
    source: &[Range],
) -> PipelineResult<()> {
    let target = Target::from_json(target)?;
    let text = std::fs::read_to_string(file)?;
    let editor = EditorHandle::new(Document::new(file.display().to_string(), text));

    let recorded = |ranges: &[Range]| -> Vec<SelectionWithEditor> {
        ranges
            .iter()
            .map(|range| SelectionWithEditor::new(editor.clone(), *range))
            .collect()
    };
    let cursors = recorded(selections);
    let marks = MarkHistory::new(recorded(that), recorded(source));
    let hats = InMemoryHatTokenMap::new();
    let context = PipelineContext::new(&hats, &marks, &NoSyntax)
        .with_cursor_selections(&cursors)
        .with_default_hat_style(&settings.hats.default_style);

    let resolved = target.resolve(&context)?;
    log::info!(
        target: "target_pipeline::cli",
        "resolved {} selection(s) in {}",
        resolved.len(),
        file.display()
    );

    let output: Vec<ResolvedSelection<'_>> = resolved
        .iter()
        .map(|selection| ResolvedSelection {
            text: selection.text(),
            selection,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_modifiers() -> PipelineResult<()> {
    let examples = [
        Modifier::Position {
            position: TargetPosition::Before,
        },
        Modifier::Position {
            position: TargetPosition::Start,
        },
        Modifier::Position {
            position: TargetPosition::After,
        },
        Modifier::Position {
            position: TargetPosition::End,
        },
        Modifier::ContainingScope {
            scope_type: ScopeType::Token,
        },
        Modifier::ToRawSelection,
    ];
    for modifier in examples {
        println!("{}", serde_json::to_string(&modifier)?);
    }
    Ok(())
}

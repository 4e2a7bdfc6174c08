//! Command-line interface for synscan
//!
//! Usage:
//!   synscan highlight `<path>` [--format `<format>`]  - Print the style map of a file
//!   synscan outline `<path>` [--format `<format>`]    - Print the symbols of a file
//!   synscan languages                               - List the registered languages
//!   synscan view `<path>`                             - Open the terminal viewer
//!
//! `--language <id>` overrides the language picked from the file extension and
//! `--languages <file.yaml>` registers extra language definitions first.
mod viewer;

use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;
use std::sync::Arc;
use synscan::formats::{FormatRegistry, Report};
use synscan::language::Tokenizer;
use synscan::outline::extract_symbols_with_diagnostics;
use synscan::{highlight_text, Language, LanguageRegistry};

fn main() {
    synscan::logging::init_tracing();

    let formats = FormatRegistry::with_defaults();
    let matches = Command::new("synscan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Syntax highlighting spans and outlines for source files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("languages")
                .long("languages")
                .help("YAML file with extra language definitions")
                .global(true),
        )
        .subcommand(
            Command::new("highlight")
                .about("Print the styled spans of a file")
                .arg(path_arg())
                .arg(language_arg())
                .arg(format_arg(&formats)),
        )
        .subcommand(
            Command::new("outline")
                .about("Print the outline symbols of a file")
                .arg(path_arg())
                .arg(language_arg())
                .arg(format_arg(&formats)),
        )
        .subcommand(Command::new("languages").about("List the registered languages"))
        .subcommand(
            Command::new("view")
                .about("Open a read-only terminal viewer")
                .arg(path_arg())
                .arg(language_arg()),
        )
        .get_matches();

    let registry = load_registry(matches.get_one::<String>("languages"));

    match matches.subcommand() {
        Some(("highlight", sub)) => handle_report_command(sub, &registry, &formats, true),
        Some(("outline", sub)) => handle_report_command(sub, &registry, &formats, false),
        Some(("languages", _)) => handle_languages_command(&registry),
        Some(("view", sub)) => handle_view_command(sub, registry),
        _ => unreachable!(),
    }
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the source file")
        .required(true)
        .index(1)
}

fn language_arg() -> Arg {
    Arg::new("language")
        .long("language")
        .short('l')
        .help("Language id, instead of the one picked from the extension")
}

fn format_arg(formats: &FormatRegistry) -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .help(format!(
            "Output format ({})",
            formats.list_formats().join(", ")
        ))
        .default_value("simple")
}

fn load_registry(languages: Option<&String>) -> Arc<LanguageRegistry> {
    let mut registry = LanguageRegistry::with_defaults();
    if let Some(path) = languages {
        if let Err(e) = registry.load_yaml_file(path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
    Arc::new(registry)
}

fn read_source(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

/// Language named on the command line, else the one bound to the file extension
fn resolve_language(
    matches: &ArgMatches,
    path: &str,
    registry: &LanguageRegistry,
) -> Option<Arc<Language>> {
    match matches.get_one::<String>("language") {
        Some(id) => registry.get(id).or_else(|| {
            eprintln!("Unknown language: {}", id);
            std::process::exit(1);
        }),
        None => registry.language_for_path(path),
    }
}

/// Handle the highlight and outline commands
fn handle_report_command(
    matches: &ArgMatches,
    registry: &LanguageRegistry,
    formats: &FormatRegistry,
    highlight: bool,
) {
    let path = matches.get_one::<String>("path").unwrap();
    let format = matches.get_one::<String>("format").unwrap();
    if !formats.has(format) {
        eprintln!(
            "Unknown format '{}', expected one of: {}",
            format,
            formats.list_formats().join(", ")
        );
        std::process::exit(1);
    }

    let source = read_source(path);
    let language = resolve_language(matches, path, registry);
    let mut report = Report::new(path.as_str(), language.as_ref().map(|l| l.id().to_string()));

    report = match (&language, highlight) {
        (Some(language), true) => {
            let highlight = highlight_text(language, &source);
            report
                .with_styles(highlight.styles)
                .with_diagnostics(highlight.diagnostics)
        }
        (Some(language), false) => {
            let extraction = extract_symbols_with_diagnostics(&source, language.id(), registry);
            report
                .with_symbols(extraction.symbols)
                .with_diagnostics(extraction.diagnostics)
        }
        (None, _) => report,
    };

    match formats.serialize(&report, format) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle the languages command
fn handle_languages_command(registry: &LanguageRegistry) {
    println!("Registered languages:\n");
    for language in registry.list() {
        let path = match language.tokenizer() {
            Tokenizer::PerLine(_) => "per-line",
            Tokenizer::WholeDocument(_) => "whole-document",
        };
        println!("  {} ({})", language.id(), language.spec().display_name());
        println!(
            "    extensions: {}, tokenizer: {}",
            language.spec().extensions.join(" "),
            path
        );
    }
}

/// Handle the view command
fn handle_view_command(matches: &ArgMatches, registry: Arc<LanguageRegistry>) {
    let path = matches.get_one::<String>("path").unwrap();
    let language = resolve_language(matches, path, &registry);
    if let Err(e) = viewer::viewer_main::run_viewer(PathBuf::from(path), registry, language) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

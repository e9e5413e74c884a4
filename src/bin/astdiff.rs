//! Command-line front end: parses two source files, matches their ASTs and
//! prints the resulting edit script (spec §10.1).
//!
//! Grounded on `mergiraf`'s `bin/mergiraf.rs`: a `clap`-derive CLI with a
//! verbosity flag wired to `stderrlog`, subcommands returning a
//! `std::process::ExitCode`, and colored terminal output via
//! `nu-ansi-term` gated on whether the output stream is a TTY.

use std::{
    fs,
    io::IsTerminal,
    path::{Path, PathBuf},
    process::ExitCode,
};

use astdiff::{
    config::MatchConfig,
    edit_script::{build_edit_script, Edit},
    error::{Error, Result},
    matcher::match_trees,
    parse,
    tree::Tree,
};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use nu_ansi_term::Color;
use tree_sitter::Language;

/// When to colorize action keywords in `text` output (spec §10.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// The edit-script output format (spec §10.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// The grammars this build was linked against, as `(name, extensions)`.
const SUPPORTED_LANGUAGES: &[(&str, &[&str])] = &[
    ("rust", &["rs"]),
    ("c", &["c", "h"]),
    ("json", &["json"]),
];

#[derive(Parser)]
#[command(
    name = "astdiff",
    version,
    about = "Matches and diffs abstract syntax trees across two versions of a source file"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity; repeat for more (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all logging output
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Diff two source files and print the resulting edit script
    Diff {
        src: PathBuf,
        dst: PathBuf,

        /// The top-down matcher stops descending at or below this height
        #[arg(long, default_value_t = MatchConfig::default().min_height)]
        min_height: i32,

        /// Minimum Dice coefficient for a bottom-up container match
        #[arg(long, default_value_t = MatchConfig::default().min_dice)]
        min_dice: f64,

        /// Zhang-Shasha refinement is skipped above this subtree size
        #[arg(long, default_value_t = MatchConfig::default().max_size)]
        max_size: i32,

        /// Output format for the edit script
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Whether to colorize action keywords in text output
        #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
        color: ColorMode,

        /// Print a one-line match-rate summary after the edit script
        #[arg(long)]
        stats: bool,
    },
    /// List the languages this build can parse
    Languages,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    stderrlog::new()
        .module(module_path!())
        .verbosity(if cli.quiet { 0 } else { cli.verbose as usize + 1 })
        .init()
        .expect("the logger is only initialized once, here");

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Languages => {
            for (name, extensions) in SUPPORTED_LANGUAGES {
                println!("{name} ({})", extensions.join(", "));
            }
            Ok(())
        }
        Command::Diff {
            src,
            dst,
            min_height,
            min_dice,
            max_size,
            format,
            color,
            stats,
        } => run_diff(&src, &dst, min_height, min_dice, max_size, format, color, stats),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_diff(
    src: &Path,
    dst: &Path,
    min_height: i32,
    min_dice: f64,
    max_size: i32,
    format: OutputFormat,
    color: ColorMode,
    stats: bool,
) -> Result<()> {
    let src_lang = language_for(src)?;
    let dst_lang = language_for(dst)?;
    let src_source = fs::read_to_string(src).map_err(|e| Error::Input(format!("{}: {e}", src.display())))?;
    let dst_source = fs::read_to_string(dst).map_err(|e| Error::Input(format!("{}: {e}", dst.display())))?;

    let src_tree = parse(src_lang, &src_source)?;
    let dst_tree = parse(dst_lang, &dst_source)?;

    let config = MatchConfig {
        min_height,
        min_dice,
        max_size,
    };
    let matching = match_trees(&src_tree, &dst_tree, &config);
    let edits = build_edit_script(&src_tree, &dst_tree, &matching.mappings);

    match format {
        OutputFormat::Text => {
            let colorize = color.enabled();
            for edit in &edits {
                println!("{}", render_text(edit, &src_tree, &dst_tree, colorize));
            }
        }
        OutputFormat::Json => println!("{}", render_json(&edits, &src_tree, &dst_tree)),
    }
    if stats {
        println!(
            "{} edits, {:.1}% of source nodes matched",
            edits.len(),
            matching.match_rate() * 100.0
        );
    }
    Ok(())
}

fn render_text(edit: &Edit, src: &Tree, dst: &Tree, color: bool) -> String {
    let rendered = edit.render(src, dst);
    if !color {
        return rendered;
    }
    let styled = match edit {
        Edit::Insert { .. } => Color::Green,
        Edit::Delete { .. } => Color::Red,
        Edit::Update { .. } => Color::Yellow,
        Edit::Move { .. } => Color::Cyan,
    };
    styled.paint(rendered).to_string()
}

/// Hand-rolled JSON array of `{kind, srcId, dstId, position}` records (spec
/// §6.2), consistent with the rest of this crate not depending on `serde`.
fn render_json(edits: &[Edit], src: &Tree, dst: &Tree) -> String {
    let records: Vec<String> = edits.iter().map(|edit| edit_json(edit, src, dst)).collect();
    format!("[{}]", records.join(","))
}

fn edit_json(edit: &Edit, src: &Tree, dst: &Tree) -> String {
    match *edit {
        Edit::Update { src: s, dst: d } => format!(
            r#"{{"kind":"update","srcId":{s},"dstId":{d},"srcLabel":{},"dstLabel":{}}}"#,
            json_string(src.label(s)),
            json_string(dst.label(d)),
        ),
        Edit::Insert { dst: d, parent_dst, position } => format!(
            r#"{{"kind":"insert","dstId":{d},"parentDstId":{parent_dst},"position":{position}}}"#
        ),
        Edit::Move { src: s, dst: d, parent_dst, position } => format!(
            r#"{{"kind":"move","srcId":{s},"dstId":{d},"parentDstId":{parent_dst},"position":{position}}}"#
        ),
        Edit::Delete { src: s } => format!(r#"{{"kind":"delete","srcId":{s}}}"#),
    }
}

/// Escapes `s` as a JSON string literal, including the surrounding quotes.
fn json_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn language_for(path: &Path) -> Result<Language> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| Error::Input(format!("{}: no file extension", path.display())))?;
    match extension {
        "rs" => Ok(tree_sitter_rust_orchard::LANGUAGE.into()),
        "c" | "h" => Ok(tree_sitter_c::LANGUAGE.into()),
        "json" => Ok(tree_sitter_json::LANGUAGE.into()),
        other => Err(Error::Input(format!("unsupported file extension: .{other}"))),
    }
}

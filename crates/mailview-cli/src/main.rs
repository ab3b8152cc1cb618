//! mailview CLI: Preview, copy and export generated email markup

use clap::{Args, Parser, Subcommand};
use mailview_engine::{
    discover_sources, load_dir, load_sources, Clipboard, Config, DownloadArtifact, Language,
    MarkupSet, MarkupSource, MemoryClipboard,
};
use mailview_tui::{run_tui, AppOptions, SystemClipboard};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Terminal previewer for generated email markup
#[derive(Parser)]
#[command(name = "mailview")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    open: OpenArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Open(OpenArgs),

    /// List the markup variants found in a directory
    List {
        /// Directory holding email.jsx / email.html / email.txt
        dir: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save one variant as email.<ext>
    Export {
        /// Variant to export (jsx, html, text)
        #[arg(long)]
        lang: Language,

        /// Directory holding the markup
        dir: Option<PathBuf>,

        /// Output directory (defaults to the configured download directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Copy one variant to the system clipboard
    Copy {
        /// Variant to copy (jsx, html, text)
        #[arg(long)]
        lang: Language,

        /// Directory holding the markup
        dir: Option<PathBuf>,
    },

    /// Write a default .mailview/config.json
    Init,
}

#[derive(Args, Default)]
struct OpenArgs {
    /// Directory holding email.jsx / email.html / email.txt
    dir: Option<PathBuf>,

    /// React source file
    #[arg(long)]
    jsx: Option<PathBuf>,

    /// Rendered HTML file
    #[arg(long)]
    html: Option<PathBuf>,

    /// Plain-text file
    #[arg(long)]
    text: Option<PathBuf>,

    /// Tab to show first
    #[arg(long)]
    active: Option<Language>,

    /// Keep copies in memory instead of using the system clipboard
    #[arg(long)]
    no_clipboard: bool,

    /// Directory downloads are saved into
    #[arg(long)]
    download_dir: Option<PathBuf>,
}

impl OpenArgs {
    /// Sources named with --jsx/--html/--text, in tab order.
    fn explicit_sources(&self) -> Vec<MarkupSource> {
        [
            (Language::Jsx, &self.jsx),
            (Language::Markup, &self.html),
            (Language::Markdown, &self.text),
        ]
        .into_iter()
        .filter_map(|(language, path)| {
            path.clone().map(|path| MarkupSource { language, path })
        })
        .collect()
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => cmd_open(cli.open),
        Some(Commands::Open(args)) => cmd_open(args),
        Some(Commands::List { dir, json }) => cmd_list(dir.as_deref(), json),
        Some(Commands::Export { lang, dir, out }) => cmd_export(lang, dir.as_deref(), out),
        Some(Commands::Copy { lang, dir }) => cmd_copy(lang, dir.as_deref()),
        Some(Commands::Init) => cmd_init(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn current_dir() -> Result<PathBuf, Box<dyn Error>> {
    Ok(std::env::current_dir()?)
}

fn load_config() -> Result<Config, Box<dyn Error>> {
    Ok(Config::load_or_default(&Config::path_in(&current_dir()?))?)
}

fn resolve_dir(dir: Option<&Path>) -> Result<PathBuf, Box<dyn Error>> {
    match dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => current_dir(),
    }
}

fn load_markups(dir: Option<&Path>) -> Result<MarkupSet, Box<dyn Error>> {
    Ok(load_dir(&resolve_dir(dir)?)?)
}

fn cmd_open(args: OpenArgs) -> Result<(), Box<dyn Error>> {
    let mut config = load_config()?;
    if let Some(dir) = &args.download_dir {
        config.download_dir.clone_from(dir);
    }

    let explicit = args.explicit_sources();
    let (markups, label) = if explicit.is_empty() {
        let dir = resolve_dir(args.dir.as_deref())?;
        (load_dir(&dir)?, dir.display().to_string())
    } else {
        let label = explicit
            .first()
            .and_then(|s| s.path.parent())
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        (load_sources(&explicit)?, label)
    };

    let clipboard: Arc<dyn Clipboard> = if args.no_clipboard {
        Arc::new(MemoryClipboard::new())
    } else {
        Arc::new(SystemClipboard::new())
    };

    let mut options = AppOptions::new(config, clipboard).source_label(label);
    if let Some(active) = args.active {
        options = options.active(active);
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_tui(markups, options))
}

fn cmd_list(dir: Option<&Path>, json: bool) -> Result<(), Box<dyn Error>> {
    let dir = resolve_dir(dir)?;
    let sources = discover_sources(&dir);
    let markups = if sources.is_empty() {
        None
    } else {
        Some(load_sources(&sources)?)
    };

    if json {
        let entries: Vec<serde_json::Value> = sources
            .iter()
            .filter_map(|source| {
                let variant = markups.as_ref()?.get(source.language)?;
                Some(serde_json::json!({
                    "language": source.language,
                    "label": source.language.label(),
                    "path": source.path,
                    "bytes": variant.content().len(),
                    "lines": variant.line_count(),
                }))
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let Some(markups) = markups else {
        println!("No email markup found in {}", dir.display());
        return Ok(());
    };

    println!("Email markup in {}\n", dir.display());
    for source in &sources {
        if let Some(variant) = markups.get(source.language) {
            println!(
                "  {:<10} {:<24} {:>7} bytes {:>5} lines",
                source.language.label(),
                source.path.file_name().map_or_else(
                    || source.path.display().to_string(),
                    |n| n.to_string_lossy().into_owned()
                ),
                variant.content().len(),
                variant.line_count(),
            );
        }
    }
    println!("\n{} variant(s)", markups.len());
    Ok(())
}

fn export_variant(
    markups: &MarkupSet,
    lang: Language,
    out: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let variant = markups
        .get(lang)
        .ok_or_else(|| format!("no {} markup available", lang.label()))?;
    Ok(DownloadArtifact::for_variant(variant).save_in(out)?)
}

fn cmd_export(
    lang: Language,
    dir: Option<&Path>,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let markups = load_markups(dir)?;
    let out = match out {
        Some(out) => out,
        None => load_config()?.download_dir,
    };
    let path = export_variant(&markups, lang, &out)?;
    println!("Saved {}", path.display());
    Ok(())
}

fn cmd_copy(lang: Language, dir: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let markups = load_markups(dir)?;
    let variant = markups
        .get(lang)
        .ok_or_else(|| format!("no {} markup available", lang.label()))?;
    if cfg!(target_os = "linux") {
        eprintln!("Holding the clipboard until another app replaces it (Ctrl-C to stop)");
    }
    SystemClipboard::serve_text(variant.content())?;
    println!(
        "Copied {} ({} bytes) to clipboard",
        lang.label(),
        variant.content().len()
    );
    Ok(())
}

fn cmd_init() -> Result<(), Box<dyn Error>> {
    let config_path = Config::path_in(&current_dir()?);
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }
    Config::default().save(&config_path)?;
    println!("Created {}", config_path.display());
    Ok(())
}

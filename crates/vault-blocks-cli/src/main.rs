use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use relative_path::RelativePathBuf;
use std::path::{Path, PathBuf};
use std::process;
use vault_blocks_config::{Config, DEFAULT_CONFIG_NOTE};
use vault_blocks_engine::{Block, Importer, Segmenter, TagHook, VaultConfig};

#[derive(Parser)]
#[command(name = "vault-blocks", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment one markdown file and print its blocks.
    Blocks {
        file: PathBuf,
        /// Drop blocks whose text is blank.
        #[arg(long, default_value_t = false)]
        no_empty: bool,
        /// Classify blocks containing `#<TAG>` as tagged entries.
        #[arg(long)]
        tag: Option<String>,
        /// Print a JSON array instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Import entry records from a vault and print them as JSON.
    Import {
        /// Vault folder. Defaults to `vault_path` from the config file.
        #[arg(long)]
        vault: Option<PathBuf>,
        /// Config note, relative to the vault.
        #[arg(long)]
        config_note: Option<PathBuf>,
    },
    /// Print the vault config note template.
    Template,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Blocks {
            file,
            no_empty,
            tag,
            json,
        } => run_blocks(&file, no_empty, tag.as_deref(), json),
        Commands::Import { vault, config_note } => run_import(vault, config_note),
        Commands::Template => {
            print!("{}", VaultConfig::template());
            Ok(())
        }
    };

    if let Err(e) = result {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Application config, if a readable one exists.
fn app_config() -> Option<Config> {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring config file: {e}");
            None
        }
    }
}

fn run_blocks(file: &Path, no_empty: bool, tag: Option<&str>, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let include_empty = !no_empty && app_config().is_none_or(|c| c.include_empty_blocks);
    let mut segmenter = Segmenter::new().include_empty_blocks(include_empty);
    if let Some(tag) = tag {
        segmenter = segmenter.with_hook(TagHook::new(tag.trim_start_matches('#')));
    }

    let blocks = segmenter
        .segment(&content)
        .with_context(|| format!("Failed to segment {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&blocks)?);
    } else {
        for (index, block) in blocks.iter().enumerate() {
            println!("{}", format_block(index, block));
        }
    }
    Ok(())
}

fn run_import(vault: Option<PathBuf>, config_note: Option<PathBuf>) -> Result<()> {
    let app = app_config();

    let Some(vault) = vault.or_else(|| app.as_ref().map(|c| c.vault_path.clone())) else {
        Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                format!(
                    "no --vault given and no config file found at {}",
                    Config::config_path().display()
                ),
            )
            .exit();
    };
    let config_note = config_note
        .or_else(|| app.as_ref().map(|c| c.config_note.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NOTE));
    let ignore = match &app {
        Some(c) => c.ignore_patterns()?,
        None => vec![],
    };

    let config_note = RelativePathBuf::from_path(&config_note).with_context(|| {
        format!(
            "Config note path {} must be relative to the vault",
            config_note.display()
        )
    })?;
    let vault_config = VaultConfig::load_from_vault(&vault, &config_note)
        .with_context(|| format!("Failed to load vault config note {config_note}"))?;
    log::info!("Vault config loaded from {config_note}");

    let records = Importer::new(vault_config, &vault)
        .with_ignore(ignore)
        .import()
        .with_context(|| format!("Failed to import entries from {}", vault.display()))?;
    log::info!("Imported {} entries", records.len());

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Header line with index, type, line range, id and props, then the text
/// indented by four spaces.
fn format_block(index: usize, block: &Block) -> String {
    let lines = block.lines();
    let mut out = format!(
        "[{index}] {} {}..{}",
        block.block_type(),
        lines.start,
        lines.end
    );
    if let Some(id) = block.id() {
        out.push_str(&format!(" ^{id}"));
    }
    for prop in block.props() {
        out.push_str(&format!(" {}={}", prop.key, prop.value));
    }
    for line in block.text().split('\n') {
        out.push_str("\n    ");
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_blocks_flags() {
        let cli = Cli::try_parse_from(["vault-blocks", "blocks", "note.md", "--no-empty", "--tag", "pdw"])
            .unwrap();
        match cli.command {
            Commands::Blocks {
                file,
                no_empty,
                tag,
                json,
            } => {
                assert_eq!(file, PathBuf::from("note.md"));
                assert!(no_empty);
                assert_eq!(tag.as_deref(), Some("pdw"));
                assert!(!json);
            }
            _ => panic!("expected blocks subcommand"),
        }
    }

    #[test]
    fn formats_block_with_id_and_props() {
        let blocks = Segmenter::new()
            .segment("- 07:30 #pdw/Run [km::5] ^run1\n\t- [pace::slow]")
            .unwrap();

        assert_eq!(
            format_block(0, &blocks[0]),
            "[0] ul 0..2 ^run1 km=5 pace=slow\n    - 07:30 #pdw/Run [km::5] ^run1\n    \t- [pace::slow]"
        );
    }

    #[test]
    fn formats_empty_block() {
        let blocks = Segmenter::new().segment("a\n\nb").unwrap();

        assert_eq!(format_block(1, &blocks[1]), "[1] empty 1..2\n    ");
    }
}

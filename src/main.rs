use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use titlekit::config::{CreditsConfig, TitleCommandConfig, CREDITS_PLUGIN, TITLE_COMMANDS_PLUGIN};
use titlekit::plugins::{find_manifest, parse_manifest, PluginManifest};
use titlekit::{decode_tone, ConfigParser};

#[derive(Parser)]
#[command(name = "titlekit")]
#[command(about = "Inspect title command and credits plugin configuration", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the title menu built from a manifest
    Menu {
        /// Manifest file or project directory
        manifest: PathBuf,
        /// Pretend a save file exists
        #[arg(long)]
        has_save: bool,
        /// Print the full registry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the credits built from a manifest
    Credits {
        /// Manifest file or project directory
        manifest: PathBuf,
        /// Print the full registry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode a tone parameter value
    Tone {
        /// Raw parameter text, e.g. '{"Red":"10","Green":"-5","Blue":"20"}'
        raw: String,
    },
    /// Show version information
    Version,
}

fn init_logging(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn read_manifest(path: &Path) -> anyhow::Result<PluginManifest> {
    let file = if path.is_dir() {
        match find_manifest(path) {
            Some(file) => file,
            None => bail!("No plugin manifest found under {}", path.display()),
        }
    } else {
        path.to_path_buf()
    };

    let content = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let manifest = parse_manifest(&content)
        .with_context(|| format!("Invalid manifest {}", file.display()))?;
    Ok(manifest)
}

fn print_commands(config: &TitleCommandConfig, has_save: bool) {
    if !config.default_background.is_empty() {
        println!("Default background: {}", config.default_background);
    }
    if let Some(tone) = config.background_tone.effective() {
        println!("Background tone: {:?}", tone.channels());
    }

    let menu = config.menu(has_save);
    if menu.is_empty() {
        println!("(no commands)");
        return;
    }

    for item in menu {
        let entry = item.entry;
        let state = if item.enabled { " " } else { "x" };
        let origin = if entry.generated_symbol { " (generated)" } else { "" };
        println!(
            "[{}] {:>2}. {:<16} {}{}",
            state, item.index, entry.symbol, entry.name, origin
        );
        if entry.has_icon() {
            println!("        icon {}", entry.icon);
        }
        if entry.has_custom_background() {
            println!("        background {}", config.background_for(entry));
        }
    }
}

fn print_credits(config: &CreditsConfig) {
    if !config.header_text.is_empty() {
        println!("{}\n", config.header_text);
    }
    if config.categories.is_empty() {
        println!("(no credits)");
        return;
    }

    for category in &config.categories {
        println!("{}", category.label);
        for entry in &category.entries {
            println!("  {}", entry.name);
            for line in entry.comment_lines() {
                println!("    {}", line);
            }
            if config.show_urls && entry.has_url() {
                println!("    <{}>", entry.link_text());
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let parser = ConfigParser::new();

    match cli.command {
        Some(Commands::Version) | None => {
            println!("titlekit {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Menu {
            manifest,
            has_save,
            json,
        }) => {
            let manifest = read_manifest(&manifest).await?;
            let params = manifest.require_parameters(TITLE_COMMANDS_PLUGIN)?;
            let config = TitleCommandConfig::from_parameters(&parser, params);
            if json {
                let entries: Vec<_> = config.commands.iter().collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_commands(&config, has_save);
            }
        }
        Some(Commands::Credits { manifest, json }) => {
            let manifest = read_manifest(&manifest).await?;
            let params = manifest.require_parameters(CREDITS_PLUGIN)?;
            let config = CreditsConfig::from_parameters(&parser, params);
            if json {
                let categories: Vec<_> = config.categories.iter().collect();
                println!("{}", serde_json::to_string_pretty(&categories)?);
            } else {
                print_credits(&config);
            }
        }
        Some(Commands::Tone { raw }) => {
            let tone = decode_tone(&parser, &raw, "tone");
            if tone.is_ignored() {
                println!("ignored (host tone kept)");
            } else {
                println!("{}", serde_json::to_string(&tone)?);
            }
        }
    }

    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use blog_content::{load_config, to_html, ContentRenderer, RenderConfig, SyntaxHighlighter};

#[derive(ClapParser)]
#[command(name = "blog-content")]
#[command(about = "Render blog post bodies into enriched render trees")]
#[command(version)]
struct Cli {
    /// Path to the render configuration
    #[arg(short, long, global = true, default_value = "render.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Html,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a post body
    Render {
        /// HTML file holding the post body
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Print the gallery image list of a post body
    Images {
        /// HTML file holding the post body
        file: PathBuf,
    },

    /// Highlight a source file
    Highlight {
        /// Source file to highlight
        file: PathBuf,

        /// Language name (e.g. rust, ts, bash)
        #[arg(short, long)]
        lang: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Render { file, format } => render(&config, &file, format)?,
        Commands::Images { file } => images(&config, &file)?,
        Commands::Highlight { file, lang } => highlight(&file, &lang)?,
    }

    Ok(())
}

fn read_markup(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn render(config: &RenderConfig, file: &Path, format: Format) -> Result<()> {
    let markup = read_markup(file)?;
    let document = ContentRenderer::new(config).render(&markup);

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&document)?),
        Format::Html => println!("{}", to_html(&document)),
    }

    Ok(())
}

fn images(config: &RenderConfig, file: &Path) -> Result<()> {
    let markup = read_markup(file)?;
    let document = ContentRenderer::new(config).render(&markup);

    println!("{}", serde_json::to_string_pretty(document.images())?);
    Ok(())
}

fn highlight(file: &Path, lang: &str) -> Result<()> {
    let code = read_markup(file)?;
    let lines = SyntaxHighlighter::new().highlight(&code, lang);

    println!("{}", serde_json::to_string_pretty(&lines)?);
    Ok(())
}

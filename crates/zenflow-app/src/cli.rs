//! Command-line interface.

use crate::app::{App, AppConfig, AppError, AppResult, RenderOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use zenflow_render::ImageFormat;

#[derive(Parser, Debug)]
#[command(author, version, about = "Zen Flow: draw, keep and replay ink artworks", long_about = None)]
pub struct Cli {
    /// JSON configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Artwork directory (defaults to the platform data directory).
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List saved artworks, newest first.
    List {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Render an artwork to an image file.
    Render {
        id: String,
        /// Output file (defaults to a name derived from the title).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// png or jpeg.
        #[arg(long, default_value = "jpeg", value_parser = parse_format)]
        format: ImageFormat,
        /// JPEG quality between 0 and 1.
        #[arg(long, default_value_t = 0.95)]
        quality: f64,
        /// Add paper grain to the background.
        #[arg(long)]
        grain: bool,
    },
    /// Replay an artwork point by point, writing frames as PNG.
    Replay {
        id: String,
        /// Directory for the frames.
        #[arg(long)]
        frames: PathBuf,
        /// Write every N-th tick.
        #[arg(long, default_value_t = 10)]
        every: usize,
    },
    /// Delete an artwork.
    Delete { id: String },
    /// Draw and save a demo artwork.
    Demo {
        #[arg(long)]
        title: Option<String>,
    },
}

fn parse_format(s: &str) -> Result<ImageFormat, String> {
    s.parse().map_err(|e: zenflow_render::SurfaceError| e.to_string())
}

/// Run a parsed command against the file store.
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load(cli.config.as_deref(), cli.store)?;
    let store = config.open_store()?;
    let mut app = App::new(config, store);

    match cli.command {
        Commands::List { json } => {
            let stdout = std::io::stdout();
            app.list(&mut stdout.lock(), json).await
        }
        Commands::Render {
            id,
            output,
            format,
            quality,
            grain,
        } => {
            if !(0.0..=1.0).contains(&quality) {
                return Err(AppError::InvalidArgument(format!("quality {} is outside 0..=1", quality)));
            }
            let options = RenderOptions {
                output,
                format,
                quality,
                grain,
            };
            let path = app.render(&id, &options).await?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Replay { id, frames, every } => {
            let written = app.replay(&id, &frames, every).await?;
            println!("{} frames written to {}", written, frames.display());
            Ok(())
        }
        Commands::Delete { id } => {
            app.delete(&id).await?;
            println!("Deleted {}", id);
            Ok(())
        }
        Commands::Demo { title } => {
            let artwork = app.demo(title).await?;
            println!("{}  {}", artwork.id, artwork.title);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from(["zenflow", "render", "abc", "--format", "png", "-o", "x.png"]).unwrap();
        match cli.command {
            Commands::Render { id, format, output, quality, .. } => {
                assert_eq!(id, "abc");
                assert_eq!(format, ImageFormat::Png);
                assert_eq!(output, Some(PathBuf::from("x.png")));
                assert_eq!(quality, 0.95);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_store_after_subcommand() {
        let cli = Cli::try_parse_from(["zenflow", "list", "--store", "/tmp/art"]).unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/art")));
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["zenflow", "render", "abc", "--format", "gif"]).is_err());
    }

    #[test]
    fn test_run_demo_then_list_on_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().to_str().unwrap();
        pollster::block_on(run(Cli::try_parse_from(["zenflow", "demo", "--store", store]).unwrap())).unwrap();

        let config = AppConfig::load(None, Some(dir.path().to_path_buf())).unwrap();
        let mut app = App::new(config.clone(), config.open_store().unwrap());
        let mut out = Vec::new();
        pollster::block_on(app.list(&mut out, false)).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Flow "));
    }
}

// CLI module for manga-colorizer
// Author: kelexine (https://github.com/kelexine)

mod colorize;

pub use colorize::{default_output_path, run_colorize};

use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// manga-colorizer - Gemini relay for colorizing black-and-white manga pages
#[derive(Parser, Debug)]
#[command(name = "manga-colorizer", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.manga-colorizer/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the relay server (default)
    Serve(ServeArgs),

    /// Colorize a local image through a running relay
    Colorize(ColorizeArgs),
}

#[derive(clap::Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Gemini model identifier (overrides GEMINI_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Directory with the bundled single-page app
    #[arg(long)]
    pub static_dir: Option<String>,
}

impl ServeArgs {
    /// Apply flags on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(model) = &self.model {
            config.gemini.model = model.clone();
        }
        if let Some(dir) = &self.static_dir {
            config.server.static_dir = dir.clone();
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ColorizeArgs {
    /// Black-and-white page to colorize
    pub input: PathBuf,

    /// Where to write the result (default: <input>_colorized.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base URL of the relay
    #[arg(long, default_value = "http://127.0.0.1:8082")]
    pub server: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 180)]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_serve() {
        let args = Args::try_parse_from(["manga-colorizer"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn test_serve_overrides() {
        let args = Args::try_parse_from([
            "manga-colorizer",
            "serve",
            "--port",
            "9000",
            "--model",
            "gemini-2.0-flash-preview-image-generation",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        match args.command {
            Some(Command::Serve(serve)) => serve.apply(&mut config),
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.gemini.model, "gemini-2.0-flash-preview-image-generation");
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_colorize_args() {
        let args = Args::try_parse_from(["manga-colorizer", "colorize", "page.png", "-o", "out.png"])
            .unwrap();
        match args.command {
            Some(Command::Colorize(c)) => {
                assert_eq!(c.input, PathBuf::from("page.png"));
                assert_eq!(c.output, Some(PathBuf::from("out.png")));
                assert_eq!(c.server, "http://127.0.0.1:8082");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}

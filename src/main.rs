use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use knn_sketchpad::{
    console::{self, Command, Reply},
    GridSize, SketchConfig, SketchSession,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "knn-sketchpad", about = "Draw, label and classify small bitmaps with KNN")]
struct Cli {
    /// Path to config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the browser sketchpad (main.html and knn.js).
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
        /// Directory holding main.html and knn.js
        #[arg(long)]
        assets: Option<PathBuf>,
    },

    /// Draw and train from the terminal.
    Console {
        /// Number of neighbors that vote
        #[arg(long)]
        k: Option<usize>,
        /// Starting grid size (16, 32 or 48)
        #[arg(long)]
        grid: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so console replies on stdout stay readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SketchConfig::load_from_file(path)?,
        None => SketchConfig::default(),
    };

    match cli.command {
        Commands::Serve { port, assets } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(assets) = assets {
                config.assets_dir = assets;
            }
            knn_sketchpad::server::start_server(&config).await?;
        }
        Commands::Console { k, grid } => {
            if let Some(k) = k {
                config.k = k;
            }
            if let Some(grid) = grid {
                config.grid_size = GridSize::try_from(grid)?;
            }
            config.validate()?;
            cmd_console(&config)?;
        }
    }

    Ok(())
}

fn cmd_console(config: &SketchConfig) -> anyhow::Result<()> {
    let mut session = SketchSession::new(config)?;
    tracing::info!(k = config.k, grid = %config.grid_size, "console session started");
    println!("KNN sketchpad. Type 'help' for commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("sketch> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = line
            .parse::<Command>()
            .and_then(|command| console::execute(&mut session, command));
        match reply {
            Ok(Reply::Text(text)) => println!("{}", text.trim_end()),
            Ok(Reply::Quit) => break,
            Err(err) => println!("  {}", err),
        }
    }

    Ok(())
}

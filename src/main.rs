//! CLI entry point for eleventy-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "eleventy-rs")]
#[command(author = "Yukang Chen")]
#[command(version = "0.1.0")]
#[command(about = "A fast static site generator for Eleventy-flavored blogs", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Build the static site
    #[command(alias = "b")]
    Build {
        /// Include draft posts
        #[arg(long)]
        drafts: bool,
    },

    /// Build the site and serve it locally
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Include draft posts
        #[arg(long)]
        drafts: bool,
    },

    /// Clean the output directory
    Clean,

    /// List site content
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "eleventy_rs=debug,info"
    } else {
        "eleventy_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            eleventy_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized new site in {:?}", target_dir);
        }

        Commands::Build { drafts } => {
            let app = eleventy_rs::Eleventy::new(&base_dir)?;
            tracing::info!("Building site...");
            eleventy_rs::commands::build::run_with_options(&app, drafts)?;
            println!("Built successfully!");
        }

        Commands::Serve {
            port,
            ip,
            open,
            drafts,
        } => {
            let app = eleventy_rs::Eleventy::new(&base_dir)?;

            // Build first so there is something to serve
            tracing::info!("Building site...");
            eleventy_rs::commands::build::run_with_options(&app, drafts)?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            eleventy_rs::server::start(&app, &ip, port, open).await?;
        }

        Commands::Clean => {
            let app = eleventy_rs::Eleventy::new(&base_dir)?;
            tracing::info!("Cleaning output directory...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let app = eleventy_rs::Eleventy::new(&base_dir)?;
            eleventy_rs::commands::list::run(&app, &r#type)?;
        }

        Commands::Version => {
            println!("eleventy-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::content::PostFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Markdown blog catalog and photo gallery for a personal portfolio", long_about = None)]
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

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Post category
        #[arg(short = 'C', long, default_value = "Notes")]
        category: String,

        /// Tag to add (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// File name without extension (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List site content
    List {
        /// Type of content to list (post, recent, tag, category, photo)
        #[arg(default_value = "post")]
        r#type: String,

        /// Only posts carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only posts (or photos) in this category
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Case-insensitive text search
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show a single post
    Show {
        /// File name of the post, without extension
        slug: String,

        /// Print rendered HTML instead of markdown
        #[arg(long)]
        html: bool,
    },

    /// Show a single gallery photo
    Photo {
        /// Photo id
        id: String,
    },

    /// Export posts and photos as JSON into the public folder
    #[command(alias = "g")]
    Export,

    /// Start a local JSON server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// Remove exported data
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,tower_http=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            title,
            category,
            tags,
            slug,
        } => {
            let site = folio::Folio::new(&base_dir)?;
            let path =
                folio::commands::new::create_post(&site, &title, &category, &tags, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::List {
            r#type,
            tag,
            category,
            search,
        } => {
            let site = folio::Folio::new(&base_dir)?;
            let filter = PostFilter {
                tag,
                category,
                search,
            };
            folio::commands::list::run(&site, &r#type, &filter)?;
        }

        Commands::Show { slug, html } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::show::post(&site, &slug, html)?;
        }

        Commands::Photo { id } => {
            let site = folio::Folio::new(&base_dir)?;
            folio::commands::show::photo(&site, &id)?;
        }

        Commands::Export => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Exporting JSON data...");
            site.export()?;
            println!("Exported successfully!");
        }

        Commands::Server { port, ip } => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio::server::start(&site, &ip, port).await?;
        }

        Commands::Clean => {
            let site = folio::Folio::new(&base_dir)?;
            tracing::info!("Cleaning exported data...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

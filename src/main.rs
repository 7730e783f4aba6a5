use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use orgbook::config::ServerConfig;
use orgbook::resolver::Resolver;
use orgbook::server::{AppState, create_router};
use orgbook::service::user;
use orgbook::store::{SqliteStore, UserStore};
use orgbook::types::CreateUser;

#[derive(Parser)]
#[command(name = "orgbook")]
#[command(about = "A multi-tenant organization directory server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve {
        /// TOML file with server settings. Flags override its values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, short)]
        port: Option<u16>,

        /// Data directory for the database
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Seconds before a request is answered with 408
        #[arg(long)]
        request_timeout_secs: Option<u64>,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Initialize the server (create the database and the super admin)
    Init {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: PathBuf,

        #[arg(long, default_value = "Super")]
        first_name: String,

        #[arg(long, default_value = "Admin")]
        last_name: String,

        #[arg(long, default_value = "superadmin@example.com")]
        email: String,

        #[arg(long, default_value = "9000090000")]
        phone: String,
    },
}

fn run_init(data_dir: PathBuf, admin: CreateUser) -> anyhow::Result<()> {
    fs::create_dir_all(&data_dir)?;

    let config = ServerConfig {
        data_dir,
        ..ServerConfig::default()
    };
    let store = SqliteStore::new(config.db_path())?;
    store.initialize()?;

    if UserStore::has_admin(&store.conn())? {
        bail!(
            "Server already initialized. Database exists at: {}",
            config.db_path().display()
        );
    }

    let tx = store.begin()?;
    let user = user::create(&tx, &admin)?;
    tx.commit()?;

    println!();
    println!("========================================");
    println!("Created super admin {} ({})", user.display_name(), user.email);
    println!();
    println!("  user id: {}", user.id);
    println!();
    println!("Request a login code with POST /api/v1/auth/otp");
    println!("========================================");
    println!();

    Ok(())
}

async fn run_serve(config: ServerConfig) -> anyhow::Result<()> {
    let db_path = config.db_path();
    if !db_path.exists() {
        bail!("Server not initialized. Run 'orgbook admin init' first to create the database.");
    }

    let store = SqliteStore::new(&db_path)?;
    store.initialize()?;
    if !UserStore::has_admin(&store.conn())? {
        bail!("Server not initialized. Run 'orgbook admin init' first to create the super admin.");
    }

    let state = Arc::new(AppState {
        resolver: Resolver::new(Arc::new(store)),
        request_timeout: config.request_timeout(),
    });

    let app = create_router(state);
    let addr = config.socket_addr()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("orgbook=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Init {
                data_dir,
                first_name,
                last_name,
                email,
                phone,
            } => {
                let admin = CreateUser {
                    first_name,
                    last_name,
                    email,
                    phone,
                    is_admin: true,
                    org_uid: None,
                    role_id: None,
                };
                run_init(data_dir, admin)?;
            }
        },
        Commands::Serve {
            config,
            host,
            port,
            data_dir,
            request_timeout_secs,
        } => {
            let base = match config {
                Some(path) => ServerConfig::from_file(path)?,
                None => ServerConfig::default(),
            };
            let config = ServerConfig {
                host: host.unwrap_or(base.host),
                port: port.unwrap_or(base.port),
                data_dir: data_dir.unwrap_or(base.data_dir),
                request_timeout_secs: request_timeout_secs.unwrap_or(base.request_timeout_secs),
            };
            run_serve(config).await?;
        }
    }

    Ok(())
}

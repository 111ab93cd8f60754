//! Usecase CLI - Composition root
//! Wires SQLite collaborators and the event bus into the like-post and
//! open-account use cases.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use config::{LogFormat, PublisherKind, Settings};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use usecase_core::application::{
    AccountService, LikePostRequest, OpenAccountRequest, PostLikeService, SharedCollaborators,
    UseCaseExecutor,
};
use usecase_core::domain::{Account, Entity, PostLike};
use usecase_core::port::id_provider::UuidProvider;
use usecase_core::port::time_provider::SystemTimeProvider;
use usecase_core::port::{EventPublisher, IdProvider, TimeProvider};
use usecase_core::UseCaseError;
use usecase_infra_bus::channel_publisher::DEFAULT_CHANNEL_CAPACITY;
use usecase_infra_bus::{event_channel, ChannelPublisher, LogPublisher};
use usecase_infra_sqlite::{create_pool, run_migrations, SqliteAccountStore, SqlitePostStore};

#[derive(Parser)]
#[command(name = "usecase")]
#[command(about = "Run use cases against injected collaborators", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    settings: Settings,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a post so it can be liked
    RegisterPost {
        /// Post ID
        post_id: String,
    },

    /// Register a customer so an account can be opened
    RegisterCustomer {
        /// Customer ID
        customer_id: String,
    },

    /// Like a post
    LikePost {
        /// User giving the like
        #[arg(short, long)]
        user: String,

        /// Post being liked
        #[arg(short, long)]
        post: String,
    },

    /// Open an account for a customer
    OpenAccount {
        /// Customer ID
        #[arg(short, long)]
        customer: String,

        /// Product code (e.g. SAVINGS)
        #[arg(short, long)]
        product: String,
    },
}

/// Publisher selected by `--publisher`
enum Publisher {
    Channel(ChannelPublisher),
    Log(Arc<LogPublisher>),
}

impl Publisher {
    fn for_entity<E: Entity>(&self) -> Arc<dyn EventPublisher<E>> {
        match self {
            Publisher::Channel(publisher) => Arc::new(publisher.clone()),
            Publisher::Log(publisher) => publisher.clone(),
        }
    }
}

/// Everything the commands need, built once
struct Wiring {
    post_store: Arc<SqlitePostStore>,
    account_store: Arc<SqliteAccountStore>,
    publisher: Publisher,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    executor: UseCaseExecutor,
    compensate: bool,
}

impl Wiring {
    fn post_like_service(&self) -> PostLikeService {
        let publisher = self.publisher.for_entity::<PostLike>();
        let mut collaborators =
            SharedCollaborators::new(self.post_store.clone(), self.post_store.clone(), publisher);
        if self.compensate {
            collaborators = collaborators.with_compensation(self.post_store.clone());
        }
        PostLikeService::new(
            self.executor.clone(),
            collaborators,
            self.id_provider.clone(),
            self.time_provider.clone(),
        )
    }

    fn account_service(&self) -> AccountService {
        let publisher = self.publisher.for_entity::<Account>();
        let mut collaborators = SharedCollaborators::new(
            self.account_store.clone(),
            self.account_store.clone(),
            publisher,
        );
        if self.compensate {
            collaborators = collaborators.with_compensation(self.account_store.clone());
        }
        AccountService::new(
            self.executor.clone(),
            collaborators,
            self.id_provider.clone(),
            self.time_provider.clone(),
        )
    }
}

fn init_logging(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("usecase=info"))
        .context("Failed to create env filter")?;

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
    }
    Ok(())
}

fn report_failure(err: &UseCaseError) {
    let step = err.step().to_string();
    eprintln!("{} [{}] {}", "✗".red().bold(), step.yellow(), err);
    if err.is_committed() {
        eprintln!("  {}", "entity was persisted but not published".yellow());
    }
}

/// Use-case failures are reported here and turned into a failing exit code
async fn run_command(command: Commands, wiring: Wiring) -> Result<ExitCode> {
    match command {
        Commands::RegisterPost { post_id } => {
            wiring
                .post_store
                .register_post(&post_id)
                .await
                .context("Failed to register post")?;
            println!("{} post {}", "✓".green().bold(), post_id.cyan());
        }
        Commands::RegisterCustomer { customer_id } => {
            wiring
                .account_store
                .register_customer(&customer_id)
                .await
                .context("Failed to register customer")?;
            println!("{} customer {}", "✓".green().bold(), customer_id.cyan());
        }
        Commands::LikePost { user, post } => {
            let service = wiring.post_like_service();
            let req = LikePostRequest {
                user_id: user,
                post_id: post,
            };
            match service.like_post(req).await {
                Ok(like) => {
                    println!("{} liked", "✓".green().bold());
                    println!("{}", serde_json::to_string_pretty(&like)?);
                }
                Err(e) => {
                    report_failure(&e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::OpenAccount { customer, product } => {
            let service = wiring.account_service();
            let req = OpenAccountRequest {
                customer_id: customer,
                product_code: product,
            };
            match service.open_account(req).await {
                Ok(account) => {
                    println!("{} account opened", "✓".green().bold());
                    println!("{}", serde_json::to_string_pretty(&account)?);
                }
                Err(e) => {
                    report_failure(&e);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 1. Initialize logging
    init_logging(cli.settings.log_format)?;
    info!("Usecase v{} starting...", usecase_core::VERSION);

    // 2. Initialize database
    let database_url = cli.settings.database_url()?;
    info!(database_url = %database_url, "Initializing database...");
    let pool = create_pool(&database_url)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    // 3. Setup dependencies (DI wiring)
    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let id_provider: Arc<dyn IdProvider> = Arc::new(UuidProvider);
    let (channel_publisher, mut events) =
        event_channel(DEFAULT_CHANNEL_CAPACITY, time_provider.clone());
    let publisher = match cli.settings.publisher {
        PublisherKind::Channel => Publisher::Channel(channel_publisher),
        PublisherKind::Log => {
            drop(channel_publisher);
            Publisher::Log(Arc::new(LogPublisher::new(time_provider.clone())))
        }
    };

    // 4. Event consumer (ends when every channel sender is dropped)
    let consumer = tokio::spawn(async move {
        let mut received = 0usize;
        while let Some(event) = events.recv().await {
            info!(
                event_type = %event.event_type,
                entity_id = %event.entity_id,
                "Event received"
            );
            received += 1;
        }
        received
    });

    let wiring = Wiring {
        post_store: Arc::new(SqlitePostStore::new(pool.clone())),
        account_store: Arc::new(SqliteAccountStore::new(pool.clone())),
        publisher,
        id_provider,
        time_provider,
        executor: UseCaseExecutor::new(cli.settings.executor_config()),
        compensate: cli.settings.compensate,
    };

    // 5. Run (wiring dropped on return, closing the channel)
    let result = run_command(cli.command, wiring).await;

    match consumer.await {
        Ok(received) => info!(events = received, "Event consumer drained"),
        Err(e) => warn!(error = ?e, "Event consumer failed"),
    }
    pool.close().await;

    result
}

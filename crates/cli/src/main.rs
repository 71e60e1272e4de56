use anyhow::Context;
use clap::{Parser, Subcommand};
use libris_app::{bootstrap, catalog::SqlCatalog, modules, seed};
use libris_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "libris", version, about = "Authors and books catalogue service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create missing tables and indexes
    Schema {
        /// Print the statements instead of applying them
        #[arg(long)]
        print: bool,
    },
    /// Insert a sample catalogue into an empty database
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load Libris settings")?;
    libris_telemetry::init(&settings.telemetry)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => bootstrap::serve(settings).await,
        Command::Schema { print: true } => {
            for (module, fragment) in modules::registry().collect_schema() {
                println!("-- {module}/{}", fragment.id);
                for statement in libris_db::split_sql_statements(fragment.sql) {
                    println!("{statement}");
                }
            }
            Ok(())
        }
        Command::Schema { print: false } => {
            let db = bootstrap::open_database(&settings, &modules::registry()).await?;
            tracing::info!(db = %settings.database.url, "schema applied");
            db.close().await;
            Ok(())
        }
        Command::Seed => {
            let db = bootstrap::open_database(&settings, &modules::registry()).await?;
            let report = seed::seed(&SqlCatalog::new(db.clone())).await?;
            println!(
                "seeded {} authors and {} books",
                report.authors, report.books
            );
            db.close().await;
            Ok(())
        }
    }
}

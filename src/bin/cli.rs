use clap::{Parser, Subcommand};
use classtrack::cli::seeder::{SeedConfig, clear_seeded_data, seed_all};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "classtrack-cli")]
#[command(about = "Classtrack CLI - Administrative tools for Classtrack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the database with classes, sections, and fake students
    Seed {
        /// Number of classes to create
        #[arg(short = 'c', long, default_value = "10")]
        classes: usize,

        /// Number of sections per class
        #[arg(long, default_value = "3")]
        sections_per_class: usize,

        /// Number of students per section
        #[arg(long, default_value = "5")]
        students_per_section: usize,
    },
    /// Clear all seeded data
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::Seed {
            classes,
            sections_per_class,
            students_per_section,
        } => {
            let config = SeedConfig {
                classes,
                sections_per_class,
                students_per_section,
            };

            if let Err(e) = seed_all(&pool, config).await {
                eprintln!("\n❌ Error seeding database: {}", e);
                std::process::exit(1);
            }
        }
        Commands::ClearSeed => {
            if let Err(e) = clear_seeded_data(&pool).await {
                eprintln!("\n❌ Error clearing seeded data: {}", e);
                std::process::exit(1);
            }
        }
    }
}

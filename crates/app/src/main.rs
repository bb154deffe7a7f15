//! Vitrine Application CLI

use std::process;

use clap::{Args, Parser, Subcommand};

use vitrine_app::{
    auth::hash_password,
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, models::NewUser},
};

#[derive(Debug, Parser)]
#[command(name = "vitrine-app", about = "Vitrine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    User(UserCommand),
}

#[derive(Debug, Args)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Debug, Subcommand)]
enum UserSubcommand {
    Create(CreateUserArgs),
}

#[derive(Debug, Args)]
struct CreateUserArgs {
    /// Login name, unique across the shop
    #[arg(long)]
    username: String,

    /// Plaintext password; stored as an argon2 hash
    #[arg(long)]
    password: String,

    /// Optional contact email
    #[arg(long)]
    email: Option<String>,

    /// Optional display name
    #[arg(long)]
    full_name: Option<String>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::User(UserCommand {
            command: UserSubcommand::Create(args),
        }) => create_user(args).await,
    }
}

async fn create_user(args: CreateUserArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let password_hash =
        hash_password(&args.password).map_err(|error| format!("failed to hash password: {error}"))?;

    let user = PgUsersService::new(Db::new(pool))
        .create_user(NewUser {
            username: args.username,
            password_hash,
            email: args.email,
            full_name: args.full_name,
            phone_number: None,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_id: {}", user.user_id);
    println!("username: {}", user.username);

    Ok(())
}

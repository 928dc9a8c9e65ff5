use std::str::FromStr;

use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use userhub_auth::Role;
use userhub_cli::admin::{self, AdminInput};
use userhub_config::PasswordConfig;
use userhub_db::{PgAccountRepository, connect, run_migrations};

#[derive(Parser)]
#[command(name = "userhub-cli")]
#[command(about = "userhub CLI - Administrative tools for userhub", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new ADMIN account
    CreateAdmin {
        /// Username (primary key)
        #[arg(short = 'u', long)]
        username: Option<String>,

        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Change the role of an existing account
    SetRole {
        username: String,

        /// USER or ADMIN
        #[arg(value_parser = parse_role)]
        role: Role,
    },
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::from_str(raw).map_err(|e| e.to_string())
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("\n❌ {}", message);
    std::process::exit(1);
}

fn prompt(label: &str) -> String {
    Input::new()
        .with_prompt(label)
        .interact_text()
        .unwrap_or_else(|e| fail(format!("Failed to read {}: {}", label.to_lowercase(), e)))
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| fail("DATABASE_URL must be set"));
    let pool = connect(&database_url)
        .await
        .unwrap_or_else(|e| fail(format!("Failed to connect to database: {}", e)));
    if let Err(e) = run_migrations(&pool).await {
        fail(format!("Failed to run migrations: {}", e));
    }
    let accounts = PgAccountRepository::new(pool);

    match cli.command {
        Commands::CreateAdmin {
            username,
            name,
            email,
            password,
        } => handle_create_admin(&accounts, username, name, email, password).await,
        Commands::SetRole { username, role } => handle_set_role(&accounts, &username, role).await,
    }
}

async fn handle_create_admin(
    accounts: &PgAccountRepository,
    username: Option<String>,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) {
    let username = username.unwrap_or_else(|| prompt("Username"));
    let name = name.unwrap_or_else(|| prompt("Name"));
    let email = email.unwrap_or_else(|| prompt("Email address"));
    let password = password.unwrap_or_else(|| {
        Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .unwrap_or_else(|e| fail(format!("Failed to read password: {}", e)))
    });

    let cost = PasswordConfig::from_env()
        .unwrap_or_else(|e| fail(e))
        .cost;

    let input = AdminInput {
        username,
        name,
        email,
        password,
    };

    match admin::create_admin(accounts, input, cost).await {
        Ok(account) => {
            println!("\n✅ Admin created successfully!");
            println!("   Username: {}", account.username);
            println!("   Email: {}", account.email);
        }
        Err(e) => fail(format!("Error creating admin: {}", e)),
    }
}

async fn handle_set_role(accounts: &PgAccountRepository, username: &str, role: Role) {
    match admin::set_role(accounts, username, role).await {
        Ok(account) => println!("✅ {} is now {}", account.username, account.role),
        Err(e) => fail(format!("Error updating role: {}", e)),
    }
}

use anyhow::Context;
use clap::{Parser, Subcommand};
use cyphertech::{
    config::AppConfig,
    db,
    models::{Collection, IdentityClaims, NewUser, RegisterOutcome, Role},
    AppState,
};
use rand::RngCore;
use serde_json::{Map, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cyphertech-cli")]
#[command(about = "CLI tool for administering the Cypher Tech backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Access token commands
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Service, testimonial and worksheet documents
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new user
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Role to assign (Admin, HR or Employee)
        #[arg(short, long)]
        role: Option<Role>,

        /// Mark the user as verified
        #[arg(long)]
        verified: bool,
    },

    /// List all users
    List,

    /// Assign a role to a user
    SetRole {
        /// Email address of the user
        #[arg(short, long)]
        email: String,

        /// Role to assign (Admin, HR or Employee)
        #[arg(short, long)]
        role: Role,
    },

    /// Mark a user as verified
    Verify {
        /// Email address of the user
        #[arg(short, long)]
        email: String,

        /// Clear the verified flag instead
        #[arg(long)]
        revoke: bool,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Issue an access token for an existing user
    Issue {
        /// Email address of the user
        #[arg(short, long)]
        email: String,
    },

    /// Print a random signing secret for ACCESS_TOKEN_SECRET
    Secret,
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// Insert every object of a JSON array into a collection
    Import {
        /// services, testimonials or worksheets
        #[arg(short, long)]
        collection: Collection,

        /// Path to a JSON file holding an array of objects
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the documents of a collection as JSON
    List {
        /// services, testimonials or worksheets
        #[arg(short, long)]
        collection: Collection,
    },
}

fn generate_secret() -> String {
    let mut bytes = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("❌ {}", message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Secret generation needs no database
    if let Commands::Token {
        command: TokenCommands::Secret,
    } = cli.command
    {
        println!("{}", generate_secret());
        return Ok(());
    }

    let config = AppConfig::from_env()?;

    // Connect to database
    let pool = db::create_pool(&config.database_url).await?;

    // Run migrations
    db::migrate(&pool).await?;

    let state = AppState::new(pool, config.access_token_secret.clone());
    let user_service = state.user_service.clone();

    match cli.command {
        Commands::User { command } => match command {
            UserCommands::Create {
                email,
                role,
                verified,
            } => {
                match user_service.register(NewUser::new(email.clone())).await {
                    Ok(RegisterOutcome::Inserted(result)) => {
                        if let Some(role) = role {
                            if let Err(err) = user_service.set_role(&result.inserted_id, role).await
                            {
                                fail(format!("User created but role not set: {}", err));
                            }
                        }
                        if verified {
                            if let Err(err) =
                                user_service.set_verified(&result.inserted_id, true).await
                            {
                                fail(format!("User created but not verified: {}", err));
                            }
                        }
                        println!("✅ User created successfully!");
                        println!("  ID: {}", result.inserted_id);
                        println!("  Email: {}", email);
                        println!(
                            "  Role: {}",
                            role.map(|r| r.to_string()).unwrap_or_else(|| "-".into())
                        );
                        println!("  Verified: {}", if verified { "Yes" } else { "No" });
                    }
                    Ok(RegisterOutcome::AlreadyExists { .. }) => {
                        fail(format!("User '{}' already exists", email))
                    }
                    Err(err) => fail(format!("Failed to create user: {}", err)),
                }
            }

            UserCommands::List => match user_service.list_users().await {
                Ok(users) => {
                    if users.is_empty() {
                        println!("No users found.");
                    } else {
                        println!("{:<38} {:<40} {:<10} {:<10}", "ID", "Email", "Role", "Verified");
                        println!("{}", "-".repeat(100));
                        for user in users {
                            println!(
                                "{:<38} {:<40} {:<10} {:<10}",
                                user.id,
                                user.email,
                                user.role.as_deref().unwrap_or("-"),
                                if user.is_verify { "Yes" } else { "No" },
                            );
                        }
                    }
                }
                Err(err) => fail(format!("Failed to list users: {}", err)),
            },

            UserCommands::SetRole { email, role } => {
                match user_service.set_role_by_email(&email, role).await {
                    Ok(result) if result.modified_count == 0 => {
                        println!("ℹ️  User '{}' already has role {}", email, role);
                    }
                    Ok(_) => println!("✅ User '{}' is now {}", email, role),
                    Err(err) => fail(format!("Failed to set role: {}", err)),
                }
            }

            UserCommands::Verify { email, revoke } => {
                match user_service.set_verified_by_email(&email, !revoke).await {
                    Ok(result) if result.modified_count == 0 => {
                        println!("ℹ️  User '{}' is unchanged", email);
                    }
                    Ok(_) if revoke => println!("✅ User '{}' is no longer verified", email),
                    Ok(_) => println!("✅ User '{}' verified successfully!", email),
                    Err(err) => fail(format!("Failed to update user: {}", err)),
                }
            }
        },

        Commands::Token { command } => match command {
            TokenCommands::Issue { email } => match user_service.find_user_by_email(&email).await
            {
                Ok(Some(user)) => match state.token_service.issue(&IdentityClaims::new(user.email))
                {
                    Ok(token) => println!("{}", token),
                    Err(err) => fail(format!("Failed to issue token: {}", err)),
                },
                Ok(None) => fail(format!("User '{}' not found", email)),
                Err(err) => fail(format!("Failed to find user: {}", err)),
            },
            TokenCommands::Secret => println!("{}", generate_secret()),
        },

        Commands::Catalog { command } => match command {
            CatalogCommands::Import { collection, file } => {
                let raw = std::fs::read_to_string(&file)
                    .with_context(|| format!("reading {}", file.display()))?;
                let documents: Vec<Map<String, Value>> = serde_json::from_str(&raw)
                    .with_context(|| format!("{} is not a JSON array of objects", file.display()))?;
                let total = documents.len();

                for document in documents {
                    if let Err(err) = state.document_service.insert(collection, document).await {
                        fail(format!("Import into {} failed: {}", collection, err));
                    }
                }
                println!("✅ Imported {} document(s) into {}", total, collection);
            }

            CatalogCommands::List { collection } => {
                match state.document_service.list(collection).await {
                    Ok(documents) => println!("{}", serde_json::to_string_pretty(&documents)?),
                    Err(err) => fail(format!("Failed to list {}: {}", collection, err)),
                }
            }
        },
    }

    Ok(())
}

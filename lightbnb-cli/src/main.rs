//! lightbnb CLI - query and populate the LightBnB database
//!
//! Thin front end over `lightbnb-db`: every subcommand maps to one
//! data-layer operation and prints its result as JSON on stdout.
//!
//! Connection settings come from `DATABASE_URL` or `DB_HOST`/`DB_NAME`/
//! `DB_USER`/`DB_PASSWORD`, optionally via `.env` or `~/.lightbnb/.env`.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lightbnb_db::config::load_dotenv;
use lightbnb_db::{Database, DbConfig, Limit, NewProperty, NewUser, PropertyFilter};
use serde::Serialize;
use tracing::{info, warn};

mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query and populate the LightBnB database",
    long_about = "Look up users, list reservations, search and add properties. \
                  Results are printed as JSON."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a single user by email or id
    User(UserArgs),

    /// Register a user with an already-hashed password
    AddUser(AddUserArgs),

    /// List a guest's reservations, earliest first
    Reservations(ReservationsArgs),

    /// Search properties, cheapest first
    Properties(PropertiesArgs),

    /// Add a property from a JSON document
    AddProperty(AddPropertyArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct UserArgs {
    /// Email address (matched case-insensitively)
    #[arg(long)]
    email: Option<String>,

    /// User id
    #[arg(long)]
    id: Option<i32>,
}

#[derive(Args, Debug)]
struct AddUserArgs {
    /// Display name
    #[arg(long)]
    name: String,

    /// Email address (stored lower-cased)
    #[arg(long)]
    email: String,

    /// Password hash, stored verbatim
    #[arg(long)]
    password_hash: String,
}

#[derive(Args, Debug)]
struct ReservationsArgs {
    /// Guest user id
    #[arg(long)]
    guest_id: i32,

    /// Maximum number of reservations to return
    #[arg(long, default_value_t = lightbnb_db::models::DEFAULT_LIMIT)]
    limit: u32,
}

#[derive(Args, Debug)]
struct PropertiesArgs {
    /// City name fragment (case-insensitive)
    #[arg(long)]
    city: Option<String>,

    /// Only properties owned by this user id
    #[arg(long)]
    owner_id: Option<i32>,

    /// Minimum price per night, in dollars
    #[arg(long, value_parser = parse_finite)]
    min_price: Option<f64>,

    /// Maximum price per night, in dollars
    #[arg(long, value_parser = parse_finite)]
    max_price: Option<f64>,

    /// Minimum average review rating
    #[arg(long, value_parser = parse_finite)]
    min_rating: Option<f64>,

    /// Maximum number of properties to return
    #[arg(long, default_value_t = lightbnb_db::models::DEFAULT_LIMIT)]
    limit: u32,
}

/// Parse a float flag, refusing NaN and infinities.
fn parse_finite(raw: &str) -> std::result::Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{}", e))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{} is not a finite number", raw))
    }
}

impl From<&PropertiesArgs> for PropertyFilter {
    fn from(args: &PropertiesArgs) -> Self {
        PropertyFilter {
            city: args.city.clone(),
            owner_id: args.owner_id,
            minimum_price_per_night: args.min_price,
            maximum_price_per_night: args.max_price,
            minimum_rating: args.min_rating,
        }
    }
}

#[derive(Args, Debug)]
struct AddPropertyArgs {
    /// Path to the property JSON ("-" reads stdin); cost_per_night in cents
    input: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;
    load_dotenv();

    let config = DbConfig::from_env().context("Failed to load database configuration")?;
    let db = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;

    let result = run(&db, cli.command).await;
    db.close().await;
    result
}

async fn run(db: &Database, command: Commands) -> Result<()> {
    match command {
        Commands::User(args) => {
            let user = match (args.email.as_deref(), args.id) {
                (_, Some(id)) => db.users().get_with_id(id).await?,
                (email, None) => db.users().get_with_email(email).await?,
            };
            if user.is_none() {
                warn!("No matching user");
            }
            print_json(&user)
        }
        Commands::AddUser(args) => {
            let new_user = NewUser::new(&args.name, &args.email, &args.password_hash)
                .context("Invalid user")?;
            let user = db.users().add(&new_user).await?;
            info!(user_id = user.id, "Added user");
            print_json(&user)
        }
        Commands::Reservations(args) => {
            let reservations = db
                .reservations()
                .list_for_guest(args.guest_id, Limit::new(args.limit))
                .await?;
            print_json(&reservations)
        }
        Commands::Properties(args) => {
            let filter = PropertyFilter::from(&args);
            let properties = db
                .properties()
                .list(&filter, Limit::new(args.limit))
                .await?;
            print_json(&properties)
        }
        Commands::AddProperty(args) => {
            let new_property = read_property(&args.input)?;
            let property = db.properties().add(&new_property).await?;
            info!(property_id = property.id, "Added property");
            print_json(&property)
        }
    }
}

fn read_property(input: &Path) -> Result<NewProperty> {
    let raw = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read property from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?
    };

    serde_json::from_str(&raw).context("Invalid property JSON")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

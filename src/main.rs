use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use sparks_auth::store::{TOKEN_KEY, USER_KEY};
use sparks_auth::{AuthClient, AuthError, ClientConfig, ClientTimeouts, CredentialStore, ErrorCode, FileStore, NewSpark, StoreError, User};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("credential store: {0}")]
    Store(#[from] StoreError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Auth(e) => e.error_code(),
            Self::Store(_) => "E_STORAGE",
            Self::InvalidJson(_) => "E_INVALID_JSON",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sparks-auth", about = "Sparks API auth helper")]
struct Cli {
    #[arg(long, env = "SPARKS_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "SPARKS_AUTH_STORE", default_value = ".sparks-auth.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the cached authentication state.
    Status,
    /// Cache a token and user record, as the login flow would.
    Login {
        #[arg(long)]
        token: String,
        #[arg(long, help = "User record as JSON")]
        user: String,
    },
    /// Clear cached credentials.
    Logout,
    /// Call the protected endpoint with the cached token.
    Me,
    Profile,
    SetStrategy {
        strategy: String,
    },
    Sparks(SparksCommand),
    /// Run the protected endpoint and sparks checks in sequence.
    Smoke,
}

#[derive(Args, Debug)]
struct SparksCommand {
    #[command(subcommand)]
    command: SparksSubcommand,
}

#[derive(Subcommand, Debug)]
enum SparksSubcommand {
    List,
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error [{}]: {error}", error.error_code());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli_config(cli.base_url.as_deref())?;
    let store = Arc::new(FileStore::new(cli.store));
    let client = AuthClient::with_reqwest(config, store.clone())?;

    match cli.command {
        Command::Status => print_json(&status_json(&client)),
        Command::Login { token, user } => login(store.as_ref(), &token, &user),
        Command::Logout => {
            client.clear_auth();
            print_json(&status_json(&client))
        }
        Command::Me => print_json(&serde_json::to_value(client.test_protected_endpoint().await?)?),
        Command::Profile => print_json(&serde_json::to_value(client.get_user_profile().await?)?),
        Command::SetStrategy { strategy } => {
            let user = client.update_user_strategy(&strategy).await?;
            print_json(&serde_json::to_value(user)?)
        }
        Command::Sparks(sparks) => run_sparks(&client, sparks).await,
        Command::Smoke => {
            let user = client.test_protected_endpoint().await?;
            let sparks = client.test_sparks_endpoints().await?;
            print_json(&json!({ "user": user, "sparks": sparks }))
        }
    }
}

async fn run_sparks(client: &AuthClient, sparks: SparksCommand) -> Result<(), CliError> {
    match sparks.command {
        SparksSubcommand::List => print_json(&Value::Array(client.list_sparks().await?)),
        SparksSubcommand::Create { title, content, tags } => {
            let created = client.create_spark(&NewSpark { title, content, tags }).await?;
            print_json(&created)
        }
    }
}

/// `--base-url` (or its env fallback, resolved by clap) plus the timeout env vars.
fn cli_config(base_url: Option<&str>) -> Result<ClientConfig, AuthError> {
    let mut config = match base_url {
        Some(url) => ClientConfig::with_base_url(url)?,
        None => ClientConfig::default(),
    };
    config.timeouts = ClientTimeouts::from_env();
    Ok(config)
}

/// Validate `user_json` as a user record and cache it verbatim with `token`.
fn login(store: &dyn CredentialStore, token: &str, user_json: &str) -> Result<(), CliError> {
    let user = serde_json::from_str::<User>(user_json)?;
    store.set(TOKEN_KEY, token)?;
    store.set(USER_KEY, user_json)?;
    tracing::info!(user_id = %user.id, "cached credentials");
    print_json(&serde_json::from_str::<Value>(user_json)?)
}

fn status_json(client: &AuthClient) -> Value {
    let creds = client.stored_credentials();
    let corrupt = creds.user.is_corrupt();
    let state = creds.into_auth_state();
    json!({
        "isAuthenticated": state.is_authenticated,
        "hasToken": state.token.is_some(),
        "user": state.user,
        "userCorrupt": corrupt,
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

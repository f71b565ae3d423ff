use clap::Parser;

use sar_catalog_api::{
    auth::token_service::{AuthConfig, TokenService},
    Result,
};

/// Mints a bearer token for the catalog API, signed with the server's
/// `JWT_SECRET` and scoped to its `WEBSITE_URL`.
#[derive(Parser, Debug)]
#[command(name = "issue-token")]
struct CliArgs {
    /// Subject of the token, usually the operator's user name.
    subject: String,

    /// Grant the right to modify the catalog.
    #[arg(long)]
    superuser: bool,

    /// Lifetime in minutes, overrides TOKEN_DURATION_MIN.
    #[arg(long)]
    minutes: Option<i64>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();

    let config = match args.minutes {
        Some(minutes) => AuthConfig::from_env()?.with_duration_min(minutes),
        None => AuthConfig::from_env()?,
    };

    let token = TokenService::create_token(args.subject, args.superuser, &config)?;
    println!("{token}");

    Ok(())
}

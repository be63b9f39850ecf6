//! Prints a bearer token for the operator id given as the only argument.

use anyhow::Context;
use broadcaster::{
    application::services::jwt::{JwtService, JwtServiceConfig},
    config::Config,
    domain::value_objects::RecipientId,
};

fn main() -> anyhow::Result<()> {
    let operator: i64 = std::env::args()
        .nth(1)
        .context("usage: issue_token <operator-id>")?
        .parse()
        .context("operator id must be an integer")?;

    let config = Config::try_parse()?;
    if !config.admin_ids.contains(&RecipientId(operator)) {
        eprintln!("warning: {operator} is not listed in ADMIN_IDS");
    }

    let jwt = JwtService::new(JwtServiceConfig {
        secret: config.jwt_secret,
        expiration: config.jwt_expiration,
    });
    println!("{}", jwt.issue(RecipientId(operator))?);
    Ok(())
}

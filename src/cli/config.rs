use clap::ArgMatches;
use config::Config;
use std::error::Error;

use userlookup::gql::CredentialPolicy;

pub fn setup(app_m: &ArgMatches) -> Result<Config, Box<dyn Error>> {
    let debug = app_m.get_flag("debug");
    let config = Config::builder()
        .set_default("debug", false)?
        .set_default("log_level", "info")?
        .set_default("database_url", "users.sqlite")?
        .set_default("database_pool_size", 8)?
        .set_default("database_connection_timeout", 5)?
        .set_default("http_server_address", "0.0.0.0:8080")?
        .set_default("credential_policy", CredentialPolicy::default().to_string())?
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .set_override_option("debug", debug.then_some(true))?
        .set_override_option("log_level", debug.then_some("debug"))?
        .build()?;
    Ok(config)
}

pub fn credential_policy(config: &Config) -> Result<CredentialPolicy, Box<dyn Error>> {
    Ok(config.get_string("credential_policy")?.parse()?)
}

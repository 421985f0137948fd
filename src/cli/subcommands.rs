use clap::{ArgMatches, Command};
use std::error::Error;

pub mod query;
pub mod serve;

pub fn setup(app: Command) -> Command {
    app.subcommand(serve::app()).subcommand(query::app())
}

pub async fn execute(config: &config::Config, app_m: ArgMatches) -> Result<(), Box<dyn Error>> {
    match app_m.subcommand() {
        Some((serve::NAME, sub_m)) => serve::execute(sub_m, config).await,
        Some((query::NAME, sub_m)) => query::execute(sub_m, config).await,
        _ => Ok(()),
    }
}

use clap::{Arg, ArgMatches, Command};
use juniper::http::GraphQLRequest;
use juniper::InputValue;
use std::error::Error;
use std::sync::Arc;
use tokio::io::AsyncReadExt;

use userlookup::db::{self, PoolSettings};
use userlookup::gql::{self, Context};
use userlookup::store::DieselUserStore;

use crate::cli::config::credential_policy;

pub const NAME: &str = "query";

pub fn app() -> Command {
    Command::new(NAME)
        .about("Execute a GraphQL document and print the response")
        .arg(
            Arg::new("document")
                .required(true)
                .help("GraphQL document, or - to read it from stdin"),
        )
        .arg(
            Arg::new("variables")
                .long("variables")
                .value_name("JSON")
                .help("Variables as a JSON object"),
        )
        .arg(
            Arg::new("operation")
                .long("operation")
                .value_name("NAME")
                .help("Operation to run when the document has several"),
        )
}

pub async fn execute(matches: &ArgMatches, config: &config::Config) -> Result<(), Box<dyn Error>> {
    let document = match matches.get_one::<String>("document").map(String::as_str) {
        Some("-") | None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
        Some(document) => document.to_owned(),
    };
    let variables = matches
        .get_one::<String>("variables")
        .map(|json| serde_json::from_str::<InputValue>(json))
        .transpose()?;
    let operation = matches.get_one::<String>("operation").cloned();

    let pool = db::create_pool(&PoolSettings::from_config(config)?)?;
    let ctx = Context::new(Arc::new(DieselUserStore::new(pool)))
        .with_credentials(credential_policy(config)?);
    let schema = gql::schema();

    let request = GraphQLRequest::new(document, operation, variables);
    let response = tokio::task::block_in_place(|| gql::execute(&schema, &request, &ctx))?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.is_ok() {
        Ok(())
    } else {
        Err(format!("query returned {} error(s)", response.errors.len()).into())
    }
}

use clap::{ArgMatches, Command};
use hyper::{server::conn::http1, service::service_fn, Method, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::error::Error;
use std::net::SocketAddr;
use std::{convert::Infallible, sync::Arc};
use tokio::net::TcpListener;

use userlookup::db::{self, PoolSettings};
use userlookup::gql::{self, Context};
use userlookup::store::{DieselUserStore, UserStore};

use crate::cli::config::credential_policy;

pub const NAME: &str = "serve";

pub fn app() -> Command {
    Command::new(NAME).about("Start GraphQL API server")
}

pub async fn execute(_matches: &ArgMatches, config: &config::Config) -> Result<(), Box<dyn Error>> {
    // Lazy so a database outage is reported per request instead of blocking startup.
    let pool = db::create_lazy_pool(&PoolSettings::from_config(config)?);
    let store: Arc<dyn UserStore> = Arc::new(DieselUserStore::new(pool));
    let credentials = credential_policy(config)?;
    let root_node = Arc::new(gql::schema());

    let server_addr: SocketAddr = config.get_string("http_server_address")?.parse()?;
    let listener = TcpListener::bind(server_addr).await?;
    log::info!("Listening on http://{}", server_addr);
    if credentials == gql::CredentialPolicy::Expose {
        log::warn!("Stored passwords are exposed through the User.password field");
    }

    loop {
        let (stream, remote_addr) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let root_node = root_node.clone();
        let store = store.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let root_node = root_node.clone();
                let ctx = Arc::new(Context::new(store.clone()).with_credentials(credentials));
                async move {
                    log::debug!("{} {} from {}", req.method(), req.uri().path(), remote_addr);
                    Ok::<_, Infallible>(match (req.method(), req.uri().path()) {
                        (&Method::GET, "/graphiql") => {
                            juniper_hyper::graphiql("/graphql", None).await
                        }
                        (&Method::GET, "/playground") => {
                            juniper_hyper::playground("/graphql", None).await
                        }
                        (&Method::GET, "/graphql") | (&Method::POST, "/graphql") => {
                            juniper_hyper::graphql_sync(root_node, ctx, req).await
                        }
                        _ => {
                            let mut response = Response::new(String::new());
                            *response.status_mut() = StatusCode::NOT_FOUND;
                            response
                        }
                    })
                }
            });
            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                log::error!("server error: {}", e);
            }
        });
    }
}

use api::App;
use db::{Config, Database, Memory, NoTls, Store};
use hyper::{body::Incoming, server::conn::http1, service::service_fn, Request};
use hyper_util::rt::TokioIo;
use std::{
    convert::Infallible,
    env,
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
    sync::Arc,
};
use tokio::{net::TcpListener, runtime::Runtime};

/// Connects to PostgreSQL when `PG_HOSTNAME` is set. Otherwise, questions only live in memory.
async fn connect_store() -> anyhow::Result<Box<dyn Store>> {
    let Ok(host) = env::var("PG_HOSTNAME") else {
        log::warn!("PG_HOSTNAME is not set. Questions will not outlive this process.");
        return Ok(Box::<Memory>::default());
    };

    let user = env::var("PG_USERNAME")?;
    let pass = env::var("PG_PASSWORD")?;
    let data = env::var("PG_DATABASE")?;
    let port = match env::var("PG_PORT") {
        Ok(port) => port.parse()?,
        _ => 5432,
    };

    let (client, conn) =
        Config::new().user(&user).password(&pass).host(&host).dbname(&data).port(port).connect(NoTls).await?;
    tokio::spawn(async move {
        if let Err(err) = conn.await {
            log::error!("Database connection closed: {err}");
        }
    });

    log::info!("Connected to PostgreSQL at {host}:{port}.");
    Ok(Box::new(Database::from(client)))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse environment variables
    let port = match env::var("PORT") {
        Ok(port) => port.parse()?,
        _ => 8082,
    };
    let seed_path = env::var_os("SEED_PATH").map_or_else(|| PathBuf::from("questions.json"), PathBuf::from);
    let data_dir = env::var_os("DATA_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from);

    let runtime = Runtime::new()?;
    runtime.block_on(async move {
        let store = connect_store().await?;
        if let Err(err) = api::seed(store.as_ref(), &seed_path).await {
            log::error!("Failed to seed questions: {err}");
        }

        let app = Arc::new(App::new(store, data_dir));
        let addr: SocketAddr = (Ipv4Addr::UNSPECIFIED, port).into();
        let listener = TcpListener::bind(addr).await?;
        log::info!("Listening on {addr}.");

        loop {
            let (stream, peer) = tokio::select! {
                biased;
                _ = tokio::signal::ctrl_c() => break,
                accepted = listener.accept() => match accepted {
                    Ok(pair) => pair,
                    Err(err) => {
                        log::error!("Failed to accept connection: {err}");
                        continue;
                    }
                },
            };

            let app = app.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    let app = app.clone();
                    async move { Ok::<_, Infallible>(app.respond(req).await) }
                });
                if let Err(err) = http1::Builder::new().serve_connection(TokioIo::new(stream), service).await {
                    log::error!("Connection with {peer} failed: {err}");
                }
            });
        }

        log::info!("Shutting down.");
        anyhow::Ok(())
    })
}

use std::{net::SocketAddr, sync::Arc};

use clap::Parser;
use dotenv::dotenv;
use snapcalorie_api::{
    application::{
        http::server::http_server::{router, state},
        logger::init_logger,
    },
    args::Args,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log.filter, args.log.json);

    let app_state = state(args.clone()).await?;
    let router = router(app_state)?;

    let addr: SocketAddr = format!("{}:{}", args.server.host, args.server.port).parse()?;
    info!("SnapCalorie listening on http://{}{}/", addr, args.server.root_path);

    axum_server::bind(addr)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

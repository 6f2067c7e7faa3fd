use gallery_core::Config;

// mimalloc keeps fragmentation low on musl-based container images.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    let (_state, router, database) = gallery_api::setup::initialize_app(config.clone()).await?;

    let served = gallery_api::setup::server::start_server(&config, router).await;

    database.close().await;
    served
}

use std::rc::Rc;

use anyhow::Context;

use shopfront_api::{ApiConfig, HttpShopApi};
use shopfront_observability::event_log;
use shopfront_state::ShopContext;
use shopfront_storefront::{LogRenderer, Storefront};

/// Smoke-run entry point: loads the catalog through the mounted storefront,
/// logs what was rendered and exits. No UI drives the other handlers.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    shopfront_observability::init();

    let config = ApiConfig::from_env().context("reading API configuration")?;
    tracing::info!(api_url = %config.api_url, cdn_url = %config.cdn_url, "starting shopfront");
    let api = HttpShopApi::new(config).context("building HTTP client")?;

    let context = ShopContext::new();
    let _tap = event_log::attach(&context.broker);
    let storefront = Storefront::mount(context, Rc::new(LogRenderer), api);

    storefront
        .load_catalog()
        .await
        .context("loading the catalog")?;

    tracing::info!(
        products = storefront.shop().catalog().len(),
        basket = storefront.shop().basket_len(),
        "storefront ready"
    );
    Ok(())
}

//! Call a Product Advertising API operation from the command line.
//!
//! ```sh
//! PAAPI_ACCESS_KEY_ID=x PAAPI_SECRET_KEY=y PAAPI_PARTNER_TAG=z \
//!     cargo r -p prodsign -F binary -- ItemLookup ItemId=B00008OE6I
//! ```

use anyhow::Context as _;
use clap::Parser;
use log::debug;
use prodsign::paapi::{Client, Config, ParameterSet};
use prodsign::default_context;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Operation to call (`ItemLookup`, `ItemSearch`, ...)
    operation: String,
    /// Request parameters as `KEY=VALUE`
    params: Vec<String>,

    /// Endpoint url [env: PAAPI_ENDPOINT] [default: http://webservices.amazon.com/onca/xml]
    #[arg(long)]
    endpoint: Option<String>,
    /// Access key id [env: PAAPI_ACCESS_KEY_ID]
    #[arg(long)]
    access_key_id: Option<String>,
    /// Secret key [env: PAAPI_SECRET_KEY]
    #[arg(long)]
    secret_key: Option<String>,
    /// Partner tag [env: PAAPI_PARTNER_TAG]
    #[arg(long)]
    partner_tag: Option<String>,

    /// Print the signed url without sending the request
    #[arg(long)]
    url_only: bool,
    /// Print the response body as received instead of the element tree
    #[arg(long)]
    raw: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            access_key_id: self.access_key_id.clone(),
            secret_key: self.secret_key.clone(),
            partner_tag: self.partner_tag.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let ctx = default_context();
    let config = args.config().from_env(&ctx);
    debug!("loaded config: {config:?}");

    let client = Client::from_config(ctx, &config).context("failed to build client")?;
    let params = ParameterSet::from_args(&args.params)?;

    if args.url_only {
        println!("{}", client.signed_url(&args.operation, &params)?);
        return Ok(());
    }

    if args.raw {
        let body = client.get_raw(&args.operation, &params).await?;
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(());
    }

    let doc = client.get(&args.operation, &params).await?;
    print!("{doc}");
    Ok(())
}

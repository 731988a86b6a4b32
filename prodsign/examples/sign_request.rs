use anyhow::Result;
use prodsign::paapi::{default_signer, Operation};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Loads credentials from the PAAPI_* environment variables on first use.
    let signer = default_signer();

    let req = http::Request::get("http://webservices.amazon.com/onca/xml?ItemId=B00008OE6I")
        .extension(Operation::new("ItemLookup"))
        .body(())?;
    let (mut parts, _) = req.into_parts();

    signer.sign(&mut parts, None).await?;
    println!("Signed request: {}", parts.uri);

    Ok(())
}

use anyhow::Result;
use prodsign::paapi::{default_client, Config, ParameterSet};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // Credentials come from PAAPI_ACCESS_KEY_ID, PAAPI_SECRET_KEY and PAAPI_PARTNER_TAG.
    let client = default_client(Config::new())?;

    let params = ParameterSet::new()
        .with("ItemId", "B00008OE6I")
        .with("ResponseGroup", "ItemAttributes");

    println!("Signed url: {}", client.signed_url("ItemLookup", &params)?);

    match client.get("ItemLookup", &params).await {
        Ok(doc) => {
            for item in doc.root().find_all("Items/Item") {
                let asin = item.child("ASIN").map(|e| e.text()).unwrap_or_default();
                let title = item
                    .find("ItemAttributes/Title")
                    .map(|e| e.text())
                    .unwrap_or_default();
                println!("{asin}: {title}");
            }
        }
        Err(e) => eprintln!("Request failed: {e}"),
    }

    Ok(())
}

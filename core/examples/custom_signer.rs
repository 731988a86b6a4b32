use async_trait::async_trait;
use http::request::Parts;
use prodsign_core::hash::base64_hmac_sha256;
use prodsign_core::{
    Context, Error, ProvideCredential, Result, SignRequest, Signer, SigningCredential,
    SigningRequest, StaticEnv,
};
use std::collections::HashMap;
use std::time::Duration;

/// Key pair for a made-up service that signs its query string.
#[derive(Clone, Debug)]
struct ApiKey {
    key_id: String,
    secret: String,
}

impl SigningCredential for ApiKey {
    fn is_valid(&self) -> bool {
        !self.key_id.is_empty() && !self.secret.is_empty()
    }
}

#[derive(Debug)]
struct EnvApiKey;

#[async_trait]
impl ProvideCredential for EnvApiKey {
    type Credential = ApiKey;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<ApiKey>> {
        match (ctx.env_var("DEMO_KEY_ID"), ctx.env_var("DEMO_SECRET")) {
            (Some(key_id), Some(secret)) => Ok(Some(ApiKey { key_id, secret })),
            _ => Ok(None),
        }
    }
}

/// Appends `KeyId` and an HMAC over the sorted query.
#[derive(Debug)]
struct SortedQuerySigner;

#[async_trait]
impl SignRequest for SortedQuerySigner {
    type Credential = ApiKey;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&ApiKey>,
        _: Option<Duration>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("no api key"))?;
        let mut signing = SigningRequest::build(req)?;

        signing.query.push(("KeyId".to_string(), cred.key_id.clone()));
        signing.query.sort();
        let canonical = signing
            .query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        let sig = base64_hmac_sha256(cred.secret.as_bytes(), canonical.as_bytes());
        signing
            .query
            .push(("Sig".to_string(), sig.replace('+', "-").replace('/', "_")));
        signing.apply(req)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let ctx = Context::new().with_env(StaticEnv {
        envs: HashMap::from([
            ("DEMO_KEY_ID".to_string(), "demo-key".to_string()),
            ("DEMO_SECRET".to_string(), "demo-secret".to_string()),
        ]),
    });

    let signer = Signer::new(ctx, EnvApiKey, SortedQuerySigner);

    let (mut parts, _) = http::Request::get("https://api.example.com/items?b=2&a=1")
        .body(())?
        .into_parts();
    signer.sign(&mut parts, None).await?;

    println!("signed uri: {}", parts.uri);
    Ok(())
}

use url::Url;

use crate::modules::credential::mask_credential;

/// `{base}/models/{model}:{method}?key={credential}`
pub fn build_method_url(
    base_url: &str,
    model: &str,
    method: &str,
    credential: &str,
) -> Result<Url, String> {
    with_key(&format!("{}/models/{}:{}", base_url, model, method), credential)
}

/// `{base}/models/{model}?key={credential}`
pub fn build_model_url(base_url: &str, model: &str, credential: &str) -> Result<Url, String> {
    with_key(&format!("{}/models/{}", base_url, model), credential)
}

fn with_key(raw: &str, credential: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|e| format!("Invalid request URL {}: {}", raw, e))?;
    url.query_pairs_mut().append_pair("key", credential);
    Ok(url)
}

/// URL string with the `key` parameter masked, for logs.
pub fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == "key" {
                (k.into_owned(), mask_credential(&v))
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

//! SigV4 presigned URL generation for S3-compatible object storage.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::fmt::Write as FmtWrite;
use url::Url;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";
const KEY_TYPE: &str = "aws4_request";
const SERVICE: &str = "s3";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

#[derive(Debug, Clone)]
pub struct PresignRequest<'a> {
    pub method: &'a str,
    pub region: &'a str,
    pub bucket: &'a str,
    pub key: &'a str,
    /// Custom endpoint for S3-compatible stores; None means AWS.
    pub endpoint: Option<&'a str>,
    pub expires_secs: u64,
    /// Fixed signing time, mainly for tests. None uses the current time.
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("invalid storage endpoint: {0}")]
    Endpoint(String),
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Produce a presigned URL for the given object using query-string
/// authentication. Only the `host` header is signed; the payload stays
/// unsigned since the URL authorizes a single method on a single key.
pub fn presign(credentials: &Credentials, request: &PresignRequest<'_>) -> Result<Url, SignError> {
    let datetime = request.time.unwrap_or_else(Utc::now);
    let amz_date = datetime.format("%Y%m%dT%H%M%SZ").to_string();
    let scope = credential_scope(&amz_date, request.region);

    let mut url = object_url(request)?;
    let host = url
        .host_str()
        .ok_or_else(|| SignError::Endpoint("endpoint has no host".to_string()))?
        .to_string();

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("X-Amz-Algorithm", ALGORITHM);
        query.append_pair("X-Amz-Content-Sha256", UNSIGNED_PAYLOAD);
        query.append_pair(
            "X-Amz-Credential",
            &format!("{}/{}", credentials.access_key_id, scope),
        );
        query.append_pair("X-Amz-Date", &amz_date);
        query.append_pair("X-Amz-Expires", &request.expires_secs.to_string());
        query.append_pair("X-Amz-SignedHeaders", "host");
    }

    let canonical = canonical_request(request.method, &url, &host);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date,
        scope,
        hex(&sha256(canonical.as_bytes()))
    );

    let signing_key = signing_key(
        &credentials.secret_access_key,
        &amz_date[..8],
        request.region,
    );
    let signature = hex(&hmac_sha256(&signing_key, string_to_sign.as_bytes()));

    url.query_pairs_mut()
        .append_pair("X-Amz-Signature", &signature);

    Ok(url)
}

/// Virtual-hosted-style object URL: `https://{bucket}.{host}/{key}`.
fn object_url(request: &PresignRequest<'_>) -> Result<Url, SignError> {
    let host = match request.endpoint {
        Some(endpoint) => {
            let parsed = Url::parse(endpoint)?;
            parsed
                .host_str()
                .ok_or_else(|| SignError::Endpoint(endpoint.to_string()))?
                .to_string()
        }
        None => format!("s3.{}.amazonaws.com", request.region),
    };

    let key = encode_path(request.key);
    Ok(Url::parse(&format!(
        "https://{}.{}/{}",
        request.bucket, host, key
    ))?)
}

fn credential_scope(amz_date: &str, region: &str) -> String {
    let date = if amz_date.len() >= 8 { &amz_date[..8] } else { amz_date };
    format!("{}/{}/{}/{}", date, region, SERVICE, KEY_TYPE)
}

fn canonical_request(method: &str, url: &Url, host: &str) -> String {
    // For s3 the canonical URI is the single-encoded path exactly as it
    // appears on the wire; `object_url` has already encoded the key.
    format!(
        "{}\n{}\n{}\nhost:{}\n\nhost\n{}",
        method,
        url.path(),
        canonical_query(url),
        host,
        UNSIGNED_PAYLOAD
    )
}

fn canonical_query(url: &Url) -> String {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !k.is_empty() && k != "X-Amz-Signature")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    params.sort();

    params
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn signing_key(secret: &str, date: &str, region: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{}", secret).as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, SERVICE.as_bytes());
    hmac_sha256(&k_service, KEY_TYPE.as_bytes())
}

fn sha256(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

/// Percent-encode a path, keeping `/` separators intact.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(encode_component)
        .collect::<Vec<_>>()
        .join("/")
}

fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                let _ = write!(out, "%{:02X}", byte);
            }
        }
    }
    out
}

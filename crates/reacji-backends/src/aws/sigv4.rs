//! AWS Signature Version 4 request signing (HMAC-SHA256).

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Static credentials for signing.
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

/// The parts of an HTTP request that go into the signature.
pub struct SigningRequest<'a> {
    pub method: &'a str,
    pub host: &'a str,
    pub path: &'a str,
    /// Already-canonical query string (sorted, encoded); empty for none.
    pub query: &'a str,
    /// Headers to sign besides `host` and `x-amz-date`.
    pub headers: &'a [(&'a str, &'a str)],
    pub payload: &'a [u8],
}

/// Headers to attach to the outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub amz_date: String,
    pub authorization: String,
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Derive the per-day, per-region, per-service signing key.
pub fn signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date_stamp.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

/// Build the canonical request and the `SignedHeaders` list.
pub(crate) fn canonical_request(req: &SigningRequest<'_>, amz_date: &str) -> (String, String) {
    let mut headers: Vec<(String, String)> = req
        .headers
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.trim().to_string()))
        .collect();
    headers.push(("host".to_string(), req.host.to_string()));
    headers.push(("x-amz-date".to_string(), amz_date.to_string()));
    headers.sort();

    let canonical_headers: String = headers.iter().map(|(k, v)| format!("{k}:{v}\n")).collect();
    let signed_headers = headers
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(";");

    let canonical = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        req.method,
        req.path,
        req.query,
        canonical_headers,
        signed_headers,
        sha256_hex(req.payload)
    );
    (canonical, signed_headers)
}

/// Sign a request at time `now`.
pub fn sign(
    credentials: &Credentials,
    region: &str,
    service: &str,
    req: &SigningRequest<'_>,
    now: DateTime<Utc>,
) -> SignedHeaders {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = now.format("%Y%m%d").to_string();

    let (canonical, signed_headers) = canonical_request(req, &amz_date);
    let scope = format!("{date_stamp}/{region}/{service}/aws4_request");
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        sha256_hex(canonical.as_bytes())
    );

    let key = signing_key(&credentials.secret_access_key, &date_stamp, region, service);
    let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes()));

    SignedHeaders {
        authorization: format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
            credentials.access_key_id
        ),
        amz_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EXAMPLE_SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    #[test]
    fn test_signing_key_matches_published_example() {
        let key = signing_key(EXAMPLE_SECRET, "20120215", "us-east-1", "iam");
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn test_canonical_request_layout() {
        let req = SigningRequest {
            method: "POST",
            host: "translate.ap-northeast-1.amazonaws.com",
            path: "/",
            query: "",
            headers: &[
                ("X-Amz-Target", "AWSShineFrontendService_20170701.TranslateText"),
                ("Content-Type", "application/x-amz-json-1.1"),
            ],
            payload: b"{}",
        };
        let (canonical, signed) = canonical_request(&req, "20240101T000000Z");
        assert_eq!(signed, "content-type;host;x-amz-date;x-amz-target");
        let lines: Vec<&str> = canonical.lines().collect();
        assert_eq!(lines[0], "POST");
        assert_eq!(lines[1], "/");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "content-type:application/x-amz-json-1.1");
        assert_eq!(lines[4], "host:translate.ap-northeast-1.amazonaws.com");
        assert_eq!(lines[5], "x-amz-date:20240101T000000Z");
        assert_eq!(
            lines[6],
            "x-amz-target:AWSShineFrontendService_20170701.TranslateText"
        );
        assert_eq!(lines[8], signed);
        assert_eq!(lines[9], sha256_hex(b"{}"));
    }

    #[test]
    fn test_sign_is_deterministic_and_scoped() {
        let creds = Credentials {
            access_key_id: "AKIDEXAMPLE".into(),
            secret_access_key: EXAMPLE_SECRET.into(),
        };
        let req = SigningRequest {
            method: "POST",
            host: "translate.us-east-1.amazonaws.com",
            path: "/",
            query: "",
            headers: &[("Content-Type", "application/x-amz-json-1.1")],
            payload: b"{\"Text\":\"Hi\"}",
        };
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let a = sign(&creds, "us-east-1", "translate", &req, now);
        let b = sign(&creds, "us-east-1", "translate", &req, now);
        assert_eq!(a, b);
        assert_eq!(a.amz_date, "20240102T030405Z");
        assert!(a.authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20240102/us-east-1/translate/aws4_request, "
        ));
        let sig = a.authorization.rsplit("Signature=").next().unwrap();
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));

        let other = SigningRequest {
            payload: b"{\"Text\":\"Bye\"}",
            ..req
        };
        assert_ne!(sign(&creds, "us-east-1", "translate", &other, now), a);
    }
}

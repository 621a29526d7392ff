use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Check an `Authorization` header value against `Bearer <secret>`.
///
/// Both sides are run through HMAC-SHA256 keyed with the secret and compared
/// with `verify_slice`, so the comparison time does not depend on where the
/// presented token first differs.
pub fn bearer_matches(secret: &SecretString, authorization: Option<&str>) -> bool {
    let Some(presented) = authorization.and_then(|h| h.strip_prefix("Bearer ")) else {
        return false;
    };
    let key = secret.expose_secret().as_bytes();
    if key.is_empty() {
        return false;
    }

    let Ok(mut expected) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    expected.update(key);
    let expected = expected.finalize().into_bytes();

    let Ok(mut mac) = HmacSha256::new_from_slice(key) else {
        return false;
    };
    mac.update(presented.trim().as_bytes());
    mac.verify_slice(&expected).is_ok()
}

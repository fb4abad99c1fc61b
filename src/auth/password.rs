use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SALT_LEN: usize = 16;

/// Salt and HMAC digest stored for a user. Only constructible from a plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub salt: String,
    pub digest: String,
}

impl Credentials {
    pub fn from_plaintext(plain: &str) -> Self {
        hash_password(plain)
    }

    pub fn matches(&self, plain: &str) -> bool {
        verify_password(plain, Some(&self.salt), Some(&self.digest))
    }
}

/// Draws a fresh salt and computes `hex(HMAC-SHA256(salt, plain))`.
pub fn hash_password(plain: &str) -> Credentials {
    let mut bytes = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut bytes);
    let salt = hex::encode(bytes);
    let digest = hex::encode(mac_for(&salt, plain).finalize().into_bytes());
    Credentials { salt, digest }
}

/// Missing salt or digest never verifies.
pub fn verify_password(plain: &str, salt: Option<&str>, digest: Option<&str>) -> bool {
    let (Some(salt), Some(digest)) = (salt, digest) else {
        return false;
    };
    let Ok(expected) = hex::decode(digest) else {
        return false;
    };
    mac_for(salt, plain).verify_slice(&expected).is_ok()
}

fn mac_for(salt: &str, plain: &str) -> HmacSha256 {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(salt.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(plain.as_bytes());
    mac
}

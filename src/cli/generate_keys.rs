//! Generate-keys command.

use serde::Serialize;

use crate::core::cipher::KeyPair;
use crate::core::constants::{DECRYPTION_KEY_VAR, ENCRYPTION_KEY_VAR};
use crate::error::{Error, Result};

#[derive(Serialize)]
struct KeyPairJson<'a> {
    encryption_key: &'a str,
    decryption_key: &'a str,
}

/// Generate a key pair and print it as .env lines or JSON.
pub fn execute(json: bool) -> Result<()> {
    let keys = KeyPair::generate()?;

    if json {
        let out = serde_json::to_string_pretty(&KeyPairJson {
            encryption_key: keys.public_key(),
            decryption_key: keys.private_key(),
        })
        .map_err(|e| Error::Other(e.to_string()))?;
        println!("{}", out);
    } else {
        println!("{}={}", ENCRYPTION_KEY_VAR, keys.public_key());
        println!("{}={}", DECRYPTION_KEY_VAR, keys.private_key());
    }
    Ok(())
}

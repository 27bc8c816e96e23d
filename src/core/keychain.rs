//! ClickUp API key storage in the system keychain.

use keyring::Entry;

const SERVICE_NAME: &str = "clickup-mcp";
const ACCOUNT: &str = "api-key";

pub fn store_api_key(api_key: &str) -> anyhow::Result<()> {
    Entry::new(SERVICE_NAME, ACCOUNT)?.set_password(api_key)?;
    Ok(())
}

/// Stored key, or `None` when absent or the keychain is unavailable.
#[must_use]
pub fn get_api_key() -> Option<String> {
    Entry::new(SERVICE_NAME, ACCOUNT).ok()?.get_password().ok()
}

pub fn delete_api_key() -> anyhow::Result<()> {
    Entry::new(SERVICE_NAME, ACCOUNT)?.delete_credential()?;
    Ok(())
}

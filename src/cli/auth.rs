use dialoguer::{Password, theme::ColorfulTheme};

use super::LoginArgs;
use crate::core::keychain;

pub fn auth_login(args: LoginArgs) -> anyhow::Result<()> {
    let api_key = match args.api_key {
        Some(key) => key,
        None => prompt_api_key()?,
    };
    let api_key = validate_api_key(&api_key)?;

    keychain::store_api_key(api_key)?;
    println!("Stored ClickUp API key in system keychain");

    Ok(())
}

pub fn auth_logout() -> anyhow::Result<()> {
    keychain::delete_api_key()?;
    println!("Removed ClickUp API key from system keychain");
    Ok(())
}

fn prompt_api_key() -> anyhow::Result<String> {
    let api_key = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your ClickUp API key")
        .interact()?;
    Ok(api_key)
}

fn validate_api_key(api_key: &str) -> anyhow::Result<&str> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        anyhow::bail!("API key cannot be empty");
    }
    if api_key.chars().any(char::is_whitespace) {
        anyhow::bail!("API key cannot contain whitespace");
    }
    Ok(api_key)
}

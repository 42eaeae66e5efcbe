use crate::commands::Out;
use crate::summary::{Currency, Locale};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory, the storage directory and an initial `config.json`.
///
/// # Arguments
/// - `home` - The directory that will be the root of data directory, e.g. `$HOME/gofinances`
/// - `locale` - How amounts, dates and labels will be written
/// - `currency` - The currency symbol shown with amounts
///
/// # Errors
/// - Returns an error if the directory has already been initialized.
/// - Returns an error if any file operations fail.
pub async fn init(home: &Path, locale: Locale, currency: Currency) -> Result<Out<()>> {
    let config = Config::create(home, locale, currency)
        .await
        .context("Unable to create the data directory and config")?;
    Ok(format!(
        "Successfully created the gofinances directory at {}",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("gofinances");
        let out = init(&home, Locale::EnUs, Currency::Eur).await.unwrap();
        assert!(out.message().starts_with("Successfully created"));

        let config = Config::load(&home).await.unwrap();
        assert_eq!(config.locale(), Locale::EnUs);
        assert_eq!(config.currency(), Currency::Eur);
    }

    #[tokio::test]
    async fn test_init_twice_fails() {
        let dir = TempDir::new().unwrap();
        init(dir.path(), Locale::PtBr, Currency::Brl).await.unwrap();
        assert!(init(dir.path(), Locale::PtBr, Currency::Brl).await.is_err());
    }
}

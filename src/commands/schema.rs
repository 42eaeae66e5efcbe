use crate::commands::Out;
use crate::store::LedgerBlob;
use crate::Result;
use anyhow::Context;

/// Produces the JSON schema of the blob each ledger is stored as.
pub async fn schema() -> Result<Out<serde_json::Value>> {
    let schema = schemars::schema_for!(LedgerBlob);
    let value = serde_json::to_value(&schema).context("Unable to serialize the ledger schema")?;
    let pretty =
        serde_json::to_string_pretty(&value).context("Unable to serialize the ledger schema")?;
    Ok(Out::new(pretty, value))
}

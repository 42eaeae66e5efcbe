use crate::args::RecordArgs;
use crate::commands::Out;
use crate::model::{Transaction, TransactionInput};
use crate::session::Session;
use crate::{Config, Ledger, Result};

/// Records a transaction into the signed-in user's ledger.
///
/// # Errors
/// - No user is signed in
/// - The name, amount, type or date cannot be accepted
/// - The ledger is corrupt or the storage directory cannot be written
pub async fn record(config: Config, args: RecordArgs) -> Result<Out<Transaction>> {
    let kv = config.key_value_store();
    let user = Session::new(kv.clone()).require_user().await?;
    let input = TransactionInput::parse(
        args.name(),
        args.amount(),
        args.kind(),
        args.category(),
        args.date(),
    )?;

    let ledger = Ledger::new(kv, config.formatting());
    let transaction = ledger.record_transaction(&user.id, input).await?;

    let formatting = ledger.formatting();
    let message = format!(
        "Recorded {} '{}' of {} on {}",
        transaction.kind(),
        transaction.name(),
        formatting.money(transaction.amount().value()),
        formatting.short_date(transaction.occurred_at()),
    );
    Ok(Out::new(message, transaction))
}

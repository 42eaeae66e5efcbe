use crate::args::SummaryArgs;
use crate::commands::Out;
use crate::model::TransactionKind;
use crate::session::Session;
use crate::summary::{Summary, SummaryFigure};
use crate::{Config, Ledger, Result};
use std::fmt::Write;

/// Summarizes the signed-in user's ledger.
pub async fn summary(config: Config, args: SummaryArgs) -> Result<Out<Summary>> {
    let kv = config.key_value_store();
    let user = Session::new(kv.clone()).require_user().await?;
    let mut summary = Ledger::new(kv, config.formatting())
        .load_summary(&user.id)
        .await?;
    if args.reverse() {
        summary.items.reverse();
    }
    Ok(Out::new(render(&summary), summary))
}

fn render(summary: &Summary) -> String {
    let mut s = String::new();
    figure(&mut s, "Income", &summary.income);
    figure(&mut s, "Outcome", &summary.outcome);
    figure(&mut s, "Total", &summary.net);
    if summary.items.is_empty() {
        s.push_str("\nNo transactions recorded yet");
        return s;
    }
    s.push('\n');
    for item in &summary.items {
        let sign = match item.kind {
            TransactionKind::Income => ' ',
            TransactionKind::Outcome => '-',
        };
        let _ = write!(
            s,
            "\n{}  {:<24} {}{:>16}  {}",
            item.formatted_date, item.name, sign, item.formatted_amount, item.category
        );
    }
    s
}

fn figure(s: &mut String, title: &str, figure: &SummaryFigure) {
    let _ = write!(s, "\n{title:<8} {:>16}", figure.formatted_amount);
    if !figure.last_transaction.is_empty() {
        let _ = write!(s, "  {}", figure.last_transaction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionInput;
    use crate::test::TestEnv;

    async fn seeded() -> TestEnv {
        let env = TestEnv::with_user("u").await;
        let ledger = env.ledger();
        for (name, amount, kind, date) in [
            ("Salary", "1000.00", "income", "2024-01-05"),
            ("Rent", "300.00", "outcome", "2024-01-10"),
            ("Bonus", "500.00", "income", "2024-01-20"),
        ] {
            let input = TransactionInput::parse(name, amount, kind, "misc", Some(date)).unwrap();
            ledger.record_transaction("u", input).await.unwrap();
        }
        env
    }

    #[tokio::test]
    async fn test_summary() {
        let env = seeded().await;
        let out = summary(env.config(), SummaryArgs::default()).await.unwrap();
        let s = out.structure().unwrap();
        assert_eq!(s.net.formatted_amount, "R$ 1.200,00");
        let names: Vec<&str> = s.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Salary", "Rent", "Bonus"]);
        assert!(out.message().contains("Última entrada 20 de janeiro"));
        assert!(out.message().contains("Última saída 10 de janeiro"));
        assert!(out.message().contains("01 à 20 de janeiro"));
    }

    #[tokio::test]
    async fn test_summary_reverse() {
        let env = seeded().await;
        let out = summary(env.config(), SummaryArgs::new(true)).await.unwrap();
        let names: Vec<&str> = out
            .structure()
            .unwrap()
            .items
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Bonus", "Rent", "Salary"]);
    }

    #[tokio::test]
    async fn test_summary_of_empty_ledger() {
        let env = TestEnv::with_user("nobody-recorded-anything").await;
        let out = summary(env.config(), SummaryArgs::default()).await.unwrap();
        assert!(out.message().contains("No transactions recorded yet"));
        assert!(out.message().contains("R$ 0,00"));
    }

    #[tokio::test]
    async fn test_summary_requires_session() {
        let env = TestEnv::new().await;
        assert!(summary(env.config(), SummaryArgs::default()).await.is_err());
    }
}

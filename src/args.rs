//! These structs provide the CLI interface for the gofinances CLI.

use crate::summary::{Currency, Locale};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// gofinances: A command-line tool for keeping track of your income and expenses.
///
/// Transactions are recorded into a ledger kept on this machine, one ledger per signed-in user.
/// The summary command shows your total income, total expenses and the balance between them,
/// along with every transaction you have recorded.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and the configuration file.
    ///
    /// This is the first command you should run. Decide what directory you want to store data in
    /// and pass this as --home. By default it will be $HOME/gofinances.
    Init(InitArgs),
    /// Sign in. Transactions you record afterwards go into this user's ledger.
    Login(LoginArgs),
    /// Sign out. Your ledger stays where it is.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// Record an income or an expense.
    Record(RecordArgs),
    /// Show totals, the latest transactions and the full list.
    Summary(SummaryArgs),
    /// Print the JSON schema of the stored ledger.
    Schema,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where gofinances data and configuration is held. Defaults to ~/gofinances
    #[arg(long, env = "GOFINANCES_HOME", default_value_t = default_home())]
    home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }
}

/// Args for the `gofinances init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// How amounts, dates and labels are written: pt-BR or en-US
    #[arg(long, default_value_t = Locale::default())]
    locale: Locale,

    /// The currency symbol shown with amounts: BRL, USD or EUR
    #[arg(long, default_value_t = Currency::default())]
    currency: Currency,
}

impl InitArgs {
    pub fn new(locale: Locale, currency: Currency) -> Self {
        Self { locale, currency }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

/// Args for the `gofinances login` command.
#[derive(Debug, Parser, Clone)]
pub struct LoginArgs {
    /// The user's identifier as issued by the identity provider
    #[arg(long)]
    id: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    /// URL of the user's avatar
    #[arg(long)]
    photo: Option<String>,
}

impl LoginArgs {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        photo: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            photo,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn photo(&self) -> Option<&str> {
        self.photo.as_deref()
    }
}

/// Args for the `gofinances record` command.
///
/// Values are kept as text and validated when the transaction is recorded.
#[derive(Debug, Parser, Clone)]
pub struct RecordArgs {
    /// A short description, e.g. "Salary" or "Groceries"
    #[arg(long)]
    name: String,

    /// A positive decimal amount, e.g. 1500.00 or 1500,00
    #[arg(long)]
    amount: String,

    /// Either "income" or "outcome"
    #[arg(long = "type")]
    kind: String,

    /// The category key, e.g. "food"
    #[arg(long)]
    category: String,

    /// When the transaction happened, e.g. 2024-01-20 or 2024-01-20T09:30:00. Defaults to now
    #[arg(long)]
    date: Option<String>,
}

impl RecordArgs {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        kind: impl Into<String>,
        category: impl Into<String>,
        date: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            kind: kind.into(),
            category: category.into(),
            date,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

/// Args for the `gofinances summary` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct SummaryArgs {
    /// List the most recently recorded transactions first
    #[arg(long)]
    reverse: bool,
}

impl SummaryArgs {
    pub fn new(reverse: bool) -> Self {
        Self { reverse }
    }

    pub fn reverse(&self) -> bool {
        self.reverse
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("gofinances"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or GOFINANCES_HOME instead of relying on the default \
                home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("gofinances")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record() {
        let args = Args::try_parse_from([
            "gofinances",
            "--home",
            "/tmp/gf",
            "record",
            "--name",
            "Salary",
            "--amount",
            "1500,00",
            "--type",
            "income",
            "--category",
            "salary",
        ])
        .unwrap();
        assert_eq!(args.common().home().path(), Path::new("/tmp/gf"));
        let Command::Record(record) = args.command() else {
            panic!("expected the record command, got {:?}", args.command());
        };
        assert_eq!(record.kind(), "income");
        assert_eq!(record.amount(), "1500,00");
        assert_eq!(record.date(), None);
    }

    #[test]
    fn test_parse_init_defaults() {
        let args = Args::try_parse_from(["gofinances", "init"]).unwrap();
        let Command::Init(init) = args.command() else {
            panic!("expected the init command");
        };
        assert_eq!(init.locale(), Locale::PtBr);
        assert_eq!(init.currency(), Currency::Brl);
        assert_eq!(args.common().log_level(), LevelFilter::INFO);
    }

    #[test]
    fn test_parse_init_locale() {
        let args =
            Args::try_parse_from(["gofinances", "init", "--locale", "en-US", "--currency", "USD"])
                .unwrap();
        let Command::Init(init) = args.command() else {
            panic!("expected the init command");
        };
        assert_eq!(init.locale(), Locale::EnUs);
        assert_eq!(init.currency(), Currency::Usd);
    }

    #[test]
    fn test_parse_rejects_unknown_locale() {
        assert!(Args::try_parse_from(["gofinances", "init", "--locale", "fr-FR"]).is_err());
    }

    #[test]
    fn test_parse_summary_reverse() {
        let args = Args::try_parse_from(["gofinances", "summary", "--reverse"]).unwrap();
        let Command::Summary(summary) = args.command() else {
            panic!("expected the summary command");
        };
        assert!(summary.reverse());
    }
}

use crate::account::{Account, EntryKind};
use crate::error::SessionError;
use crate::workflow::{Run, Workflow};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Actions a user can trigger against the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Create,
    Deposit,
    Withdraw,
    Balance,
    History,
    Auto,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "Create",
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
            Self::Balance => "Balance",
            Self::History => "History",
            Self::Auto => "Auto",
        };
        f.write_str(name)
    }
}

/// Command record, either typed in or read from a CSV script
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Command {
    #[serde(rename = "type")]
    pub kind: CommandKind,
    #[serde(default)]
    pub holder: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

impl Command {
    pub fn create(holder: impl Into<String>, amount: Decimal) -> Self {
        Self {
            kind: CommandKind::Create,
            holder: Some(holder.into()),
            amount: Some(amount),
        }
    }

    pub const fn with_amount(kind: CommandKind, amount: Decimal) -> Self {
        Self {
            kind,
            holder: None,
            amount: Some(amount),
        }
    }

    pub const fn bare(kind: CommandKind) -> Self {
        Self {
            kind,
            holder: None,
            amount: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Created { holder: String, opening: Decimal },
    Deposited(Decimal),
    Withdrew(Decimal),
    Balance(Decimal),
    History(Vec<String>),
    Routed(Run),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { holder, opening } => write!(
                f,
                "Account created for {holder} with initial deposit of Rs. {opening}"
            ),
            Self::Deposited(amount) => write!(f, "Deposited Rs. {amount} successfully!"),
            Self::Withdrew(amount) => write!(f, "Withdrew Rs. {amount} successfully!"),
            Self::Balance(balance) => write!(f, "Current Balance: Rs. {balance}"),
            Self::History(history) => write_history(f, history),
            Self::Routed(run) => {
                let path: Vec<&str> = run.visited.iter().map(|step| step.name()).collect();
                writeln!(f, "Route: {}", path.join(" -> "))?;
                writeln!(f, "Current Balance: Rs. {}", run.balance)?;
                write_history(f, &run.history)
            }
        }
    }
}

fn write_history(f: &mut fmt::Formatter<'_>, history: &[String]) -> fmt::Result {
    if history.is_empty() {
        return f.write_str("No transactions yet.");
    }

    f.write_str("Transaction History:")?;
    for line in history {
        write!(f, "\n- {line}")?;
    }

    Ok(())
}

/// History row for CSV export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    pub seq: usize,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub description: String,
}

impl HistoryRecord {
    pub fn from_account(account: &Account) -> Vec<Self> {
        account
            .entries()
            .iter()
            .enumerate()
            .map(|(seq, entry)| Self {
                seq: seq + 1,
                kind: entry.kind(),
                amount: entry.amount(),
                description: entry.to_string(),
            })
            .collect()
    }
}

/// Holds the current account for one user session.
///
/// `Create` replaces whatever account was open before.
#[derive(Debug, Default)]
pub struct Session {
    account: Option<Account>,
    workflow: Workflow,
}

impl Session {
    pub const fn new(workflow: Workflow) -> Self {
        Self {
            account: None,
            workflow,
        }
    }

    pub const fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn execute(&mut self, command: Command) -> Result<Reply, SessionError> {
        let Command {
            kind,
            holder,
            amount,
        } = command;

        match kind {
            CommandKind::Create => {
                let holder = holder.ok_or(SessionError::MissingHolder(kind))?;
                let opening = amount.unwrap_or(Decimal::ZERO);
                let account = Account::open(&holder, opening)?;
                let holder = account.holder().to_owned();
                self.account = Some(account);

                Ok(Reply::Created { holder, opening })
            }
            CommandKind::Deposit => {
                let account = self.current()?;
                let amount = amount.ok_or(SessionError::MissingAmount(kind))?;
                account.deposit(amount)?;

                Ok(Reply::Deposited(amount))
            }
            CommandKind::Withdraw => {
                let account = self.current()?;
                let amount = amount.ok_or(SessionError::MissingAmount(kind))?;
                account.withdraw(amount)?;

                Ok(Reply::Withdrew(amount))
            }
            CommandKind::Balance => Ok(Reply::Balance(self.current()?.balance())),
            CommandKind::History => Ok(Reply::History(self.current()?.history())),
            CommandKind::Auto => {
                let workflow = self.workflow;
                let run = workflow.run(self.current()?)?;

                Ok(Reply::Routed(run))
            }
        }
    }

    fn current(&mut self) -> Result<&mut Account, SessionError> {
        self.account.as_mut().ok_or(SessionError::NoAccount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AccountError, WorkflowError};

    fn rs(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    #[test]
    fn test_requires_account() {
        let mut session = Session::default();

        let result = session.execute(Command::bare(CommandKind::Balance));

        assert_eq!(result, Err(SessionError::NoAccount));
    }

    #[test]
    fn test_create_and_transact() {
        let mut session = Session::default();

        let reply = session.execute(Command::create("Asha", rs(1000))).unwrap();
        assert_eq!(reply.to_string(), "Account created for Asha with initial deposit of Rs. 1000");

        let reply = session
            .execute(Command::with_amount(CommandKind::Deposit, rs(500)))
            .unwrap();
        assert_eq!(reply.to_string(), "Deposited Rs. 500 successfully!");

        let result = session.execute(Command::with_amount(CommandKind::Withdraw, rs(2000)));
        assert_eq!(
            result,
            Err(SessionError::Account(AccountError::InsufficientFunds {
                balance: rs(1500),
                requested: rs(2000),
            }))
        );

        let reply = session.execute(Command::bare(CommandKind::Balance)).unwrap();
        assert_eq!(reply, Reply::Balance(rs(1500)));
        assert_eq!(reply.to_string(), "Current Balance: Rs. 1500");
    }

    #[test]
    fn test_deposit_overflow_is_rejected() {
        let mut session = Session::default();
        session.execute(Command::create("Asha", Decimal::MAX)).unwrap();

        let result = session.execute(Command::with_amount(CommandKind::Deposit, Decimal::MAX));

        assert_eq!(
            result,
            Err(SessionError::Account(AccountError::Overflow {
                balance: Decimal::MAX,
                amount: Decimal::MAX,
            }))
        );
        assert_eq!(session.account().unwrap().balance(), Decimal::MAX);
        assert_eq!(session.account().unwrap().entries().len(), 1);
    }

    #[test]
    fn test_create_replaces_account() {
        let mut session = Session::default();
        session.execute(Command::create("Asha", rs(10))).unwrap();
        session.execute(Command::create("Ravi", rs(20))).unwrap();

        let account = session.account().unwrap();
        assert_eq!(account.holder(), "Ravi");
        assert_eq!(account.balance(), rs(20));
    }

    #[test]
    fn test_create_without_amount_opens_empty() {
        let mut session = Session::default();

        session
            .execute(Command {
                kind: CommandKind::Create,
                holder: Some("Asha".into()),
                amount: None,
            })
            .unwrap();

        assert_eq!(session.account().unwrap().balance(), Decimal::ZERO);
    }

    #[test]
    fn test_missing_fields() {
        let mut session = Session::default();

        assert_eq!(
            session.execute(Command::bare(CommandKind::Create)),
            Err(SessionError::MissingHolder(CommandKind::Create))
        );

        session.execute(Command::create("Asha", rs(10))).unwrap();
        assert_eq!(
            session.execute(Command::bare(CommandKind::Deposit)),
            Err(SessionError::MissingAmount(CommandKind::Deposit))
        );
    }

    #[test]
    fn test_history_reply() {
        let mut session = Session::default();
        session.execute(Command::create("Asha", rs(100))).unwrap();
        session
            .execute(Command::with_amount(CommandKind::Withdraw, rs(40)))
            .unwrap();

        let reply = session.execute(Command::bare(CommandKind::History)).unwrap();

        assert_eq!(
            reply.to_string(),
            "Transaction History:\n- Account created with Rs. 100\n- Withdrawn: Rs. 40"
        );
        assert_eq!(Reply::History(Vec::new()).to_string(), "No transactions yet.");
    }

    #[test]
    fn test_auto_on_fresh_account() {
        let mut session = Session::default();
        session.execute(Command::create("Asha", rs(100))).unwrap();

        let reply = session.execute(Command::bare(CommandKind::Auto)).unwrap();

        assert_eq!(
            reply.to_string(),
            "Route: Start -> Balance -> History -> End\n\
             Current Balance: Rs. 100\n\
             Transaction History:\n- Account created with Rs. 100"
        );
    }

    #[test]
    fn test_auto_after_deposit_is_bounded() {
        let mut session = Session::new(Workflow::new(4));
        session.execute(Command::create("Asha", rs(100))).unwrap();
        session
            .execute(Command::with_amount(CommandKind::Deposit, rs(1)))
            .unwrap();

        let result = session.execute(Command::bare(CommandKind::Auto));

        assert!(matches!(
            result,
            Err(SessionError::Workflow(WorkflowError::StepLimit { limit: 4, .. }))
        ));
    }

    #[test]
    fn test_history_records() {
        let mut account = Account::open("Asha", rs(100)).unwrap();
        account.deposit(rs(5)).unwrap();

        let records = HistoryRecord::from_account(&account);

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].seq, 2);
        assert_eq!(records[1].kind, EntryKind::Deposit);
        assert_eq!(records[1].description, "Deposited: Rs. 5");
    }
}

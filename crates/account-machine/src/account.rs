use crate::error::AccountError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Tag recorded alongside every history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Opened,
    Deposit,
    Withdrawal,
}

/// One line of the transaction log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    kind: EntryKind,
    amount: Decimal,
}

impl Entry {
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    pub const fn amount(&self) -> Decimal {
        self.amount
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntryKind::Opened => write!(f, "Account created with Rs. {}", self.amount),
            EntryKind::Deposit => write!(f, "Deposited: Rs. {}", self.amount),
            EntryKind::Withdrawal => write!(f, "Withdrawn: Rs. {}", self.amount),
        }
    }
}

/// A single holder's balance and append-only transaction log.
///
/// The balance never goes negative: every mutation is validated before
/// anything is written, so a rejected call leaves the account as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    holder: String,
    balance: Decimal,
    entries: Vec<Entry>,
}

impl Account {
    /// Opens an account and records the opening balance as the first entry.
    pub fn open(holder: &str, initial_balance: Decimal) -> Result<Self, AccountError> {
        let holder = holder.trim();

        if holder.is_empty() {
            return Err(AccountError::EmptyHolder);
        }

        if initial_balance < Decimal::ZERO {
            return Err(AccountError::NegativeOpeningBalance {
                amount: initial_balance,
            });
        }

        debug!(holder, %initial_balance, "account opened");

        Ok(Self {
            holder: holder.to_owned(),
            balance: initial_balance,
            entries: vec![Entry {
                kind: EntryKind::Opened,
                amount: initial_balance,
            }],
        })
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount { amount });
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::Overflow {
                balance: self.balance,
                amount,
            })?;
        self.record(EntryKind::Deposit, amount);

        Ok(())
    }

    /// Withdrawing zero is allowed and still logged.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        if amount < Decimal::ZERO {
            return Err(AccountError::NegativeWithdrawal { amount });
        }

        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }

        self.balance -= amount;
        self.record(EntryKind::Withdrawal, amount);

        Ok(())
    }

    pub fn holder(&self) -> &str {
        &self.holder
    }

    pub const fn balance(&self) -> Decimal {
        self.balance
    }

    /// Rendered log, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn last_entry(&self) -> Option<&Entry> {
        self.entries.last()
    }

    fn record(&mut self, kind: EntryKind, amount: Decimal) {
        self.entries.push(Entry { kind, amount });
        debug!(holder = %self.holder, ?kind, %amount, balance = %self.balance, "transaction recorded");
    }
}

use crate::account::{Account, Entry, EntryKind};
use std::fmt;

/// Nodes of the account workflow graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Start,
    Balance,
    Deposit,
    Withdraw,
    History,
    End,
}

impl Step {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Balance => "Balance",
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
            Self::History => "History",
            Self::End => "End",
        }
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::End)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Picks the operation to run next from the most recent transaction.
///
/// Falls back to [`Step::Balance`] for a freshly opened account.
pub fn route(account: &Account) -> Step {
    route_entry(account.last_entry())
}

pub fn route_entry(entry: Option<&Entry>) -> Step {
    match entry.map(Entry::kind) {
        Some(EntryKind::Deposit) => Step::Deposit,
        Some(EntryKind::Withdrawal) => Step::Withdraw,
        Some(EntryKind::Opened) | None => Step::Balance,
    }
}

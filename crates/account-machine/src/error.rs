use crate::routing::Step;
use crate::session::CommandKind;
use rust_decimal::Decimal;
use thiserror::Error;

/// Rejections raised by account mutations. The account is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Account holder name must not be empty.")]
    EmptyHolder,

    #[error("Opening balance must not be negative (got Rs. {amount}).")]
    NegativeOpeningBalance { amount: Decimal },

    #[error("Deposit amount must be positive (got Rs. {amount}).")]
    InvalidAmount { amount: Decimal },

    #[error("Deposit of Rs. {amount} would overflow the balance of Rs. {balance}.")]
    Overflow { balance: Decimal, amount: Decimal },

    #[error("Withdrawal amount must not be negative (got Rs. {amount}).")]
    NegativeWithdrawal { amount: Decimal },

    #[error("Insufficient funds for withdrawal: balance Rs. {balance}, requested Rs. {requested}.")]
    InsufficientFunds { balance: Decimal, requested: Decimal },
}

/// Failures of a graph walk over an account.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("{step} step failed: {source}")]
    Halted {
        step: Step,
        #[source]
        source: AccountError,
    },

    #[error("{step} step has no transaction to replay")]
    NothingToReplay { step: Step },

    #[error("no terminal step reached within {limit} steps")]
    StepLimit { limit: usize, visited: Vec<Step> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No account yet. Create one first.")]
    NoAccount,

    #[error("{0} requires an account holder name.")]
    MissingHolder(CommandKind),

    #[error("{0} requires an amount.")]
    MissingAmount(CommandKind),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

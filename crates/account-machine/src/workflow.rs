use crate::account::Account;
use crate::error::WorkflowError;
use crate::routing::{route, Step};
use rust_decimal::Decimal;
use tracing::debug;

/// Outcome of a walk that reached [`Step::End`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub visited: Vec<Step>,
    pub balance: Decimal,
    pub history: Vec<String>,
}

/// Walks the fixed account graph:
///
/// ```text
/// Start -> Balance -> route(account)
///            ^   |-- Deposit  -> Balance
///            |   |-- Withdraw -> Balance
///            |   `-- fallback -> History -> End
/// ```
///
/// Deposit and Withdraw replay the amount of the latest entry. Once any
/// transaction is logged, routing keeps choosing it again and History is
/// never reached; the walk then stops at `max_steps` with
/// [`WorkflowError::StepLimit`]. Changes made before a failure are kept.
#[derive(Debug, Clone, Copy)]
pub struct Workflow {
    max_steps: usize,
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_STEPS)
    }
}

impl Workflow {
    pub const DEFAULT_MAX_STEPS: usize = 16;

    pub const fn new(max_steps: usize) -> Self {
        Self { max_steps }
    }

    pub const fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn run(&self, account: &mut Account) -> Result<Run, WorkflowError> {
        let mut step = Step::Start;
        let mut visited = vec![step];
        let mut balance = account.balance();
        let mut history = Vec::new();

        while !step.is_final() {
            if visited.len() > self.max_steps {
                return Err(WorkflowError::StepLimit {
                    limit: self.max_steps,
                    visited,
                });
            }

            step = match step {
                Step::Start => Step::Balance,
                Step::Balance => {
                    balance = account.balance();
                    match route(account) {
                        Step::Balance => Step::History,
                        next => next,
                    }
                }
                Step::Deposit => {
                    let amount = replay_amount(account, step)?;
                    account
                        .deposit(amount)
                        .map_err(|source| WorkflowError::Halted { step, source })?;
                    Step::Balance
                }
                Step::Withdraw => {
                    let amount = replay_amount(account, step)?;
                    account
                        .withdraw(amount)
                        .map_err(|source| WorkflowError::Halted { step, source })?;
                    Step::Balance
                }
                Step::History => {
                    history = account.history();
                    Step::End
                }
                Step::End => Step::End,
            };

            debug!(%step, "workflow step");
            visited.push(step);
        }

        Ok(Run {
            visited,
            balance,
            history,
        })
    }
}

fn replay_amount(account: &Account, step: Step) -> Result<Decimal, WorkflowError> {
    account
        .last_entry()
        .map(|entry| entry.amount())
        .ok_or(WorkflowError::NothingToReplay { step })
}

pub mod account;
pub mod error;
pub mod routing;
pub mod session;
pub mod workflow;

use error::SessionError;
use session::{Command, Reply, Session};

/// Run a batch of commands through a fresh session and return every outcome
pub fn process_batch(
    commands: impl Iterator<Item = Command>,
) -> (Session, Vec<Result<Reply, SessionError>>) {
    let mut session = Session::default();
    let outcomes: Vec<_> = commands.map(|command| session.execute(command)).collect();

    (session, outcomes)
}

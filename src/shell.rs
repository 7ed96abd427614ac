use account_machine::account::Account;
use account_machine::session::{Command, CommandKind, HistoryRecord, Session};
use anyhow::{anyhow, bail, Context, Result};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::{debug, warn};

const HELP: &str = "\
Commands:
  create <holder> [amount]   open a new account (replaces the current one)
  deposit <amount>           add funds
  withdraw <amount>          take funds out
  balance                    show the current balance
  history                    list all transactions
  auto                       walk the Balance/Deposit/Withdraw/History graph
  help                       show this text
  quit                       leave";

/// One line of interactive input
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Help,
    Quit,
    Blank,
}

pub fn parse_line(line: &str) -> Result<Input> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Input::Blank);
    };
    let args: Vec<&str> = words.collect();

    let input = match verb.to_ascii_lowercase().as_str() {
        "create" => {
            let trailing = args
                .split_last()
                .filter(|(_, rest)| !rest.is_empty())
                .and_then(|(last, rest)| Some((rest, Decimal::from_str(last).ok()?)));
            let (holder, amount) = match trailing {
                Some((rest, amount)) => (rest.join(" "), Some(amount)),
                None => (args.join(" "), None),
            };

            Input::Command(Command {
                kind: CommandKind::Create,
                holder: (!holder.is_empty()).then_some(holder),
                amount,
            })
        }
        "deposit" => amount_command(CommandKind::Deposit, &args)?,
        "withdraw" => amount_command(CommandKind::Withdraw, &args)?,
        "balance" => Input::Command(Command::bare(CommandKind::Balance)),
        "history" => Input::Command(Command::bare(CommandKind::History)),
        "auto" => Input::Command(Command::bare(CommandKind::Auto)),
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => bail!("unknown command '{other}', type 'help' for a list"),
    };

    Ok(input)
}

fn amount_command(kind: CommandKind, args: &[&str]) -> Result<Input> {
    let amount = match args {
        [] => None,
        [amount] => Some(parse_amount(amount)?),
        _ => bail!("{kind} takes a single amount"),
    };

    Ok(Input::Command(Command {
        kind,
        holder: None,
        amount,
    }))
}

fn parse_amount(token: &str) -> Result<Decimal> {
    Decimal::from_str(token).map_err(|e| anyhow!("invalid amount '{token}': {e}"))
}

/// Read commands line by line until `quit` or end of input
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "Basic Bank Account Management. Type 'help' for commands.")?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;

        let command = match parse_line(&line) {
            Ok(Input::Command(command)) => command,
            Ok(Input::Help) => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            Ok(Input::Quit) => break,
            Ok(Input::Blank) => continue,
            Err(e) => {
                writeln!(output, "Error: {e}")?;
                continue;
            }
        };

        match session.execute(command) {
            Ok(reply) => writeln!(output, "{reply}")?,
            Err(e) => {
                warn!("Command rejected: {e}");
                writeln!(output, "Error: {e}")?;
            }
        }
    }

    output.flush().context("Failed to flush output")?;

    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub skipped: usize,
}

/// Replay a CSV script of `type,holder,amount` rows against the session
pub fn replay_script<R: io::Read>(session: &mut Session, script: R) -> Summary {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(script);

    let mut summary = Summary::default();

    for result in reader.deserialize() {
        let command: Command = match result {
            Ok(command) => command,
            Err(e) => {
                warn!("Failed to parse command: {e}");
                summary.skipped += 1;

                continue;
            }
        };

        match session.execute(command) {
            Ok(reply) => {
                debug!("{reply}");
                summary.processed += 1;
            }
            Err(e) => {
                warn!("Command rejected: {e}");
                summary.skipped += 1;
            }
        }
    }

    summary
}

/// Write the account's history as CSV
pub fn write_history<W: Write>(account: &Account, output: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(output);

    for record in HistoryRecord::from_account(account) {
        writer
            .serialize(&record)
            .context("Failed to serialize history")?;
    }

    writer.flush().context("Failed to flush history")?;

    Ok(())
}

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config::{self, AppConfig};
use crate::runtime::local_today;
use crate::service::calendar_message_service::render_line;
use crate::service::event_projector::get_special_events;

#[derive(Parser)]
#[command(name = "goonbot", version, about = "Community chat bot: birthdays, holidays and rats")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// KEY=VALUE config file. Falls back to $CONFIG_FILE.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Connect to Discord and serve commands (default).
    Serve(ServeArgs),
    /// Print the calendar for a date.
    Events(EventsArgs),
}

#[derive(clap::Args, Default)]
pub struct ServeArgs {
    /// Push the command list to Discord on connect. Only needed after commands change.
    #[arg(long)]
    pub sync_commands: bool,
}

#[derive(clap::Args)]
pub struct EventsArgs {
    /// Date to project from (YYYY-MM-DD). Defaults to today in BOT_TIMEZONE.
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Include events that already passed this year.
    #[arg(long)]
    pub all: bool,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

pub fn run_events(args: &EventsArgs, config: &AppConfig) -> anyhow::Result<()> {
    let today = match args.date {
        Some(date) => date,
        None => local_today(config::timezone(config)?),
    };
    let events = get_special_events(today, !args.all)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }
    if events.is_empty() {
        println!("Nothing left on the calendar this year.");
    }
    for event in &events {
        println!("{}", render_line(event, today));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_args_parse() {
        let cli = Cli::try_parse_from(["goonbot", "-vv", "events", "--date", "2023-11-22", "--json"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        let Some(Command::Events(args)) = cli.command else {
            panic!("expected events subcommand");
        };
        assert_eq!(args.date, NaiveDate::from_ymd_opt(2023, 11, 22));
        assert!(args.json);
        assert!(!args.all);
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["goonbot"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_syncs_commands_only_when_asked() {
        let cli = Cli::try_parse_from(["goonbot", "serve"]).unwrap();
        let Some(Command::Serve(args)) = cli.command else {
            panic!("expected serve subcommand");
        };
        assert!(!args.sync_commands);

        let cli = Cli::try_parse_from(["goonbot", "serve", "--sync-commands"]).unwrap();
        let Some(Command::Serve(args)) = cli.command else {
            panic!("expected serve subcommand");
        };
        assert!(args.sync_commands);
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(Cli::try_parse_from(["goonbot", "events", "--date", "2023-02-30"]).is_err());
    }
}

//! Bot command - record ground-truth bots

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use pacsocial_config::Config;

use crate::cmd::open_archive;

#[derive(Args, Debug)]
pub struct BotArgs {
    #[command(subcommand)]
    pub command: BotCommand,
}

#[derive(Subcommand, Debug)]
pub enum BotCommand {
    /// Mark a user id as a bot; re-adding updates the kill date
    Add {
        user_id: i64,

        /// Epoch seconds at which the bot was shut down
        #[arg(long)]
        kill_date: Option<i64>,
    },
}

pub async fn run(args: BotArgs, config: Config) -> Result<()> {
    let archive = open_archive(&config).await?;

    match args.command {
        BotCommand::Add { user_id, kill_date } => {
            archive
                .bots()
                .add(user_id, kill_date)
                .await
                .context("failed to record bot")?;
            println!("recorded bot {}", user_id);
        }
    }

    Ok(())
}

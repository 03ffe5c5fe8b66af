//! Team command - provision competition teams

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use pacsocial_config::Config;
use pacsocial_store::NewTeam;

use crate::cmd::open_archive;

#[derive(Args, Debug)]
pub struct TeamArgs {
    #[command(subcommand)]
    pub command: TeamCommand,
}

#[derive(Subcommand, Debug)]
pub enum TeamCommand {
    /// Create a team; the passcode is stored hashed
    Add {
        name: String,
        passcode: String,
    },

    /// List teams
    List,
}

pub async fn run(args: TeamArgs, config: Config) -> Result<()> {
    let archive = open_archive(&config).await?;

    match args.command {
        TeamCommand::Add { name, passcode } => {
            let team = archive
                .teams()
                .create(&NewTeam { name, passcode })
                .await
                .context("failed to create team")?;
            println!("created team {} ({})", team.name, team.id);
        }
        TeamCommand::List => {
            let teams = archive.teams().list().await.context("failed to list teams")?;
            if teams.is_empty() {
                println!("no teams");
            }
            for team in teams {
                println!("{:>4}  {}", team.id, team.name);
            }
        }
    }

    Ok(())
}

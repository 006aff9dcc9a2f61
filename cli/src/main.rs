use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use olive_grove::draft::{DraftAction, DraftStore};
use olive_grove::error::AppResult;
use olive_grove::model::entity::{Course, PreviewQuestion};
use olive_grove::topic;
use olive_grove::web::AuthenticatedUser;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(about = "CLI tool for checking course topics and question drafts offline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the topic a viewer would land on
    Resolve {
        /// Path to a course tree in the portal's JSON format
        #[arg(long)]
        course: PathBuf,
        /// Lesson, section or subsection id
        #[arg(long)]
        target: Option<String>,
    },

    /// Replay editor actions over a preview question
    Draft {
        /// Path to the preview question JSON
        #[arg(long)]
        preview: PathBuf,
        /// Path to a JSON array of actions, e.g. `[{"type": "DELETE_OPTION", "payload": "..."}]`
        #[arg(long)]
        actions: Option<PathBuf>,
    },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = std::fs::read(path)?;
    Ok(serde_json::from_slice(&raw)?)
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    match args.command {
        Commands::Resolve { course, target } => {
            let course: Course = read_json(&course)?;
            let selection = topic::resolve(Some(&course), target.as_deref());
            println!("{}", serde_json::to_string_pretty(&selection)?);
        }

        Commands::Draft { preview, actions } => {
            let preview: PreviewQuestion = read_json(&preview)?;
            let actions: Vec<DraftAction> = match actions {
                Some(path) => read_json(&path)?,
                None => vec![],
            };

            let actor = AuthenticatedUser::admin();
            let drafts = DraftStore::default();
            let mut session = drafts.open(&actor, preview).await;
            for action in actions {
                session = drafts.dispatch(&actor, session.id(), action).await?;
            }

            let question = session.question();
            let out = json!({
                "question": question,
                "submission": question.to_submission(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

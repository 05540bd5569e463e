use chrono::Utc;
use color_eyre::Result;
use daybook_core::records::DiaryEntry;

use crate::{cli::DiaryCommand, client::ApiClient, tasks::parse_date};

/// Execute a diary subcommand against the server. Diary entries have no
/// edit path; they are written once and deleted whole.
pub async fn handle(cmd: DiaryCommand, client: &ApiClient) -> Result<()> {
    match cmd {
        DiaryCommand::List => {
            let entries = client.list_diary().await?;
            if entries.is_empty() {
                println!("No diary entries yet. Add one with `daybook diary add <text>`.");
                return Ok(());
            }
            for entry in entries {
                println!("{} {} {}", entry.id, entry.date.format("%Y-%m-%d"), entry.text);
            }
        }
        DiaryCommand::Add { text, date } => {
            let date = match date.as_deref() {
                Some(s) => parse_date(s)?,
                None => Utc::now(),
            };
            let entry = client.create_diary(&DiaryEntry::new(text, date)).await?;
            println!("Added diary entry {}", entry.id);
        }
        DiaryCommand::Delete { id } => {
            client.delete_diary(id).await?;
            println!("Deleted diary entry {id}");
        }
    }

    Ok(())
}

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use color_eyre::Result;
use daybook_core::records::{Priority, TaskRecord};

use crate::{board::TaskBoard, cli::TaskCommand, client::ApiClient};

/// Execute a task subcommand against the server. Listing goes through the
/// same board projection the TUI uses, so the printed order matches it.
pub async fn handle(cmd: TaskCommand, client: &ApiClient) -> Result<()> {
    match cmd {
        TaskCommand::List => {
            let board = TaskBoard::new(client.list_tasks().await?);
            if board.tasks().is_empty() {
                println!("No tasks yet. Add one with `daybook task add <text>`.");
                return Ok(());
            }
            for task in board.visible() {
                println!("{} [{}] {}{}", task.id, priority_label(task), task.text, due_label(task));
            }
        }
        TaskCommand::Add {
            text,
            priority,
            date,
        } => {
            let priority = match priority.as_deref() {
                Some(s) => s.parse::<Priority>()?,
                None => Priority::default(),
            };
            let date = date.as_deref().map(parse_date).transpose()?;
            let task = client
                .create_task(&TaskRecord::new(text, priority, date))
                .await?;
            println!("Created task {}: {}", task.id, task.text);
        }
        TaskCommand::Edit { id, text, priority } => {
            let priority = priority.parse::<Priority>()?;
            let task = client.update_task(id, &text, priority).await?;
            println!("Updated task {}: [{}] {}", task.id, priority_label(&task), task.text);
        }
        TaskCommand::Delete { id } => {
            client.delete_task(id).await?;
            println!("Deleted task {id}");
        }
    }

    Ok(())
}

fn priority_label(task: &TaskRecord) -> String {
    task.priority
        .map(|p| p.to_string())
        .unwrap_or_else(|| "none".to_string())
}

fn due_label(task: &TaskRecord) -> String {
    task.date
        .map(|d| format!(" (due {})", d.format("%Y-%m-%d")))
        .unwrap_or_default()
}

/// Parse a YYYY-MM-DD argument into midnight UTC.
pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_dates_as_midnight_utc() {
        let parsed = parse_date("2026-08-25").expect("parse");
        assert_eq!(parsed.to_rfc3339(), "2026-08-25T00:00:00+00:00");
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(parse_date("tomorrow").is_err());
    }
}

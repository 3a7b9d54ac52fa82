use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Task;
use crate::store::lines::LineStore;

pub fn add(store: &mut LineStore, text: &str) -> Result<CmdResult> {
    let task = Task::parse(text)?;
    store.append(&task)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Task added: {}", task)));
    Ok(result.with_tasks(vec![task.as_str().to_string()]))
}

pub fn list(store: &LineStore) -> Result<CmdResult> {
    let tasks = store.read_all()?;
    let mut result = CmdResult::default();
    if tasks.is_empty() {
        result.add_message(CmdMessage::info("No tasks yet."));
    }
    Ok(result.with_tasks(tasks))
}

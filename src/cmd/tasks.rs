use crate::data::{DirStorage, TodoData, TodoList};
use anyhow::Result;
use std::path::Path;

pub fn run(dir: &Path, add: Option<&str>) -> Result<()> {
    let mut list = TodoList::open(Box::new(DirStorage::new(dir)));
    if let Some(text) = add {
        if !list.add(text)? {
            println!("Nothing to add: task text is blank.");
        }
    }
    write_tasks(&list.data, &mut std::io::stdout())
}

pub(crate) fn write_tasks<W: std::io::Write>(data: &TodoData, out: &mut W) -> Result<()> {
    writeln!(out, "Tasks {}/{}", data.completed_count(), data.todos.len())?;
    writeln!(out, "---")?;
    if data.todos.is_empty() {
        writeln!(out, "  no tasks yet")?;
    }
    for t in &data.todos {
        let mark = if t.completed { "x" } else { " " };
        writeln!(out, "  [{}] {}", mark, t.text)?;
    }
    Ok(())
}

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Read and deserialize a JSON snapshot file.
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid {what} JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use tally_core::entities::Task;
    use tally_core::enums::TaskState;

    use super::read_json;

    #[test]
    fn reads_task_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(
            &path,
            r#"[{"state": "blocked", "due_date": null, "estimate_hours": 3.0, "priority": "high"}]"#,
        )
        .unwrap();

        let tasks: Vec<Task> = read_json(&path, "tasks").unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].state, TaskState::Blocked);
    }

    #[test]
    fn bad_json_names_what_and_where() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_json::<serde_json::Value>(&path, "project").unwrap_err();
        assert!(err.to_string().starts_with("invalid project JSON in"));
    }
}

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceData {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectData {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskData {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    pub start: String,
    pub end: Option<String>,
    pub duration: Option<String>,
}

impl TimeInterval {
    // Server timestamps are offset-naive but semantically UTC; they need an
    // explicit offset before they can be parsed as RFC 3339.
    pub fn normalize(&mut self) {
        normalize_timestamp(&mut self.start);
        if let Some(end) = self.end.as_mut() {
            normalize_timestamp(end);
        }
    }
}

fn normalize_timestamp(value: &mut String) {
    if !has_utc_offset(value) {
        value.push_str("+00:00");
    }
}

fn has_utc_offset(value: &str) -> bool {
    if value.ends_with('Z') || value.ends_with('z') {
        return true;
    }
    let time_part = value.find('T').unwrap_or(0);
    value
        .rfind(['+', '-'])
        .map(|index| index > time_part)
        .unwrap_or(false)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryData {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub workspace_id: Option<String>,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub time_interval: TimeInterval,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub active_workspace: Option<String>,
    #[serde(default)]
    pub settings: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

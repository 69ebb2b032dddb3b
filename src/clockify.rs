use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{ApiError, Session};
use crate::models::{ProjectData, TaskData, TimeEntryData, UserData, WorkspaceData};

/// Root of the resource graph: one authenticated session, navigated on
/// demand. Nothing is cached; every call below performs its own round trip.
pub struct Clockify {
    session: Session,
}

impl Clockify {
    pub fn new(api_key: &str) -> Self {
        Self {
            session: Session::new(api_key),
        }
    }

    pub fn workspaces(&self) -> Result<Vec<Workspace>, ApiError> {
        let response = self.session.get("/workspaces", &[])?;
        let list: Vec<WorkspaceData> = decode(response)?;
        Ok(list
            .into_iter()
            .map(|data| Workspace {
                session: self.session.clone(),
                data,
            })
            .collect())
    }

    // Linear scan; the workspace list is small.
    pub fn workspace_by_id(&self, workspace_id: &str) -> Result<Option<Workspace>, ApiError> {
        Ok(self
            .workspaces()?
            .into_iter()
            .find(|workspace| workspace.data.id == workspace_id))
    }

    pub fn user_info(&self) -> Result<User, ApiError> {
        let response = self.session.get("/user", &[])?;
        let data: UserData = decode(response)?;
        Ok(User {
            session: self.session.clone(),
            data,
        })
    }
}

#[derive(Clone)]
pub struct Workspace {
    session: Session,
    pub data: WorkspaceData,
}

impl Workspace {
    pub fn projects(&self, filters: &[(&str, &str)]) -> Result<Vec<Project>, ApiError> {
        let path = format!("/workspaces/{}/projects", self.data.id);
        let response = self.session.get(&path, filters)?;
        let list: Vec<ProjectData> = decode(response)?;
        Ok(list
            .into_iter()
            .map(|data| Project {
                session: self.session.clone(),
                workspace: self.data.clone(),
                data,
            })
            .collect())
    }

    pub fn project_by_id(&self, project_id: &str) -> Result<Option<Project>, ApiError> {
        let path = format!("/workspaces/{}/projects/{}", self.data.id, project_id);
        let Some(response) = self.session.get_optional(&path)? else {
            return Ok(None);
        };
        let data: ProjectData = decode(response)?;
        Ok(Some(Project {
            session: self.session.clone(),
            workspace: self.data.clone(),
            data,
        }))
    }
}

#[derive(Clone)]
pub struct Project {
    session: Session,
    /// By-value copy of the parent record; holding it does not keep the
    /// parent `Workspace` alive.
    pub workspace: WorkspaceData,
    pub data: ProjectData,
}

impl Project {
    pub fn tasks(&self, filters: &[(&str, &str)]) -> Result<Vec<Task>, ApiError> {
        let path = format!(
            "/workspaces/{}/projects/{}/tasks",
            self.workspace.id, self.data.id
        );
        let response = self.session.get(&path, filters)?;
        let list: Vec<TaskData> = decode(response)?;
        Ok(list
            .into_iter()
            .map(|data| Task {
                workspace: self.workspace.clone(),
                project: self.data.clone(),
                data,
            })
            .collect())
    }

    pub fn task_by_id(&self, task_id: &str) -> Result<Option<Task>, ApiError> {
        let path = format!(
            "/workspaces/{}/projects/{}/tasks/{}",
            self.workspace.id, self.data.id, task_id
        );
        let Some(response) = self.session.get_optional(&path)? else {
            return Ok(None);
        };
        let data: TaskData = decode(response)?;
        Ok(Some(Task {
            workspace: self.workspace.clone(),
            project: self.data.clone(),
            data,
        }))
    }
}

#[derive(Debug, Clone)]
pub struct Task {
    pub workspace: WorkspaceData,
    pub project: ProjectData,
    pub data: TaskData,
}

pub struct User {
    session: Session,
    pub data: UserData,
}

impl User {
    /// Fetches the user's time entries, defaulting to the active workspace
    /// when none is given. Entries come back in server order.
    pub fn time_entries_on_workspace(
        &self,
        workspace: Option<&Workspace>,
    ) -> Result<Vec<TimeEntry>, ApiError> {
        let workspace_id = match workspace {
            Some(workspace) => workspace.data.id.clone(),
            None => self
                .data
                .active_workspace
                .clone()
                .ok_or_else(|| ApiError::Parse("user has no active workspace".to_string()))?,
        };
        let path = format!(
            "/workspaces/{}/user/{}/time-entries",
            workspace_id, self.data.id
        );
        let response = self.session.get(&path, &[])?;
        let list: Vec<TimeEntryData> = decode(response)?;
        Ok(list
            .into_iter()
            .map(|data| TimeEntry::new(self.session.clone(), data))
            .collect())
    }
}

pub struct TimeEntry {
    session: Session,
    pub data: TimeEntryData,
}

impl TimeEntry {
    pub(crate) fn new(session: Session, mut data: TimeEntryData) -> Self {
        data.time_interval.normalize();
        Self { session, data }
    }

    /// Resolves the task this entry records time against through three chained
    /// lookups: workspace by id, project by id, task by id. Any missing hop
    /// (e.g. a since-deleted project) resolves to `None`.
    pub fn linked_task(&self) -> Result<Option<Task>, ApiError> {
        let (Some(workspace_id), Some(project_id), Some(task_id)) = (
            self.data.workspace_id.as_deref(),
            self.data.project_id.as_deref(),
            self.data.task_id.as_deref(),
        ) else {
            return Ok(None);
        };
        let root = Clockify {
            session: self.session.clone(),
        };
        let Some(workspace) = root.workspace_by_id(workspace_id)? else {
            return Ok(None);
        };
        let Some(project) = workspace.project_by_id(project_id)? else {
            return Ok(None);
        };
        project.task_by_id(task_id)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|err| ApiError::Parse(err.to_string()))
}

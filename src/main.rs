use std::error::Error;

mod api;
mod clockify;
mod menu;
mod models;
mod report;
mod storage;
mod table;

use api::ApiError;
use clockify::{Clockify, Project, Workspace};
use menu::Choice;
use storage::ConfigPaths;

fn main() -> Result<(), Box<dyn Error>> {
    let paths = storage::resolve_config_paths().ok_or("Home directory not found")?;

    let mut key = match storage::read_key(&paths) {
        Some(key) => {
            println!("Auth-key found: {}", paths.file.display());
            key
        }
        None => obtain_key(&paths, "No auth-key found")?,
    };

    while !api::validate_key(&key)? {
        key = obtain_key(&paths, "Stored auth-key is not valid")?;
    }

    let client = Clockify::new(&key);

    let user = client.user_info()?;
    if !user.data.name.is_empty() {
        println!("\nWelcome back, {}", user.data.name);
    }

    workspace_menu(&client)?;

    if !user.data.name.is_empty() {
        println!("\nSee you soon, {}, bye!", user.data.name);
    }
    Ok(())
}

fn obtain_key(paths: &ConfigPaths, title: &str) -> Result<String, Box<dyn Error>> {
    println!("{title}");
    for _ in 0..menu::MAX_INPUT_RETRIES {
        if let Some(key) = menu::prompt("Please enter your auth-key") {
            storage::write_key(paths, &key)?;
            println!("\nSaved into {}", paths.file.display());
            return Ok(key);
        }
    }
    Err("No auth-key provided".into())
}

fn workspace_menu(client: &Clockify) -> Result<(), ApiError> {
    loop {
        let workspaces = client.workspaces()?;
        let names: Vec<String> = workspaces
            .iter()
            .map(|workspace| workspace.data.name.clone())
            .collect();

        match menu::choose(
            "Select workspace",
            "Workspace number",
            &names,
            "empty input to exit",
        ) {
            Choice::Back => return Ok(()),
            Choice::Item(index) => {
                if let Err(err) = project_menu(client, &workspaces[index]) {
                    println!("\n{err}");
                }
            }
        }
    }
}

fn project_menu(client: &Clockify, workspace: &Workspace) -> Result<(), ApiError> {
    loop {
        println!("\nCurrent workspace \"{}\"", workspace.data.name);

        let projects = workspace.projects(&[])?;
        let names: Vec<String> = projects
            .iter()
            .map(|project| project.data.name.clone())
            .collect();

        match menu::choose(
            "Select project",
            "Project number",
            &names,
            "empty input to return back",
        ) {
            Choice::Back => return Ok(()),
            Choice::Item(index) => {
                if let Err(err) = action_menu(client, &projects[index]) {
                    println!("\n{err}");
                }
            }
        }
    }
}

fn action_menu(client: &Clockify, project: &Project) -> Result<(), ApiError> {
    let actions = vec!["List tasks".to_string(), "Total report".to_string()];
    loop {
        println!(
            "\nCurrent workspace \"{}\", project \"{}\"",
            project.workspace.name, project.data.name
        );

        match menu::choose(
            "Select action",
            "Action number",
            &actions,
            "empty input to return back",
        ) {
            Choice::Back => return Ok(()),
            Choice::Item(0) => {
                let tasks = project.tasks(&[])?;
                let names: Vec<String> = tasks.into_iter().map(|task| task.data.name).collect();
                print!("\n{}", table::render_task_list(&names));
            }
            Choice::Item(_) => {
                let user = client.user_info()?;
                let entries = user.time_entries_on_workspace(None)?;
                let rows = report::build_report(&entries, |entry| entry.linked_task())?;
                print!("\n{}", table::render_report(&rows));
            }
        }
    }
}

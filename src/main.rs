use colored::Colorize;
use quill::infra::ProjectError;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = quill::run() {
        match err.downcast_ref::<ProjectError>() {
            Some(ProjectError::NotInitialized { .. }) => {
                println!(">\t{}", "Project does not exist.".red());
            }
            _ => eprintln!("error: {err:#}"),
        }
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

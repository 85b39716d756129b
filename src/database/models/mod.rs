pub mod project;
pub mod task;

pub use project::{CreateProject, DeleteConfirmation, NewProject, Project, ProjectPatch, UpdateProject};
pub use task::{CreateTask, InvalidStatus, NewTask, Task, TaskPatch, TaskStatus, UpdateTask};

/// Returns the value untouched when it carries text, `None` when blank
/// (whitespace only) or absent.
///
/// Update payloads use this to implement partial overwrite: a blank field
/// keeps the stored value instead of clearing it.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_treated_as_absent() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(Some(" Launch ")), Some(" Launch "));
    }
}

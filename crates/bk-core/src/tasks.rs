//! Pure operations over a user's task collection. All of them are
//! copy-on-write: the input slice is never mutated, so callers can keep the
//! previous view around and the functions stay trivially testable.

use crate::error::TaskError;
use crate::types::{StudyTask, TaskId};

/// Returns a new collection with exactly the task `id` flipped. The input
/// is left untouched; an absent id is `TaskError::NotFound`.
pub fn toggle_completion(tasks: &[StudyTask], id: &TaskId) -> Result<Vec<StudyTask>, TaskError> {
    if !tasks.iter().any(|task| &task.id == id) {
        return Err(TaskError::NotFound);
    }
    Ok(tasks
        .iter()
        .map(|task| {
            let mut task = task.clone();
            if &task.id == id {
                task.completed = !task.completed;
            }
            task
        })
        .collect())
}

/// Tasks still to do, in input order.
pub fn incomplete_tasks(tasks: &[StudyTask]) -> Vec<StudyTask> {
    tasks
        .iter()
        .filter(|task| !task.completed)
        .cloned()
        .collect()
}

/// Completed tasks grouped by subject, subjects in first-seen order.
/// Incomplete tasks never appear in any group.
pub fn completed_by_subject(tasks: &[StudyTask]) -> Vec<(String, Vec<StudyTask>)> {
    let mut groups: Vec<(String, Vec<StudyTask>)> = Vec::new();
    for task in tasks.iter().filter(|task| task.completed) {
        match groups.iter_mut().find(|(subject, _)| subject == &task.subject) {
            Some((_, members)) => members.push(task.clone()),
            None => groups.push((task.subject.clone(), vec![task.clone()])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    fn task(subject: &str, topic: &str, completed: bool) -> StudyTask {
        StudyTask {
            id: TaskId::generate(),
            user_id: UserId::new("u1"),
            subject: subject.to_string(),
            topic: topic.to_string(),
            completed,
        }
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let tasks = vec![task("Math", "Algebra", false), task("English", "Vocab", true)];
        let id = tasks[0].id.clone();

        let once = toggle_completion(&tasks, &id).unwrap();
        assert!(once[0].completed);
        assert!(once[1].completed); // untouched

        let twice = toggle_completion(&once, &id).unwrap();
        assert_eq!(twice, tasks);
    }

    #[test]
    fn toggle_missing_id_leaves_input_unchanged() {
        let tasks = vec![task("Math", "Algebra", false)];
        let before = tasks.clone();
        let err = toggle_completion(&tasks, &TaskId::generate()).unwrap_err();
        assert!(matches!(err, TaskError::NotFound));
        assert_eq!(tasks, before);
    }

    #[test]
    fn incomplete_excludes_completed() {
        let tasks = vec![
            task("Math", "Algebra", false),
            task("Math", "Geometry", true),
            task("Science", "Optics", false),
        ];
        let open = incomplete_tasks(&tasks);
        assert_eq!(open.len(), 2);
        assert!(open.iter().all(|task| !task.completed));
    }

    #[test]
    fn completed_groups_keep_first_seen_subject_order() {
        let tasks = vec![
            task("Math", "Algebra", true),
            task("English", "Vocab", true),
            task("Math", "Geometry", true),
            task("Science", "Optics", false),
        ];
        let groups = completed_by_subject(&tasks);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Math");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "English");
    }
}

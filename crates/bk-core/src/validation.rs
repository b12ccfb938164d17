use crate::error::{LogError, TaskError};
use crate::types::{NewStudyLog, NewStudyTask};

pub fn validate_new_log(input: &NewStudyLog) -> Result<(), LogError> {
    if input.content.trim().is_empty() {
        return Err(LogError::InvalidInput {
            message: "content must not be blank".to_string(),
        });
    }
    if input.time <= 0 {
        return Err(LogError::InvalidInput {
            message: format!("duration must be positive minutes, got {}", input.time),
        });
    }
    Ok(())
}

pub fn validate_new_task(input: &NewStudyTask) -> Result<(), TaskError> {
    if input.subject.trim().is_empty() {
        return Err(TaskError::InvalidInput {
            message: "subject must not be blank".to_string(),
        });
    }
    if input.topic.trim().is_empty() {
        return Err(TaskError::InvalidInput {
            message: "topic must not be blank".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    #[test]
    fn rejects_blank_and_non_positive_logs() {
        let mut input = NewStudyLog {
            user_id: UserId::new("u1"),
            user_name: None,
            subject: None,
            content: "read chapter 3".to_string(),
            time: 25,
        };
        assert!(validate_new_log(&input).is_ok());

        input.content = "   ".to_string();
        assert!(validate_new_log(&input).is_err());

        input.content = "read chapter 3".to_string();
        input.time = 0;
        assert!(validate_new_log(&input).is_err());
    }

    #[test]
    fn rejects_blank_task_fields() {
        let input = NewStudyTask {
            user_id: UserId::new("u1"),
            subject: "Math".to_string(),
            topic: String::new(),
        };
        assert!(validate_new_task(&input).is_err());

        let input = NewStudyTask {
            topic: "Algebra".to_string(),
            subject: " ".to_string(),
            ..input
        };
        assert!(validate_new_task(&input).is_err());
    }
}

use crate::domain::errors::DomainError;

const CNT_AUDIT_PREV_HASH: &str = "audit_logs_prev_hash_key";
const CNT_AUDIT_HASH: &str = "audit_logs_immutable_hash_key";
const CNT_NOTIFICATION_PKEY: &str = "notifications_pkey";
const CNT_NOTIFICATION_STATUS: &str = "notifications_status_chk";
const CNT_NOTIFICATION_PRIORITY: &str = "notifications_priority_chk";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_AUDIT_PREV_HASH => {
                        DomainError::Conflict("audit chain head already extended".into())
                    }
                    CNT_AUDIT_HASH => DomainError::Conflict("duplicate audit entry hash".into()),
                    CNT_NOTIFICATION_PKEY => {
                        DomainError::Conflict("notification already exists".into())
                    }
                    CNT_NOTIFICATION_STATUS => {
                        DomainError::Validation("invalid notification status".into())
                    }
                    CNT_NOTIFICATION_PRIORITY => {
                        DomainError::Validation("invalid notification priority".into())
                    }
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

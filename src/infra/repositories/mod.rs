pub mod postgres_event_repo;
pub mod postgres_job_repo;
pub mod postgres_participant_repo;
pub mod sqlite_event_repo;
pub mod sqlite_job_repo;
pub mod sqlite_participant_repo;

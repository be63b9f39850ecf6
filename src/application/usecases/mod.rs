pub mod execute_broadcast;
pub mod manage_jobs;
pub mod submit_broadcast;

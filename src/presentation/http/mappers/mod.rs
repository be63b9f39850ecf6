use crate::{
    domain::models::{BroadcastPayload, ScheduledJob, TaskKind},
    presentation::http::responses::JobDto,
};

pub fn map_job(job: &ScheduledJob) -> JobDto {
    let message_text = match job.task.kind {
        TaskKind::Broadcast => job
            .task
            .decode::<BroadcastPayload>()
            .ok()
            .map(|payload| payload.message_text),
    };

    JobDto {
        job_id: job.job_id.0,
        kind: job.task.kind.as_str().to_string(),
        message_text,
        due_time: job.due_time,
        created_at: job.created_at,
    }
}

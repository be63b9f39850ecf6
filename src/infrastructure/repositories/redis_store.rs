use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::{Client, aio::MultiplexedConnection};
use tracing::warn;

use crate::domain::{
    models::{JobId, ScheduledJob},
    repositories::JobStore,
};

/// Job store laid out as a hash of serialized jobs plus a sorted set of run
/// times, both under one namespace so several services can share a database.
pub struct RedisJobStore {
    conn: MultiplexedConnection,
    keys: JobKeys,
}

struct JobKeys {
    jobs: String,
    run_times: String,
}

impl JobKeys {
    fn new(namespace: &str) -> Self {
        Self {
            jobs: format!("{namespace}:jobs"),
            run_times: format!("{namespace}:run_times"),
        }
    }
}

impl RedisJobStore {
    pub async fn connect(redis_url: &str, namespace: &str) -> anyhow::Result<Self> {
        let client = Client::open(redis_url).context("invalid redis url")?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .context("failed to connect to redis")?;
        Ok(Self {
            conn,
            keys: JobKeys::new(namespace),
        })
    }

    // Clones share the underlying socket.
    fn connection(&self) -> MultiplexedConnection {
        self.conn.clone()
    }

    async fn load(
        &self,
        conn: &mut MultiplexedConnection,
        ids: Vec<String>,
    ) -> anyhow::Result<Vec<ScheduledJob>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<Option<String>> = redis::cmd("HMGET")
            .arg(&self.keys.jobs)
            .arg(&ids)
            .query_async(conn)
            .await?;

        let loaded = decode_records(ids, records);
        if !loaded.corrupt.is_empty() {
            let purged = redis::pipe()
                .atomic()
                .hdel(&self.keys.jobs, &loaded.corrupt)
                .ignore()
                .zrem(&self.keys.run_times, &loaded.corrupt)
                .ignore()
                .query_async::<_, ()>(conn)
                .await;
            if let Err(err) = purged {
                warn!(error = ?err, "failed to purge corrupt job records");
            }
        }
        Ok(loaded.jobs)
    }
}

struct LoadedJobs {
    jobs: Vec<ScheduledJob>,
    corrupt: Vec<String>,
}

/// Pairs ids with their HMGET records. Undecodable records are reported
/// separately so one bad entry cannot hide the rest.
fn decode_records(ids: Vec<String>, records: Vec<Option<String>>) -> LoadedJobs {
    let mut loaded = LoadedJobs {
        jobs: Vec::with_capacity(ids.len()),
        corrupt: Vec::new(),
    };
    for (id, record) in ids.into_iter().zip(records) {
        // Removed between the two reads.
        let Some(record) = record else {
            continue;
        };
        match decode(&record) {
            Ok(job) => loaded.jobs.push(job),
            Err(err) => {
                warn!(job_id = %id, error = ?err, "dropping corrupt job record");
                loaded.corrupt.push(id);
            }
        }
    }
    loaded
}

fn decode(record: &str) -> anyhow::Result<ScheduledJob> {
    serde_json::from_str(record).context("corrupt job record")
}

#[async_trait]
impl JobStore for RedisJobStore {
    async fn add(&self, job: &ScheduledJob) -> anyhow::Result<()> {
        let record = serde_json::to_string(job)?;
        let id = job.job_id.to_string();
        let mut conn = self.connection();
        redis::pipe()
            .atomic()
            .hset(&self.keys.jobs, &id, record)
            .ignore()
            .zadd(&self.keys.run_times, &id, job.due_time.timestamp_millis())
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .context("failed to store job")?;
        Ok(())
    }

    async fn get(&self, job_id: &JobId) -> anyhow::Result<Option<ScheduledJob>> {
        let mut conn = self.connection();
        let record: Option<String> = redis::cmd("HGET")
            .arg(&self.keys.jobs)
            .arg(job_id.to_string())
            .query_async(&mut conn)
            .await?;
        record.as_deref().map(decode).transpose()
    }

    async fn remove(&self, job_id: &JobId) -> anyhow::Result<bool> {
        let id = job_id.to_string();
        let mut conn = self.connection();
        let (removed, _): (i64, i64) = redis::pipe()
            .atomic()
            .hdel(&self.keys.jobs, &id)
            .zrem(&self.keys.run_times, &id)
            .query_async(&mut conn)
            .await
            .context("failed to remove job")?;
        Ok(removed > 0)
    }

    async fn due_jobs(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<ScheduledJob>> {
        let mut conn = self.connection();
        let ids: Vec<String> = redis::cmd("ZRANGEBYSCORE")
            .arg(&self.keys.run_times)
            .arg("-inf")
            .arg(now.timestamp_millis())
            .query_async(&mut conn)
            .await?;
        self.load(&mut conn, ids).await
    }

    async fn pending(&self) -> anyhow::Result<Vec<ScheduledJob>> {
        let mut conn = self.connection();
        let ids: Vec<String> = redis::cmd("ZRANGE")
            .arg(&self.keys.run_times)
            .arg(0)
            .arg(-1)
            .query_async(&mut conn)
            .await?;
        self.load(&mut conn, ids).await
    }
}

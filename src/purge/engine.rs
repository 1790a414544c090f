//! Batch deletion engine
//!
//! Fans a fixed set of item ids out across a bounded pool of workers, each
//! invoking the agent once per id, and fans completion events back in over a
//! single channel. Per-item failures never abort the batch.

use super::timestamp;
use crate::agent::Agent;
use std::sync::Arc;
use tokio::{
    sync::{Mutex, mpsc},
    task,
};

/// Signal that one delete attempt finished, regardless of outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub id: String,
}

/// Run a delete for every id with at most `batch` invocations in flight
///
/// The returned channel yields exactly one [`Completion`] per id, in arrival
/// order, and closes once every worker has finished. Not restartable.
#[must_use]
pub fn run(
    agent: &Agent,
    ids: Vec<String>,
    batch: usize,
    permanent: bool,
) -> mpsc::Receiver<Completion> {
    let capacity = ids.len().max(1);
    let (job_tx, job_rx) = mpsc::channel(capacity);
    let (completion_tx, completion_rx) = mpsc::channel(capacity);

    // Pre-load the whole batch and close the queue; workers observe
    // end-of-input once it is drained. Capacity equals the job count so the
    // queue can never be full here.
    for id in ids {
        if job_tx.try_send(id).is_err() {
            break;
        }
    }
    drop(job_tx);

    // Jobs are delivered to exactly one worker each: the receiver is shared
    // behind a lock that is held only while pulling the next id.
    let jobs = Arc::new(Mutex::new(job_rx));

    let agent = agent.clone();
    task::spawn(async move {
        let mut workers = Vec::with_capacity(batch);
        for _ in 0..batch {
            workers.push(task::spawn(worker(
                agent.clone(),
                Arc::clone(&jobs),
                completion_tx.clone(),
                permanent,
            )));
        }
        drop(completion_tx);

        // Join barrier: the completion channel closes only after the last
        // worker has dropped its sender, so the consumer terminates
        // deterministically.
        for handle in workers {
            if let Err(e) = handle.await {
                eprintln!("{} - delete worker panicked: {e}", timestamp());
            }
        }
    });

    completion_rx
}

async fn worker(
    agent: Agent,
    jobs: Arc<Mutex<mpsc::Receiver<String>>>,
    completions: mpsc::Sender<Completion>,
    permanent: bool,
) {
    loop {
        // Release the queue lock before awaiting the subprocess
        let job = { jobs.lock().await.recv().await };
        let Some(id) = job else {
            break;
        };

        if let Err(e) = agent.delete_item(&id, permanent).await {
            eprintln!("{} - failed to delete item {id}: {e}", timestamp());
        }

        // One completion per job, success or not. A closed channel means the
        // consumer is gone and there is nobody left to account for.
        if completions.send(Completion { id }).await.is_err() {
            break;
        }
    }
}

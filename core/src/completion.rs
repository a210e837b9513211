//! Serial context on which request completions run.
//!
//! # Design
//! A single named thread drains a channel of boxed jobs in submission order,
//! so completions from concurrent calls never interleave. Handles are cheap
//! clones of the sender; the thread exits once every handle is dropped and
//! the channel is empty. A panicking job is caught and logged so later jobs
//! still run.

use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;

use crossbeam_channel::{unbounded, Sender};
use tracing::warn;

type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Clone)]
pub struct CompletionQueue {
    sender: Sender<Job>,
}

impl CompletionQueue {
    /// Spawn the completion thread.
    pub fn spawn() -> io::Result<Self> {
        let (sender, receiver) = unbounded::<Job>();
        thread::Builder::new()
            .name("gallery-completion".to_string())
            .spawn(move || {
                for job in receiver {
                    if catch_unwind(AssertUnwindSafe(job)).is_err() {
                        warn!("completion panicked");
                    }
                }
            })?;
        Ok(Self { sender })
    }

    /// Queue `job` behind every job submitted before it.
    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.sender.send(Box::new(job)).is_err() {
            warn!("completion thread is gone, dropping completion");
        }
    }
}

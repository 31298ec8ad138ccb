//! Fixed-size worker pool for blocking store work.
//!
//! The pool is a permit count, not a set of threads: a holder of a
//! [`WorkerPermit`] runs its job with `tokio::task::spawn_blocking`, so at
//! most `size` blocking jobs are in flight at once.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;

use crate::error::StoreError;

/// Number of workers used when no size is configured.
pub const DEFAULT_WORKERS: usize = 4;

/// Bounded pool of blocking workers on the current tokio runtime.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    runtime: Handle,
    size: usize,
}

/// A reserved worker slot. Released when dropped.
#[derive(Debug)]
pub struct WorkerPermit {
    _permit: OwnedSemaphorePermit,
    runtime: Handle,
}

impl WorkerPool {
    /// Create a pool of `size` workers (at least one) on the current runtime.
    pub fn new(size: usize) -> Result<Self, StoreError> {
        let runtime = Handle::try_current().map_err(|_| StoreError::NoRuntime)?;
        let size = size.max(1);
        Ok(Self {
            permits: Arc::new(Semaphore::new(size)),
            runtime,
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of workers not currently reserved.
    pub fn idle(&self) -> usize {
        self.permits.available_permits()
    }

    /// Wait for a free worker.
    pub async fn acquire(&self) -> Result<WorkerPermit, StoreError> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| StoreError::Closed)?;
        Ok(WorkerPermit {
            _permit: permit,
            runtime: self.runtime.clone(),
        })
    }

    /// Spawn a task on the pool's runtime.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: std::future::Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.runtime.spawn(future)
    }
}

impl WorkerPermit {
    /// Run `job` on a blocking thread, holding this worker until it returns.
    pub fn run<F, R>(self, job: F) -> JoinHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let runtime = self.runtime.clone();
        runtime.spawn_blocking(move || {
            let _worker = self;
            job()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_outside_runtime_fails() {
        assert!(matches!(WorkerPool::new(4), Err(StoreError::NoRuntime)));
    }

    #[tokio::test]
    async fn size_is_at_least_one() {
        let pool = WorkerPool::new(0).unwrap();
        assert_eq!(pool.size(), 1);
        assert_eq!(pool.idle(), 1);
    }

    #[tokio::test]
    async fn permit_is_held_until_job_finishes() {
        let pool = WorkerPool::new(2).unwrap();
        let permit = pool.acquire().await.unwrap();
        assert_eq!(pool.idle(), 1);

        let out = permit.run(|| 40 + 2).await.unwrap();
        assert_eq!(out, 42);
        assert_eq!(pool.idle(), 2);
    }
}

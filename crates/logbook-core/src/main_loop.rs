//! Main loop: the caller-owned context that store callbacks are delivered on.
//!
//! Whoever issues `fetch_all` owns a [`MainLoop`] and hands a
//! [`MainLoopHandle`] to the store. Workers never run callbacks themselves;
//! they post them here and the owner runs them when it pumps the loop with
//! [`MainLoop::run_pending`], [`MainLoop::turn`] or [`MainLoop::run_until`].

use tokio::sync::{mpsc, oneshot};

/// A callback queued for the loop owner.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Callback queue drained by the task or thread that owns it.
pub struct MainLoop {
    tx: mpsc::UnboundedSender<Task>,
    rx: mpsc::UnboundedReceiver<Task>,
}

/// Cloneable sender side of a [`MainLoop`].
#[derive(Clone)]
pub struct MainLoopHandle {
    tx: mpsc::UnboundedSender<Task>,
}

impl MainLoop {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn handle(&self) -> MainLoopHandle {
        MainLoopHandle {
            tx: self.tx.clone(),
        }
    }

    /// Run every task already queued without waiting. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    /// Wait for the next task and run it.
    pub async fn turn(&mut self) {
        if let Some(task) = self.rx.recv().await {
            task();
        }
    }

    /// Keep running posted tasks until `rx` resolves, then return its value.
    ///
    /// Returns `None` if the sender was dropped without sending.
    pub async fn run_until<T>(&mut self, mut rx: oneshot::Receiver<T>) -> Option<T> {
        loop {
            tokio::select! {
                biased;
                res = &mut rx => return res.ok(),
                Some(task) = self.rx.recv() => task(),
            }
        }
    }
}

impl Default for MainLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl MainLoopHandle {
    /// Queue `task` to run on the owner's context.
    pub fn post(&self, task: Task) {
        if self.tx.send(task).is_err() {
            tracing::warn!("main loop is gone; dropping callback");
        }
    }
}

impl std::fmt::Debug for MainLoopHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainLoopHandle")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

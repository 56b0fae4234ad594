//! Shutdown coordination for the gateway.
//!
//! `main` owns one [`Shutdown`] and hands a [`ShutdownSignal`] to
//! `HttpServer::run`. The signal task triggers on SIGINT/SIGTERM, after which
//! axum stops accepting connections and drains requests already in flight,
//! including their pending upstream calls. Integration tests use the same
//! handle to stop each gateway they start.
//!
//! # Design Decisions
//! - The trigger is a level, not an event: a signal taken after the trigger
//!   resolves immediately, so a server that starts late never misses it
//! - Dropping the coordinator counts as a trigger

use tokio::sync::watch;

/// Owner side of the shutdown flag.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Server side of the shutdown flag.
#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Hand out a signal for one server.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Ask every server holding a signal to stop. Repeat calls are no-ops.
    pub fn trigger(&self) {
        let fired = self.tx.send_if_modified(|triggered| !std::mem::replace(triggered, true));
        if fired {
            tracing::info!(servers = self.tx.receiver_count(), "Shutdown triggered");
        }
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Resolve once shutdown is triggered or the coordinator is dropped.
    pub async fn wait(mut self) {
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }
}

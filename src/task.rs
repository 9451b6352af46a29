// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, preempt};
use std::sync::mpsc;

// one background computation producing one value.
pub struct Pending<T> {
    rx: mpsc::Receiver<T>,
    handle: Option<std::thread::JoinHandle<()>>,
    preemption: preempt::PreemptionContext,
}

impl<T: Send + 'static> Pending<T> {
    pub fn spawn<F>(name: String, f: F) -> error::Returns<Self>
    where
        F: FnOnce(&preempt::PreemptionContext) -> T + Send + 'static,
    {
        let preemption = preempt::PreemptionContext::new();
        let worker_preemption = preemption.clone();
        let (tx, rx) = mpsc::sync_channel(1);
        let handle = std::thread::Builder::new().name(name).spawn(move || {
            // the receiver may have given up already.
            let _ = tx.send(f(&worker_preemption));
        })?;
        Ok(Self {
            rx,
            handle: Some(handle),
            preemption,
        })
    }

    // None means still running. Some(timeout) of zero only polls.
    pub fn wait(&mut self, timeout: Option<std::time::Duration>) -> error::Returns<Option<T>> {
        let received = match timeout {
            None => self.rx.recv().map_err(|_| mpsc::RecvTimeoutError::Disconnected),
            Some(timeout) => self.rx.recv_timeout(timeout),
        };
        match received {
            Ok(value) => {
                self.join();
                Ok(Some(value))
            }
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(error::Error::WorkerLost(self.join())),
        }
    }

    // asks the worker to stop, waits for it, and drops whatever it produced.
    pub fn cancel(mut self) {
        self.preemption.strong_preempt();
        self.join();
    }

    fn join(&mut self) -> String {
        match self.handle.take().map(|h| h.join()) {
            Some(Err(e)) => {
                let msg = e
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| e.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "worker panicked".into());
                log::error!("{}", msg);
                msg
            }
            _ => "worker exited without a result".into(),
        }
    }
}

impl<T> Drop for Pending<T> {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.preemption.strong_preempt();
        }
    }
}

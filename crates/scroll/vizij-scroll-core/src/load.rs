//! Model load slot.
//!
//! The loader reports through a channel; the render loop polls the receiving
//! end each frame without blocking. A load is never retried or cancelled.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

/// Messages sent by a loader.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadEvent {
    Progress { loaded: u64, total: u64 },
    Done,
    Failed(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ModelStatus {
    #[default]
    Pending,
    Ready,
    Failed(String),
}

/// Loader side of the slot.
#[derive(Clone, Debug)]
pub struct LoadSender {
    tx: Sender<LoadEvent>,
}

impl LoadSender {
    pub fn progress(&self, loaded: u64, total: u64) {
        let _ = self.tx.send(LoadEvent::Progress { loaded, total });
    }

    pub fn finish(&self) {
        let _ = self.tx.send(LoadEvent::Done);
    }

    pub fn fail(&self, reason: impl Into<String>) {
        let _ = self.tx.send(LoadEvent::Failed(reason.into()));
    }
}

/// Render-loop side of the slot.
#[derive(Debug)]
pub struct ModelLoad {
    rx: Option<Receiver<LoadEvent>>,
    status: ModelStatus,
    progress: Option<f32>,
}

impl ModelLoad {
    pub fn channel() -> (LoadSender, ModelLoad) {
        let (tx, rx) = mpsc::channel();
        (
            LoadSender { tx },
            ModelLoad {
                rx: Some(rx),
                status: ModelStatus::Pending,
                progress: None,
            },
        )
    }

    /// Drain pending loader messages and return the current status.
    pub fn poll(&mut self) -> &ModelStatus {
        let Some(rx) = self.rx.as_ref() else {
            return &self.status;
        };
        let settled = loop {
            match rx.try_recv() {
                Ok(LoadEvent::Progress { loaded, total }) => {
                    let pct = loaded as f32 / total as f32 * 100.0;
                    self.progress = Some(pct);
                    log::debug!("{pct}% loaded");
                }
                Ok(LoadEvent::Done) => {
                    log::info!("model loaded");
                    break Some(ModelStatus::Ready);
                }
                Ok(LoadEvent::Failed(reason)) => {
                    log::error!("model load failed: {reason}");
                    break Some(ModelStatus::Failed(reason));
                }
                Err(TryRecvError::Empty) => break None,
                Err(TryRecvError::Disconnected) => {
                    let reason = "loader dropped without reporting".to_string();
                    log::error!("model load failed: {reason}");
                    break Some(ModelStatus::Failed(reason));
                }
            }
        };
        if let Some(status) = settled {
            self.status = status;
            self.rx = None;
        }
        &self.status
    }

    pub fn status(&self) -> &ModelStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == ModelStatus::Ready
    }

    /// Last reported progress in percent (may be NaN when total is unknown).
    pub fn progress(&self) -> Option<f32> {
        self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_until_done() {
        let (tx, mut slot) = ModelLoad::channel();
        assert_eq!(slot.poll(), &ModelStatus::Pending);
        tx.progress(50, 200);
        assert_eq!(slot.poll(), &ModelStatus::Pending);
        assert_eq!(slot.progress(), Some(25.0));
        tx.finish();
        assert_eq!(slot.poll(), &ModelStatus::Ready);
        assert!(slot.is_ready());
    }

    #[test]
    fn failure_is_final() {
        let (tx, mut slot) = ModelLoad::channel();
        tx.fail("404");
        assert_eq!(slot.poll(), &ModelStatus::Failed("404".into()));
        tx.finish();
        assert_eq!(slot.poll(), &ModelStatus::Failed("404".into()));
    }

    #[test]
    fn dropped_loader_counts_as_failure() {
        let (tx, mut slot) = ModelLoad::channel();
        drop(tx);
        assert!(matches!(slot.poll(), ModelStatus::Failed(_)));
    }
}

use crate::error::Result;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// User actions coming from a display.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    RunInference,
    ToggleCamera,
    SelectFile(PathBuf),
    Quit,
}

/// Everything a display needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct View {
    pub camera_button: String,
    pub camera_on: bool,
    pub file: Option<String>,
    pub busy: bool,
    pub result: String,
    /// Most probable class of the last report, e.g. `Open Eyes 👀 (98.20%)`.
    pub top: Option<String>,
}

pub trait DeviceDisplay: Send + Sync {
    fn init(&mut self) -> Result<()>;

    fn render(&mut self, view: &View) -> Result<()>;

    /// Subscribes to user actions. Each call returns a new receiver.
    fn events(&self) -> Receiver<DisplayEvent>;
}

/// Fan-out of display events to every live subscriber.
#[derive(Debug, Clone, Default)]
pub struct EventSubscribers {
    senders: Arc<Mutex<Vec<Sender<DisplayEvent>>>>,
}

impl EventSubscribers {
    pub fn subscribe(&self) -> Receiver<DisplayEvent> {
        let (tx, rx) = channel();
        self.lock().push(tx);
        rx
    }

    /// Sends to every subscriber, dropping the ones that hung up. Returns the
    /// number of subscribers reached.
    pub fn send(&self, event: DisplayEvent) -> usize {
        let mut senders = self.lock();
        senders.retain(|tx| tx.send(event.clone()).is_ok());
        senders.len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Sender<DisplayEvent>>> {
        self.senders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

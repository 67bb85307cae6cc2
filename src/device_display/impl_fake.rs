use crate::device_display::interface::{DeviceDisplay, DisplayEvent, EventSubscribers, View};
use crate::error::Result;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, PoisonError};

/// Records every rendered view. Events pushed before anyone subscribed are
/// held back and delivered to the first subscriber.
#[derive(Clone)]
pub struct DeviceDisplayFake {
    logger: Arc<dyn Logger + Send + Sync>,
    views: Arc<Mutex<Vec<View>>>,
    pending: Arc<Mutex<Vec<DisplayEvent>>>,
    subscribers: EventSubscribers,
}

impl DeviceDisplayFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("display").with_namespace("fake"),
            views: Arc::new(Mutex::new(Vec::new())),
            pending: Arc::new(Mutex::new(Vec::new())),
            subscribers: EventSubscribers::default(),
        }
    }

    pub fn push(&self, event: DisplayEvent) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if !pending.is_empty() || self.subscribers.send(event.clone()) == 0 {
            pending.push(event);
        }
    }

    pub fn views(&self) -> Vec<View> {
        self.views
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_view(&self) -> Option<View> {
        self.views().last().cloned()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn init(&mut self) -> Result<()> {
        self.logger.info("DeviceDisplayFake::init()");
        Ok(())
    }

    fn render(&mut self, view: &View) -> Result<()> {
        self.logger
            .info(&format!("DeviceDisplayFake::render({:?})", view));
        self.views
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(view.clone());
        Ok(())
    }

    fn events(&self) -> Receiver<DisplayEvent> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let events = self.subscribers.subscribe();
        for event in pending.drain(..) {
            self.subscribers.send(event);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;

    #[test]
    fn test_events_pushed_before_subscribing_are_delivered() {
        let display = DeviceDisplayFake::new(Arc::new(LoggerFake::new()));
        display.push(DisplayEvent::ToggleCamera);
        display.push(DisplayEvent::RunInference);

        let events = display.events();
        display.push(DisplayEvent::Quit);

        assert_eq!(events.try_recv(), Ok(DisplayEvent::ToggleCamera));
        assert_eq!(events.try_recv(), Ok(DisplayEvent::RunInference));
        assert_eq!(events.try_recv(), Ok(DisplayEvent::Quit));
    }

    #[test]
    fn test_render_records_views() {
        let mut display = DeviceDisplayFake::new(Arc::new(LoggerFake::new()));
        let view = View {
            result: "Analysis Results:\n".to_string(),
            ..View::default()
        };

        display.render(&view).unwrap();

        assert_eq!(display.last_view(), Some(view));
    }
}

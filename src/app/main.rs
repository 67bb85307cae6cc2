use crate::app::core::{init, transition, Effect, Event, State};
use crate::app::render::Render;
use crate::app::run_effect::RunEffect;
use crate::camera_session::CameraSession;
use crate::device_display::interface::DeviceDisplay;
use crate::error::{Error, Result};
use crate::image_classifier::classifier::Classifier;
use crate::library::logger::interface::Logger;
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex, PoisonError};

pub struct App {
    logger: Arc<dyn Logger + Send + Sync>,
    camera_session: Arc<CameraSession>,
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    event_receiver: Receiver<Event>,
    run_effect: RunEffect,
    render: Render,
}

impl App {
    pub fn new(
        logger: Arc<dyn Logger + Send + Sync>,
        camera_session: Arc<CameraSession>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        classifier: Arc<Classifier>,
    ) -> Self {
        let logger = logger.with_namespace("app");
        let (event_sender, event_receiver) = channel();

        let run_effect = RunEffect::new(
            logger.clone(),
            camera_session.clone(),
            device_display.clone(),
            classifier,
            event_sender,
        );
        let render = Render::new(device_display.clone());

        Self {
            logger,
            camera_session,
            device_display,
            event_receiver,
            run_effect,
            render,
        }
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = self.run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }

    /// Processes events until the display asks to quit. The camera is released
    /// before returning.
    pub fn run(&self) -> Result<()> {
        self.device_display
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .init()?;

        let (mut current_state, effects) = init();
        self.render.render(&current_state)?;
        self.spawn_effects(effects);

        loop {
            let event = self.event_receiver.recv().map_err(|e| Error::Display {
                reason: e.to_string(),
            })?;

            self.logger.info(&format!(
                "\nold state:\n\t{:?}\n\nevent:\n\t{:?}",
                current_state, event
            ));

            let (new_state, effects): (State, Vec<Effect>) = transition(current_state, event);

            self.logger.info(&format!(
                "\nnew state:\n\t{:?}\n\neffects:\n\t{:?}",
                new_state, effects
            ));

            current_state = new_state;

            if current_state.exiting {
                self.camera_session.disable();
                self.logger.info("Exiting");
                return Ok(());
            }

            if let Err(e) = self.render.render(&current_state) {
                self.logger.error(&format!("Render failed: {}", e));
            }

            self.spawn_effects(effects);
        }
    }
}

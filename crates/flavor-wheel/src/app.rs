use crate::events::AppEvent;
use crate::sys::clock::FrameScheduler;
use crate::wheel::{PhysicsError, WheelAction, WheelModel};
use async_channel::Receiver;
use cupping::config::{self, Config};
use cupping::language::BuiltinLabels;
use cupping::model::{EntryId, NoteKind, Session};
use cupping::persist::SessionSink;
use cupping::store::{SessionChange, SessionStore};
use cupping::taxonomy::{DescriptorKey, Taxonomy};
use std::ops::ControlFlow;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    Added(DescriptorKey),
    Removed(DescriptorKey),
    Locked,
}

/// Event loop state: the wheel, the session it tags, and the frame clock.
pub struct WheelApp<S: FrameScheduler, K: SessionSink> {
    model: WheelModel,
    store: SessionStore,
    changes: Receiver<SessionChange>,
    sink: K,
    clock: S,
    selected: EntryId,
}

impl<S: FrameScheduler, K: SessionSink> WheelApp<S, K> {
    pub fn new(
        mut store: SessionStore,
        sink: K,
        mut clock: S,
        config: &Config,
    ) -> Result<Self, PhysicsError> {
        let model = WheelModel::new(
            Taxonomy::builtin(),
            &BuiltinLabels,
            config.language,
            &config.wheel,
        )?;
        clock.set_interval(Duration::from_millis(config.wheel.frame_interval_ms));
        let changes = store.subscribe();
        let selected = store.session().coffees()[0].id().clone();
        Ok(Self {
            model,
            store,
            changes,
            sink,
            clock,
            selected,
        })
    }

    pub fn model(&self) -> &WheelModel {
        &self.model
    }

    pub fn session(&self) -> &Session {
        self.store.session()
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn clock(&self) -> &S {
        &self.clock
    }

    pub fn selected(&self) -> &EntryId {
        &self.selected
    }

    pub fn handle(&mut self, event: AppEvent) -> ControlFlow<(), WheelAction> {
        let action = match event {
            AppEvent::Pointer(pointer) => self.model.handle_pointer(pointer),
            AppEvent::Frame => {
                // a tick can still be in flight after the clock was stopped
                if !self.clock.is_running() {
                    return ControlFlow::Continue(WheelAction::default());
                }
                self.model.tick()
            }
            AppEvent::SetLanguage(language) => {
                log::info!("Switching labels to {}", language);
                self.model
                    .set_language(Taxonomy::builtin(), &BuiltinLabels, language)
            }
            AppEvent::Pick(kind) => {
                self.pick(kind);
                self.model.idle_action()
            }
            AppEvent::Select(number) => {
                self.select(number);
                self.model.idle_action()
            }
            AppEvent::ConfigReload => match config::load_config() {
                Ok(config) => self.apply_config(&config),
                Err(e) => {
                    log::error!("Failed to reload config: {}", e);
                    self.model.idle_action()
                }
            },
            AppEvent::Quit => return ControlFlow::Break(()),
        };
        ControlFlow::Continue(self.follow(action))
    }

    fn follow(&mut self, action: WheelAction) -> WheelAction {
        if action.needs_frames {
            self.clock.start();
        } else {
            self.clock.stop();
        }
        if action.selection_changed
            && let Some(sector) = self.model.active_sector()
        {
            log::debug!("Active descriptor: {}", sector.label);
        }
        action
    }

    /// Re-applies physics, frame rate and language.
    pub fn apply_config(&mut self, config: &Config) -> WheelAction {
        if let Err(e) = self.model.apply_settings(&config.wheel) {
            log::error!("Keeping previous wheel settings: {}", e);
        } else {
            self.clock
                .set_interval(Duration::from_millis(config.wheel.frame_interval_ms));
        }
        self.model
            .set_language(Taxonomy::builtin(), &BuiltinLabels, config.language)
    }

    pub fn select(&mut self, number: usize) -> bool {
        let coffees = self.store.session().coffees();
        match number.checked_sub(1).and_then(|idx| coffees.get(idx)) {
            Some(coffee) => {
                log::info!("Picking into '{}'", coffee.name());
                self.selected = coffee.id().clone();
                true
            }
            None => {
                log::warn!("No coffee #{} (the session has {})", number, coffees.len());
                false
            }
        }
    }

    /// Toggles the descriptor under the indicator in the selected coffee's
    /// notes and saves.
    pub fn pick(&mut self, kind: NoteKind) -> Option<PickOutcome> {
        let Some(sector) = self.model.active_sector() else {
            log::warn!("Nothing under the indicator to pick");
            return None;
        };
        let key = sector.key.clone();
        let label = sector.label.clone();

        let outcome = self.store.edit_coffee(&self.selected, |entry| {
            if !entry.toggle_note(kind, key.clone()) {
                return PickOutcome::Locked;
            }
            if entry.notes(kind).contains(&key) {
                PickOutcome::Added(key.clone())
            } else {
                PickOutcome::Removed(key.clone())
            }
        });

        match &outcome {
            Some(PickOutcome::Added(_)) => log::info!("Added {} to {} notes", label, kind),
            Some(PickOutcome::Removed(_)) => log::info!("Removed {} from {} notes", label, kind),
            Some(PickOutcome::Locked) => log::info!("Coffee is locked; {} not recorded", label),
            None => log::warn!("Selected coffee {} no longer exists", self.selected),
        }
        self.save_changes();
        outcome
    }

    fn save_changes(&mut self) {
        let mut changed = false;
        while let Ok(change) = self.changes.try_recv() {
            log::debug!("Session change: {:?}", change);
            changed = true;
        }
        if changed && let Err(e) = self.store.commit(&mut self.sink) {
            log::error!("Failed to save session: {}", e);
        }
    }
}

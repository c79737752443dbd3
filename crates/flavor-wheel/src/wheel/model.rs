use super::physics::{Phase, PhysicsError, RotationEngine, RotationState};
use super::resolve::resolve_index;
use super::sectors::{FlatSector, SectorMap};
use crate::events::PointerEvent;
use cupping::config::WheelSettings;
use cupping::language::{Language, Translate};
use cupping::taxonomy::Taxonomy;

/// The disc: its layout, its motion, and which wedge is under the indicator.
pub struct WheelModel {
    engine: RotationEngine,
    sectors: SectorMap,
    active: Option<usize>,
}

impl WheelModel {
    pub fn new(
        taxonomy: &Taxonomy,
        labels: &impl Translate,
        language: Language,
        settings: &WheelSettings,
    ) -> Result<Self, PhysicsError> {
        let engine = RotationEngine::from_settings(settings)?;
        let sectors = SectorMap::build(taxonomy, labels, language);
        let active = resolve_index(engine.rotation(), sectors.sectors());
        Ok(Self {
            engine,
            sectors,
            active,
        })
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> WheelAction {
        let moved = match event {
            PointerEvent::Down { id, at } => {
                let was_coasting = self.engine.is_coasting();
                self.engine.pointer_down(id, at) && was_coasting
            }
            PointerEvent::Move { id, at } => self.engine.pointer_move(id, at),
            PointerEvent::Up { id } | PointerEvent::Cancel { id } | PointerEvent::Leave { id } => {
                self.engine.pointer_up(id);
                false
            }
        };
        self.refresh(moved)
    }

    /// One animation frame.
    pub fn tick(&mut self) -> WheelAction {
        let moved = self.engine.tick();
        self.refresh(moved)
    }

    pub fn set_language(
        &mut self,
        taxonomy: &Taxonomy,
        labels: &impl Translate,
        language: Language,
    ) -> WheelAction {
        if language == self.sectors.language() {
            return self.idle_action();
        }
        self.sectors.relabel(taxonomy, labels, language);
        WheelAction::new(true, false, self.engine.is_coasting())
    }

    /// Action for events that leave the disc alone. A coast in progress keeps
    /// its frames.
    pub fn idle_action(&self) -> WheelAction {
        WheelAction::new(false, false, self.engine.is_coasting())
    }

    pub fn apply_settings(&mut self, settings: &WheelSettings) -> Result<(), PhysicsError> {
        self.engine.apply_settings(settings)
    }

    fn refresh(&mut self, moved: bool) -> WheelAction {
        let active = resolve_index(self.engine.rotation(), self.sectors.sectors());
        let selection_changed = active != self.active;
        self.active = active;
        WheelAction::new(
            moved || selection_changed,
            selection_changed,
            self.engine.is_coasting(),
        )
    }

    pub fn active_sector(&self) -> Option<&FlatSector> {
        self.active.map(|idx| &self.sectors.sectors()[idx])
    }

    pub fn sectors(&self) -> &SectorMap {
        &self.sectors
    }

    pub fn rotation(&self) -> f64 {
        self.engine.rotation()
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn state(&self) -> RotationState {
        self.engine.state()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WheelAction {
    pub should_redraw: bool,
    pub selection_changed: bool,
    /// The disc is coasting and wants frame ticks.
    pub needs_frames: bool,
}

impl WheelAction {
    pub fn new(should_redraw: bool, selection_changed: bool, needs_frames: bool) -> Self {
        Self {
            should_redraw,
            selection_changed,
            needs_frames,
        }
    }
}

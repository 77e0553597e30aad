use crate::event::{EventHandler, StoreEvent};

/// Schedules a new frame whenever the store changes
#[derive(Debug)]
pub struct RepaintHandler {
    ctx: egui::Context,
}

impl RepaintHandler {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl EventHandler for RepaintHandler {
    fn handle_event(&mut self, event: &StoreEvent) {
        log::trace!("store changed: {:?}", event);
        self.ctx.request_repaint();
    }
}

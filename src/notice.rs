use egui::{Align2, Color32, RichText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    fn color(self) -> Color32 {
        match self {
            Self::Info => Color32::from_gray(230),
            Self::Success => Color32::from_rgb(134, 239, 172),
            Self::Error => Color32::from_rgb(252, 165, 165),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Set the first time the notice is drawn
    shown_at: Option<f64>,
}

/// Transient messages shown in the corner of the window
#[derive(Debug)]
pub struct Notices {
    items: Vec<Notice>,
    lifetime: f64,
}

impl Notices {
    pub fn new(lifetime_secs: f64) -> Self {
        Self {
            items: Vec::new(),
            lifetime: lifetime_secs,
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Info, message.into());
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message.into());
    }

    fn push(&mut self, kind: NoticeKind, message: String) {
        match kind {
            NoticeKind::Error => log::error!("{}", message),
            _ => log::info!("{}", message),
        }
        self.items.push(Notice {
            kind,
            message,
            shown_at: None,
        });
    }

    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    /// Stamp new notices with `now` and drop the expired ones
    pub fn prune(&mut self, now: f64) {
        let lifetime = self.lifetime;
        for notice in &mut self.items {
            notice.shown_at.get_or_insert(now);
        }
        self.items
            .retain(|notice| notice.shown_at.is_some_and(|shown| now - shown < lifetime));
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.prune(ctx.input(|i| i.time));
        if self.items.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notices"))
            .anchor(Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .order(egui::Order::Tooltip)
            .interactable(false)
            .show(ctx, |ui| {
                for notice in &self.items {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        ui.label(RichText::new(&notice.message).color(notice.kind.color()));
                    });
                }
            });

        // Keep frames coming so expired notices disappear on time
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_expire_after_lifetime() {
        let mut notices = Notices::new(3.0);
        notices.success("Image uploaded successfully");
        notices.prune(10.0);
        assert_eq!(notices.items().len(), 1);

        notices.error("Export failed");
        notices.prune(12.0);
        assert_eq!(notices.items().len(), 2);

        notices.prune(13.5);
        assert_eq!(notices.items().len(), 1);
        assert_eq!(notices.items()[0].kind, NoticeKind::Error);

        notices.prune(15.0);
        assert!(notices.items().is_empty());
    }
}

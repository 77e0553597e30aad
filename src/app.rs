use crate::command::{execute_all, Command};
use crate::config::EditorConfig;
use crate::context::EditorContext;
use crate::error::ExportError;
use crate::event::RepaintHandler;
use crate::export::{DownloadSink, ExportAdapter, ExportFormat, ScreenshotRasterizer};
use crate::file_handler::{FileHandler, LoadResult};
use crate::label::{initial_position, LabelId};
use crate::notice::Notices;
use crate::panels::{central_panel, toolbar_panel, CanvasState, ToolbarAction, ToolbarState};
use crate::util::time::unix_millis;

pub struct LabelerApp {
    config: EditorConfig,
    editor: EditorContext,
    file_handler: FileHandler,
    notices: Notices,
    exporter: ExportAdapter,
    rasterizer: ScreenshotRasterizer,
    sink: Box<dyn DownloadSink>,
    export_format: ExportFormat,
    /// Export asked for; the canvas draws one clean frame before it starts
    export_requested: bool,
}

impl LabelerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        let ctx = cc.egui_ctx.clone();
        let mut editor = EditorContext::new();
        editor.subscribe(Box::new(RepaintHandler::new(ctx.clone())));

        Self {
            editor,
            file_handler: FileHandler::new(),
            notices: Notices::new(config.notice_seconds),
            exporter: ExportAdapter::new(config.export_scale()),
            rasterizer: ScreenshotRasterizer::new(ctx),
            sink: download_sink(&config),
            export_format: config.export_format,
            export_requested: false,
            config,
        }
    }

    fn on_image_loaded(&mut self, ctx: &egui::Context, result: LoadResult) {
        match result {
            Ok(image) => {
                self.editor.replace_image(
                    ctx,
                    image,
                    ctx.screen_rect().size(),
                    self.config.viewport_fraction(),
                );
                self.notices.success("Image uploaded successfully");
            }
            Err(err) => self.notices.error(format!("Failed to load image: {err}")),
        }
    }

    fn open_image(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(Err(err)) = self.file_handler.open_file_dialog() {
            self.notices.error(format!("Failed to load image: {err}"));
        }

        #[cfg(target_arch = "wasm32")]
        self.notices.error("Browsing for files is not available here; drop an image instead");
    }

    fn add_label(&mut self) {
        let Some(viewport) = &self.editor.viewport else {
            self.notices.error("Upload an image before adding text");
            return;
        };
        let position = initial_position(Some(viewport.display_size()));
        let label = self.config.new_label(LabelId::new(), position);
        match Command::AddLabel(label).execute(&mut self.editor.store) {
            Ok(()) => self.notices.info("New text label added"),
            Err(err) => log::warn!("could not add label: {}", err),
        }
    }

    fn handle_toolbar(&mut self, actions: Vec<ToolbarAction>) {
        let mut commands = Vec::new();
        for action in actions {
            match action {
                ToolbarAction::AddLabel => self.add_label(),
                ToolbarAction::OpenImage => self.open_image(),
                ToolbarAction::Export => {
                    if !self.editor.has_image() {
                        self.notices
                            .error(format!("Export failed: {}", ExportError::MissingViewport));
                    } else if !self.exporter.is_pending() {
                        self.editor.prepare_export();
                        self.export_requested = true;
                    }
                }
                ToolbarAction::Command(command) => commands.push(command),
            }
        }

        let deleted = commands
            .iter()
            .any(|command| matches!(command, Command::RemoveLabel(_)));
        execute_all(commands, &mut self.editor.store);
        if deleted {
            self.notices.info("Text label deleted");
        }
    }

    /// Kick off a requested export once the canvas has drawn without chrome
    fn start_export(&mut self, ctx: &egui::Context) {
        if !self.export_requested {
            return;
        }
        self.export_requested = false;
        let region = self.editor.export_region();
        if let Err(err) = self.exporter.start(region, self.export_format, &mut self.rasterizer) {
            self.notices.error(format!("Export failed: {err}"));
        }
        ctx.request_repaint();
    }

    /// An export is requested or in flight; the canvas draws without chrome
    fn is_capturing(&self) -> bool {
        self.export_requested || self.exporter.is_pending()
    }

    fn finish_export(&mut self) {
        match self.exporter.poll(self.sink.as_mut(), unix_millis()) {
            None => {}
            Some(Ok(Some(path))) => {
                log::info!("export saved to {}", path);
                self.notices.success("Image exported successfully");
            }
            Some(Ok(None)) => self.notices.info("Export cancelled"),
            Some(Err(err)) => self.notices.error(format!("Export failed: {err}")),
        }
    }
}

fn download_sink(config: &EditorConfig) -> Box<dyn DownloadSink> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        match &config.export_dir {
            Some(dir) => Box::new(crate::export::DirectorySink::new(dir.clone())),
            None => Box::new(crate::export::SaveDialogSink),
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        Box::new(crate::export::DirectorySink::new(
            config.export_dir.clone().unwrap_or_default(),
        ))
    }
}

impl eframe::App for LabelerApp {
    /// Transparent while capturing, so the export keeps the image's alpha
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        if self.is_capturing() {
            [0.0; 4]
        } else {
            visuals.panel_fill.to_normalized_gamma_f32()
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.rasterizer.collect(ctx);

        if let Some(Err(err)) = self.file_handler.check_for_dropped_files(ctx) {
            self.notices.error(format!("Failed to load image: {err}"));
        }
        // Later completions replace earlier ones
        for result in self.file_handler.poll() {
            self.on_image_loaded(ctx, result);
        }

        self.finish_export();

        // Side panel first so the central panel gets the remaining space
        let exporting = self.is_capturing();
        let actions = toolbar_panel(
            ctx,
            ToolbarState {
                has_image: self.editor.has_image(),
                selected: self.editor.store.selected(),
                export_format: &mut self.export_format,
                exporting,
            },
        );
        self.handle_toolbar(actions);

        let clean = self.is_capturing();
        let EditorContext {
            store,
            viewport,
            drag_tool,
            edit_tool,
        } = &mut self.editor;
        let output = central_panel(
            ctx,
            CanvasState {
                store,
                viewport: viewport.as_mut(),
                drag_tool,
                edit_tool,
                clean,
            },
        );

        if output.open_image {
            self.open_image();
        }
        execute_all(output.commands, &mut self.editor.store);
        if output.deleted_by_shortcut {
            self.notices.info("Text label deleted");
        }
        self.editor.sync_tools();

        self.start_export(ctx);

        if !clean {
            self.file_handler.preview_files_being_dropped(ctx);
            self.notices.show(ctx);
        }

        if self.file_handler.in_flight() > 0 || self.exporter.is_pending() || self.rasterizer.has_pending() {
            ctx.request_repaint();
        }
    }
}

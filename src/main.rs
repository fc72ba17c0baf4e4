use eframe::egui;

use tilegrid::{Gallery, GalleryId, GalleryRegistry, Page, Target};

/// Sample page markup driving the demo, declared the way a host document
/// would declare it: attribute strings on the container, size descriptors
/// and category lists on the items.
const SAMPLE_PAGE: &str = r#"{
    "containers": [{
        "id": "gallery",
        "row_capacity": "4",
        "gap": "8",
        "width": 1152.0,
        "items": [
            { "size": "2/2", "category": "nature",        "label": "Dunes" },
            { "size": "1/1", "category": "city",          "label": "Tram" },
            { "size": "1/1", "category": "nature, water", "label": "Fjord" },
            { "size": "1/2", "category": "city",          "label": "Tower" },
            { "size": "2/1", "category": "water",         "label": "Harbor" },
            { "size": "1/1", "category": "nature",        "label": "Moss" },
            { "size": "1/1",                              "label": "Untitled" },
            { "size": "2/1", "category": "city, water",   "label": "Canal" },
            { "size": "1/1", "category": "nature",        "label": "Scree" },
            { "size": "1/1", "category": "water",         "label": "Eddy" }
        ]
    }]
}"#;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("tilegrid - Tile Gallery"),
        ..Default::default()
    };

    eframe::run_native(
        "tilegrid",
        options,
        Box::new(|cc| {
            configure_custom_style(&cc.egui_ctx);
            Box::new(GalleryApp::new())
        }),
    )
}

fn configure_custom_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = egui::Color32::from_rgba_unmultiplied(30, 41, 59, 240);
    visuals.window_stroke = egui::Stroke::new(
        1.0,
        egui::Color32::from_rgba_unmultiplied(255, 255, 255, 26),
    );
    visuals.widgets.noninteractive.rounding = egui::Rounding::same(8.0);
    visuals.widgets.inactive.rounding = egui::Rounding::same(8.0);
    visuals.widgets.hovered.rounding = egui::Rounding::same(8.0);
    visuals.widgets.active.rounding = egui::Rounding::same(8.0);
    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(12.0, 8.0);
    style.spacing.button_padding = egui::vec2(16.0, 8.0);

    ctx.set_style(style);
}

struct GalleryApp {
    registry: GalleryRegistry,
    gallery_id: GalleryId,
    category_labels: Vec<String>,
    /// Last observed content width; a change marks a pending relayout.
    last_width: f32,
}

impl GalleryApp {
    fn new() -> Self {
        let page = Page::from_json(SAMPLE_PAGE).expect("sample markup is valid JSON");
        let gallery = Gallery::create(&page, Target::Selector("#gallery"), 1.35)
            .expect("sample page contains the gallery container");

        let category_labels: Vec<String> = gallery
            .category_labels()
            .into_iter()
            .map(str::to_string)
            .collect();
        let last_width = page.find("#gallery").map(|c| c.width).unwrap_or(0.0);

        let mut registry = GalleryRegistry::new();
        let gallery_id = registry.mount(gallery);

        Self {
            registry,
            gallery_id,
            category_labels,
            last_width,
        }
    }

    fn category_color(&self, tile_categories: &[String]) -> egui::Color32 {
        let palette = [
            egui::Color32::from_rgb(59, 130, 246),  // blue
            egui::Color32::from_rgb(245, 158, 11),  // amber
            egui::Color32::from_rgb(139, 92, 246),  // purple
            egui::Color32::from_rgb(16, 185, 129),  // teal
            egui::Color32::from_rgb(239, 68, 68),   // coral
        ];

        match tile_categories.first() {
            Some(first) => {
                let slot = self
                    .category_labels
                    .iter()
                    .position(|label| label == first)
                    .unwrap_or(0);
                palette[slot % palette.len()]
            }
            None => egui::Color32::from_rgb(100, 116, 139), // uncategorized: slate
        }
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Tile Gallery");
                ui.separator();

                let width = self.last_width;
                if let Some(gallery) = self.registry.get_mut(self.gallery_id) {
                    let active = gallery.filtered_category().to_string();

                    if ui.selectable_label(active.is_empty(), "All").clicked() {
                        gallery.filter("", width);
                    }
                    for label in &self.category_labels {
                        if ui.selectable_label(active == *label, label).clicked() {
                            gallery.filter(label, width);
                        }
                    }
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_rect_before_wrap();

            // Resize events coalesce: flag once, relayout on the next tick.
            if (available.width() - self.last_width).abs() > 0.5 {
                self.last_width = available.width();
                self.registry.notify_resize();
            }

            let dt = ctx.input(|i| i.stable_dt).min(0.1);
            let width = self.last_width;
            let animating = self.registry.tick(dt, |_| width);

            let painter = ui.painter();
            let origin = available.min;

            if let Some(gallery) = self.registry.get(self.gallery_id) {
                for tile in gallery.tiles() {
                    let visual = tile.visual;
                    if visual.opacity <= 0.001 || visual.scale <= 0.001 {
                        continue;
                    }

                    // Scale shrinks the tile around its own center.
                    let center = egui::pos2(
                        origin.x + visual.left + tile.width_px * 0.5,
                        origin.y + visual.top + tile.height_px * 0.5,
                    );
                    let size = egui::vec2(
                        tile.width_px * visual.scale,
                        tile.height_px * visual.scale,
                    );
                    let rect = egui::Rect::from_center_size(center, size);

                    let alpha = (visual.opacity.clamp(0.0, 1.0) * 255.0) as u8;
                    let fill = self
                        .category_color(&tile.categories)
                        .gamma_multiply(visual.opacity.clamp(0.0, 1.0));

                    let corner = (size.min_elem() * 0.08).min(12.0);
                    painter.rect(rect, corner, fill, egui::Stroke::NONE);
                    painter.rect_stroke(
                        rect,
                        corner,
                        egui::Stroke::new(
                            1.0,
                            egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha / 8),
                        ),
                    );

                    if size.x * size.y > 2500.0 {
                        painter.text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            &tile.label,
                            egui::FontId::proportional(14.0),
                            egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha),
                        );
                    }
                }
            }

            if animating {
                ctx.request_repaint();
            }
        });
    }
}

/*!
 * Desktop dashboard for pandemic-dash
 *
 * Shows current totals as animated counter cards and the daily new cases of
 * the last week as a chart, for the global aggregate or a selected country.
 *
 * Platform support: Windows, macOS, Linux
 */

use chrono::Local;
use eframe::egui;
use egui::epaint::Mesh;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Vec2};
use pandemic_dash::chart::{DailyChart, SERIES_LABEL, X_AXIS_TITLE, Y_AXIS_TITLE};
use pandemic_dash::dashboard::CycleTicket;
use pandemic_dash::render::{format_count, format_delta};
use pandemic_dash::series::short_date_label;
use pandemic_dash::viz::{GRADIENT_TOP_ALPHA, LINE_COLOR};
use pandemic_dash::{Client, Config, CycleData, Dashboard, FetchError, Scope};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

/// Selector entries: (value sent to the API, label shown).
const SCOPES: &[(&str, &str)] = &[
    ("all", "Global"),
    ("USA", "United States"),
    ("India", "India"),
    ("Brazil", "Brazil"),
    ("France", "France"),
    ("Germany", "Germany"),
    ("UK", "United Kingdom"),
    ("Italy", "Italy"),
    ("Japan", "Japan"),
    ("S. Korea", "South Korea"),
    ("Russia", "Russia"),
    ("Spain", "Spain"),
    ("Australia", "Australia"),
    ("Canada", "Canada"),
    ("South Africa", "South Africa"),
    ("Nigeria", "Nigeria"),
];

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Pandemic Dashboard - pandemic-dash"),
        ..Default::default()
    };

    eframe::run_native(
        "Pandemic Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashApp::new(Config::default())))),
    )
}

type CycleMessage = (CycleTicket, Result<CycleData, FetchError>);

struct DashApp {
    config: Config,
    client: Option<Client>,
    dashboard: Dashboard,
    selected: String,

    sender: mpsc::Sender<CycleMessage>,
    receiver: mpsc::Receiver<CycleMessage>,

    status_message: String,
    setup_error: String,
}

impl DashApp {
    fn new(config: Config) -> Self {
        let (sender, receiver) = mpsc::channel();
        let (client, setup_error) = match Client::new(&config) {
            Ok(c) => (Some(c), String::new()),
            Err(err) => {
                log::error!("client setup: {err:#}");
                (None, format!("Could not set up the HTTP client: {err}"))
            }
        };
        let mut app = Self {
            config,
            client,
            dashboard: Dashboard::new(),
            selected: "all".to_string(),
            sender,
            receiver,
            status_message: String::new(),
            setup_error,
        };
        app.start_cycle();
        app
    }

    /// Kick off a cycle for the current selection on a background thread.
    /// Earlier cycles still in flight are not aborted; their results are
    /// dropped by the dashboard when they arrive.
    fn start_cycle(&mut self) {
        let Some(client) = self.client.clone() else {
            return;
        };
        self.status_message.clear();
        let ticket = self.dashboard.begin_cycle(Scope::parse(&self.selected));
        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = client.fetch_cycle(ticket.scope());
            let _ = sender.send((ticket, result));
        });
    }

    fn check_cycle_results(&mut self) {
        while let Ok((ticket, result)) = self.receiver.try_recv() {
            self.dashboard.complete_cycle(ticket, result, Local::now());
        }
    }

    fn export_chart(&mut self) {
        let Some(chart) = self.dashboard.chart() else {
            return;
        };
        let start_dir = dirs::picture_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(start_dir)
            .set_file_name("daily_cases.png")
            .add_filter("Chart image", &["png", "svg"])
            .save_file()
        else {
            return;
        };
        self.status_message = match chart.render_to_file(&path, 1000, 600, &self.config.locale) {
            Ok(()) => format!("Chart saved to {}", path.display()),
            Err(err) => format!("Failed to save chart: {err}"),
        };
    }

    fn cards_ui(&self, ui: &mut egui::Ui) {
        if self.dashboard.is_loading() {
            // skeleton placeholders
            ui.horizontal(|ui| {
                for _ in 0..3 {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.set_min_size(Vec2::new(200.0, 70.0));
                        ui.spinner();
                    });
                }
            });
            return;
        }

        let Some(region) = self.dashboard.cards() else {
            return;
        };
        ui.heading(region.title.as_str());
        ui.horizontal(|ui| {
            for card in &region.cards {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_min_size(Vec2::new(200.0, 70.0));
                    ui.vertical(|ui| {
                        ui.label(card.metric.title());
                        ui.label(
                            egui::RichText::new(format_count(card.display, &self.config.locale))
                                .size(26.0)
                                .strong(),
                        );
                    });
                });
            }
        });
        ui.small(region.last_updated_text());
    }
}

/// Draw the daily chart with the egui painter: gradient area, line, markers,
/// axis titles and an index-keyed hover tooltip.
fn chart_ui(ui: &mut egui::Ui, chart: &DailyChart, locale: &str) {
    let size = Vec2::new(ui.available_width(), 360.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let frame = response.rect;
    let plot = Rect::from_min_max(
        frame.min + Vec2::new(64.0, 28.0),
        frame.max - Vec2::new(16.0, 44.0),
    );
    let text_color = ui.visuals().text_color();
    let grid = ui.visuals().weak_text_color();
    let line = Color32::from_rgb(LINE_COLOR.0, LINE_COLOR.1, LINE_COLOR.2);

    painter.text(
        Pos2::new(frame.center().x, frame.min.y + 4.0),
        Align2::CENTER_TOP,
        SERIES_LABEL,
        FontId::proportional(15.0),
        text_color,
    );
    painter.text(
        Pos2::new(plot.center().x, frame.max.y - 4.0),
        Align2::CENTER_BOTTOM,
        X_AXIS_TITLE,
        FontId::proportional(13.0),
        text_color,
    );
    painter.text(
        Pos2::new(frame.min.x + 2.0, plot.min.y - 6.0),
        Align2::LEFT_BOTTOM,
        Y_AXIS_TITLE,
        FontId::proportional(13.0),
        text_color,
    );

    let (y_min, y_max) = chart.y_range();
    let n = chart.len();
    let x_span = if n > 1 { (n - 1) as f32 } else { 1.0 };
    let to_screen = |i: f32, v: f64| {
        let t = ((v - y_min) / (y_max - y_min)) as f32;
        Pos2::new(
            plot.min.x + plot.width() * (i / x_span),
            plot.max.y - plot.height() * t,
        )
    };

    // zero line and y extremes
    let zero_y = to_screen(0.0, 0.0).y;
    painter.line_segment(
        [Pos2::new(plot.min.x, zero_y), Pos2::new(plot.max.x, zero_y)],
        Stroke::new(1.0, grid),
    );
    for v in [y_min, 0.0, y_max] {
        painter.text(
            Pos2::new(plot.min.x - 6.0, to_screen(0.0, v).y),
            Align2::RIGHT_CENTER,
            format_delta(v.round() as i64, locale),
            FontId::proportional(11.0),
            text_color,
        );
    }

    let points: Vec<Pos2> = chart
        .values()
        .iter()
        .enumerate()
        .map(|(i, v)| to_screen(i as f32, *v as f64))
        .collect();

    // gradient fill: one quad per segment, alpha by height
    let alpha_at = |y: f32| {
        let t = ((plot.max.y - y) / plot.height()).clamp(0.0, 1.0);
        (255.0 * GRADIENT_TOP_ALPHA as f32 * t) as u8
    };
    let fill = |y: f32| Color32::from_rgba_unmultiplied(line.r(), line.g(), line.b(), alpha_at(y));
    let mut mesh = Mesh::default();
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let base = mesh.vertices.len() as u32;
        mesh.colored_vertex(a, fill(a.y));
        mesh.colored_vertex(b, fill(b.y));
        mesh.colored_vertex(Pos2::new(b.x, zero_y), fill(zero_y));
        mesh.colored_vertex(Pos2::new(a.x, zero_y), fill(zero_y));
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }
    painter.add(Shape::mesh(mesh));

    if points.len() > 1 {
        painter.add(Shape::line(points.clone(), Stroke::new(2.0, line)));
    }
    for (i, p) in points.iter().enumerate() {
        painter.circle_filled(*p, 4.0, line);
        if let Some(label) = chart.labels().get(i) {
            painter.text(
                Pos2::new(p.x, plot.max.y + 6.0),
                Align2::CENTER_TOP,
                short_date_label(label),
                FontId::proportional(11.0),
                text_color,
            );
        }
    }

    if n == 0 {
        painter.text(
            plot.center(),
            Align2::CENTER_CENTER,
            "No daily data",
            FontId::proportional(13.0),
            grid,
        );
        return;
    }

    // tooltip for the nearest index
    if let Some(pos) = response.hover_pos() {
        let idx = (((pos.x - plot.min.x) / plot.width()) * x_span)
            .round()
            .clamp(0.0, (n - 1) as f32) as usize;
        if let Some(text) = chart.tooltip(idx, locale) {
            painter.circle_filled(points[idx], 6.0, line);
            response.on_hover_text_at_pointer(text);
        }
    }
}

impl eframe::App for DashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_cycle_results();

        ctx.set_visuals(if self.dashboard.theme().is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        // One counter step per rendered frame.
        let animating = self.dashboard.tick();
        if animating || self.dashboard.is_loading() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Pandemic Dashboard");
                ui.separator();

                let before = self.selected.clone();
                let shown = SCOPES
                    .iter()
                    .find(|(v, _)| *v == self.selected)
                    .map(|(_, l)| *l)
                    .unwrap_or("Global");
                egui::ComboBox::from_label("Region")
                    .selected_text(shown)
                    .show_ui(ui, |ui| {
                        for (value, label) in SCOPES {
                            ui.selectable_value(&mut self.selected, value.to_string(), *label);
                        }
                    });
                if self.selected != before {
                    self.start_cycle();
                }

                let theme_label = if self.dashboard.theme().is_dark() {
                    "Light mode"
                } else {
                    "Dark mode"
                };
                if ui.button(theme_label).clicked() {
                    self.dashboard.toggle_theme();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                if !self.setup_error.is_empty() {
                    ui.colored_label(Color32::RED, self.setup_error.as_str());
                    return;
                }

                if self.dashboard.has_error() {
                    ui.colored_label(
                        Color32::RED,
                        "Failed to load data. Please try again later.",
                    );
                    if ui.button("Retry").clicked() {
                        self.start_cycle();
                    }
                }

                self.cards_ui(ui);
                ui.add_space(12.0);

                if let Some(chart) = self.dashboard.chart() {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        chart_ui(ui, chart, &self.config.locale);
                    });
                    ui.add_space(8.0);
                }

                ui.horizontal(|ui| {
                    let can_export = self.dashboard.chart().is_some();
                    if ui
                        .add_enabled(can_export, egui::Button::new("Export chart…"))
                        .clicked()
                    {
                        self.export_chart();
                    }
                    if !self.status_message.is_empty() {
                        ui.label(self.status_message.as_str());
                    }
                });
            });
        });
    }
}

use egui::{
    Align, Color32, ColorImage, Context, Layout, RichText, TextureHandle, TextureOptions, Ui,
};
use std::sync::Arc;

use super::state::{App, LoadState, Loaded, Tab};
use crate::analysis::{BarRow, DashboardView, KpiCard, Trend, ValueRow};
use crate::plotting::{render_chart, ChartCache, ChartId, ChartKey, PlotError};

const CHART_HEIGHT: u32 = 280;
const CARDS_PER_ROW: usize = 4;

const POSITIVE: Color32 = Color32::from_rgb(22, 163, 74);
const NEGATIVE: Color32 = Color32::from_rgb(220, 38, 38);

/// Something the user asked for that must run outside the state lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Retry,
}

/// Draw the main application UI
pub fn draw_ui(
    app: &mut App,
    ctx: &Context,
    charts: &mut ChartCache<TextureHandle>,
) -> Option<UiAction> {
    let state = app.dashboard.state().clone();
    let mut action = None;

    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.heading(RichText::new("Wayne Enterprises").strong());
            ui.label("Business Intelligence Dashboard");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if let LoadState::Success(loaded) = &state {
                    ui.weak(format!(
                        "Last updated {}",
                        loaded.snapshot.fetched_at.format("%H:%M:%S")
                    ));
                }
            });
        });
        ui.add_space(6.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| match &state {
        LoadState::Loading => draw_loading(ui),
        LoadState::Error(message) => {
            if draw_error(ui, message) {
                action = Some(UiAction::Retry);
            }
        }
        LoadState::Success(loaded) => {
            charts.retain_generation(loaded.generation);
            draw_dashboard(ui, app, loaded, charts);
        }
    });

    action
}

fn draw_loading(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(160.0);
        ui.spinner();
        ui.label("Loading Dashboard...");
    });
}

/// Returns `true` when the retry button was clicked.
fn draw_error(ui: &mut Ui, message: &str) -> bool {
    let mut clicked = false;
    ui.vertical_centered(|ui| {
        ui.add_space(160.0);
        ui.label(RichText::new("Error Loading Data").heading().color(NEGATIVE));
        ui.label(message);
        ui.add_space(12.0);
        clicked = ui.button("Retry").clicked();
    });
    clicked
}

fn draw_dashboard(
    ui: &mut Ui,
    app: &mut App,
    loaded: &Arc<Loaded>,
    charts: &mut ChartCache<TextureHandle>,
) {
    let view = &loaded.view;
    let generation = loaded.generation;

    egui::ScrollArea::vertical().show(ui, |ui| {
        draw_cards(ui, &view.summary);
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            for tab in Tab::ALL {
                ui.selectable_value(&mut app.selected_tab, tab, tab.label());
            }
        });
        ui.separator();

        let mut chart = |ui: &mut Ui, id: ChartId| draw_chart(ui, charts, view, id, generation);

        match app.selected_tab {
            Tab::Financial => {
                ui.heading("Financial Overview");
                ui.columns(2, |cols| {
                    chart(&mut cols[0], ChartId::RevenueByDivision);
                    chart(&mut cols[1], ChartId::MarketShare);
                });
                ui.columns(2, |cols| {
                    draw_bars(
                        &mut cols[0],
                        "Profit Margins by Division",
                        &view.finance.profit_margins,
                    );
                    chart(&mut cols[1], ChartId::RdInvestment);
                });
            }
            Tab::Security => {
                ui.heading("Gotham Security Operations");
                draw_cards(ui, &view.security.cards);
                ui.columns(2, |cols| {
                    chart(&mut cols[0], ChartId::ResponseTimes);
                    chart(&mut cols[1], ChartId::SafetyScores);
                });
                chart(ui, ChartId::IncidentTrends);
                draw_bars(ui, "Wayne Tech Deployments", &view.security.deployments);
            }
            Tab::Research => {
                let research = &view.research;
                ui.heading("R&D Portfolio");
                ui.label(format!(
                    "{} projects, overall budget utilization {}",
                    research.total_projects,
                    research.utilization_summary()
                ));
                ui.columns(2, |cols| {
                    draw_values(
                        &mut cols[0],
                        "Project Status Distribution",
                        &research.project_status,
                    );
                    draw_bars(&mut cols[1], "Budget Utilization", &research.budget_utilization);
                });
                ui.columns(2, |cols| {
                    draw_values(
                        &mut cols[0],
                        "Commercialization Potential",
                        &research.commercialization,
                    );
                    draw_bars(&mut cols[1], "Timeline Adherence", &research.timeline_adherence);
                });
            }
            Tab::SupplyChain => {
                let supply = &view.supply_chain;
                ui.heading("Supply Chain Performance");
                ui.label(format!("{} disruptions across all facilities", supply.total_disruptions));
                ui.columns(2, |cols| {
                    draw_bars(&mut cols[0], "Quality Scores", &supply.quality_scores);
                    draw_bars(&mut cols[1], "Disruptions by Facility", &supply.disruptions);
                });
                chart(ui, ChartId::ProductionTrends);
                draw_values(ui, "Sustainability Ratings", &supply.sustainability);
            }
            Tab::Hr => {
                let workforce = &view.workforce;
                ui.heading("Human Resources Analytics");
                ui.label(format!("Average retention {}", workforce.retention_summary()));
                ui.columns(2, |cols| {
                    draw_bars(&mut cols[0], "Retention by Department", &workforce.retention);
                    draw_bars(&mut cols[1], "Training Hours", &workforce.training);
                });
                ui.columns(2, |cols| {
                    draw_values(&mut cols[0], "Diversity Index", &workforce.diversity);
                    chart(&mut cols[1], ChartId::SatisfactionTrends);
                });
            }
        }
    });
}

fn draw_cards(ui: &mut Ui, cards: &[KpiCard]) {
    for row in cards.chunks(CARDS_PER_ROW) {
        ui.columns(CARDS_PER_ROW, |cols| {
            for (col, card) in cols.iter_mut().zip(row) {
                draw_card(col, card);
            }
        });
        ui.add_space(8.0);
    }
}

fn draw_card(ui: &mut Ui, card: &KpiCard) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(card.title).small().color(Color32::GRAY));
        ui.label(RichText::new(&card.value).size(22.0).strong());
        let caption = RichText::new(&card.caption).small();
        ui.label(match card.trend {
            Trend::Positive => caption.color(POSITIVE),
            Trend::Negative => caption.color(NEGATIVE),
            Trend::Neutral => caption,
        });
    });
}

fn draw_bars(ui: &mut Ui, title: &str, rows: &[BarRow]) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.strong(title);
        egui::Grid::new(title)
            .num_columns(3)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for row in rows {
                    ui.label(&row.label);
                    ui.add(egui::ProgressBar::new(row.fraction).desired_width(160.0));
                    ui.strong(&row.text);
                    ui.end_row();
                }
            });
    });
}

fn draw_values(ui: &mut Ui, title: &str, rows: &[ValueRow]) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.strong(title);
        egui::Grid::new(title)
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                for row in rows {
                    ui.label(&row.label);
                    ui.strong(&row.value);
                    ui.end_row();
                }
            });
    });
}

fn draw_chart(
    ui: &mut Ui,
    charts: &mut ChartCache<TextureHandle>,
    view: &DashboardView,
    chart: ChartId,
    generation: u64,
) {
    let width = ui.available_width().clamp(240.0, 960.0) as u32;
    let size = (width, CHART_HEIGHT);
    let key = ChartKey {
        chart,
        generation,
        size,
    };
    let ctx = ui.ctx().clone();

    let texture = charts.get_or_render(key, || {
        let rendered = render_chart(&chart.spec(view), size)?;
        let image = ColorImage::from_rgb(
            [rendered.size.0 as usize, rendered.size.1 as usize],
            &rendered.rgb,
        );
        Ok::<_, PlotError>(ctx.load_texture(format!("{chart:?}"), image, TextureOptions::LINEAR))
    });

    match texture {
        Ok(texture) => {
            ui.image(&texture);
        }
        Err(e) => {
            tracing::warn!(chart = ?chart, error = %e, "Failed to render chart");
            ui.weak(format!("{} unavailable", chart.spec(view).title));
        }
    }
}

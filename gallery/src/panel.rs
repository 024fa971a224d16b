//! Verse side panel
//!
//! Right panel with the verse text and its two readings, per-scene
//! controls, and navigation. The panel only collects actions; the app
//! applies them after the UI pass so scene state never changes mid-frame.

use crate::scene::Scene;
use crate::verses::{SceneKind, VerseRecord};
use egui::{Color32, Context, FontFamily, FontId, RichText};

/// What the viewer asked for this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelAction {
    Prev,
    Next,
    Reset,
    Primary,
    ToggleObserve,
    Coupling(f32),
    Amplitude(f32),
}

/// Slider positions that have to persist across frames.
pub struct PanelState {
    pub coupling: f32,
    pub amplitude: f32,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            coupling: 0.25,
            amplitude: 0.6,
        }
    }
}

pub fn draw_verse_panel(
    ctx: &Context,
    verse: &VerseRecord,
    scene: &Scene,
    state: &mut PanelState,
) -> Vec<PanelAction> {
    let mut actions = Vec::new();

    egui::SidePanel::right("verse_panel")
        .min_width(300.0)
        .max_width(380.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(
                    RichText::new(format!("MMK {}.{}", verse.chapter, verse.number))
                        .color(Color32::from_rgb(100, 200, 255)),
                );
                ui.label(RichText::new(verse.title).italics().color(Color32::LIGHT_GRAY));
            });

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(5.0);

            ui.label(
                RichText::new(verse.text)
                    .font(FontId::new(15.0, FontFamily::Proportional))
                    .italics()
                    .color(Color32::from_rgb(230, 225, 200)),
            );

            ui.add_space(10.0);
            section(ui, "Quantum reading", verse.quantum_note);
            ui.add_space(8.0);
            section(ui, "Madhyamaka reading", verse.madhyamaka_note);

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(5.0);

            draw_controls(ui, verse.kind, scene, state, &mut actions);

            ui.add_space(10.0);
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("◀ previous").clicked() {
                    actions.push(PanelAction::Prev);
                }
                if ui.button("reset").clicked() {
                    actions.push(PanelAction::Reset);
                }
                if ui.button("next ▶").clicked() {
                    actions.push(PanelAction::Next);
                }
            });
        });

    actions
}

fn section(ui: &mut egui::Ui, title: &str, body: &str) {
    ui.label(
        RichText::new(title)
            .strong()
            .color(Color32::from_rgb(255, 200, 100)),
    );
    ui.add_space(3.0);
    ui.label(RichText::new(body).color(Color32::LIGHT_GRAY));
}

fn draw_controls(
    ui: &mut egui::Ui,
    kind: SceneKind,
    scene: &Scene,
    state: &mut PanelState,
    actions: &mut Vec<PanelAction>,
) {
    ui.label(
        RichText::new(kind.label())
            .strong()
            .color(Color32::from_rgb(150, 255, 150)),
    );
    ui.add_space(5.0);

    match kind {
        SceneKind::DoubleSlit => {
            let mut observing = scene.recipe().observed().unwrap_or(false);
            if ui.checkbox(&mut observing, "watch the slits").changed() {
                actions.push(PanelAction::ToggleObserve);
            }
        }
        SceneKind::Collapse => {
            let observed = scene.recipe().observed().unwrap_or(false);
            ui.add_enabled_ui(!observed, |ui| {
                if ui.button("observe").clicked() {
                    actions.push(PanelAction::Primary);
                }
            });
        }
        SceneKind::Entanglement => {
            let measured = scene.recipe().observed().unwrap_or(false);
            ui.add_enabled_ui(!measured, |ui| {
                if ui.button("measure").clicked() {
                    actions.push(PanelAction::Primary);
                }
            });
        }
        SceneKind::Decoherence => {
            if ui
                .add(egui::Slider::new(&mut state.coupling, 0.0..=2.0).text("coupling"))
                .changed()
            {
                actions.push(PanelAction::Coupling(state.coupling));
            }
            if ui.button("perturb").clicked() {
                actions.push(PanelAction::Primary);
            }
        }
        SceneKind::SymmetryBreak => {
            if ui.button("tip the balance").clicked() {
                actions.push(PanelAction::Primary);
            }
        }
        SceneKind::Superposition => {
            if ui
                .add(egui::Slider::new(&mut state.amplitude, 0.0..=2.0).text("amplitude"))
                .changed()
            {
                actions.push(PanelAction::Amplitude(state.amplitude));
            }
        }
    }
}

/// Top status strip: scene status plus the key bindings.
pub fn draw_status_bar(ctx: &Context, status: &str, index: usize, total: usize) {
    egui::TopBottomPanel::top("status").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(status).color(Color32::WHITE));
            ui.separator();
            ui.label(format!("verse {}/{}", index + 1, total));
        });
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("Space/click: trigger · R: reset · N/P: verse · arrows: orbit · wheel: zoom")
                    .small()
                    .color(Color32::GRAY),
            );
        });
    });
}

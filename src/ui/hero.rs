// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Agent card grid backed by the status poller.
//!
//! The view owns the [`Poller`]: the polling loop starts when the view is
//! created and stops when it is dropped.

use agent_status_client::{AgentRound, DisplayCard, FetchError, HttpStatusSource, Poller, RoundPhase};
use log::{error, info};

use crate::config::AppConfig;
use crate::status::SystemStatus;

const CARD_WIDTH: f32 = 230.0;

#[derive(Debug)]
pub struct HeroView {
    poller: Poller,
}

impl HeroView {
    /// Start polling the configured endpoints on `runtime`.
    pub fn start(runtime: &tokio::runtime::Handle, config: &AppConfig) -> Result<Self, FetchError> {
        let source = HttpStatusSource::new(config.request_timeout())?;

        // Poller::spawn needs a runtime context on this (UI) thread.
        let _guard = runtime.enter();
        let poller = Poller::spawn(source, config.endpoint_table(), config.poller_config());
        info!("Agent view opened");

        Ok(Self { poller })
    }

    pub fn render(&mut self, ui: &mut egui::Ui, status: &mut SystemStatus) {
        let snapshot = self.poller.latest();
        status.record_snapshot(&snapshot);

        ui.label(egui::RichText::new("AGENTS")
            .color(egui::Color32::from_rgb(150, 150, 150))
            .size(11.0)
            .strong());
        ui.add_space(6.0);

        let cards = snapshot.cards();
        if cards.is_empty() {
            let message = if snapshot.is_initial() {
                "Waiting for the first status cycle…"
            } else {
                "No agents responding"
            };
            ui.label(egui::RichText::new(message)
                .color(egui::Color32::from_rgb(130, 130, 130))
                .italics());
            return;
        }

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
            for card in cards {
                render_card(ui, card);
            }
        });
    }
}

impl Drop for HeroView {
    fn drop(&mut self) {
        // The poller cancels its loop when it is dropped with the view.
        info!("Agent view closed, stopping status poller");
    }
}

fn render_card(ui: &mut egui::Ui, card: &DisplayCard) {
    egui::Frame::group(ui.style())
        .fill(egui::Color32::from_rgb(30, 32, 36))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(90, 90, 90)))
        .corner_radius(6.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&card.name)
                    .size(18.0)
                    .strong()
                    .color(egui::Color32::WHITE));

                ui.label(egui::RichText::new(&card.address)
                    .monospace()
                    .size(12.0)
                    .color(egui::Color32::from_rgb(200, 200, 200)));

                let round = AgentRound::from_name(&card.status);
                ui.label(egui::RichText::new(&card.status)
                    .size(12.0)
                    .color(phase_color(round.phase())))
                    .on_hover_text(round.label());

                if ui.link("View on Polygonscan").clicked() {
                    if let Err(e) = webbrowser::open(&card.link) {
                        error!("Failed to open {}: {}", card.link, e);
                    }
                }
            });
        });
}

fn phase_color(phase: RoundPhase) -> egui::Color32 {
    match phase {
        RoundPhase::Registering => egui::Color32::from_rgb(150, 200, 220),
        RoundPhase::Working => egui::Color32::from_rgb(255, 200, 100),
        RoundPhase::Submitting => egui::Color32::from_rgb(255, 100, 150),
        RoundPhase::Idle => egui::Color32::from_rgb(100, 255, 100),
        RoundPhase::Unknown => egui::Color32::from_rgb(180, 180, 180),
    }
}

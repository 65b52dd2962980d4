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

use chrono::Utc;

use crate::status::{DiagnosticLevel, EndpointHealth, SystemStatus};

#[derive(Debug)]
pub struct StatusPane {
    pub visible: bool,
    pub collapsed: bool,
}

impl StatusPane {
    pub fn new(visible: bool) -> Self {
        Self {
            visible,
            collapsed: false,
        }
    }

    /// Render the status pane as a floating window
    pub fn render(&mut self, ctx: &egui::Context, status: &SystemStatus) {
        if !self.visible {
            // Show a small button to re-open the status pane when hidden
            egui::Window::new("show_status")
                .title_bar(false)
                .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
                .fixed_size(egui::vec2(140.0, 35.0))
                .resizable(false)
                .frame(egui::Frame::window(&ctx.style())
                    .fill(egui::Color32::from_rgba_unmultiplied(25, 30, 35, 200))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(60, 80, 100)))
                    .corner_radius(6.0))
                .show(ctx, |ui| {
                    if ui.button(egui::RichText::new("📊 Show Status")
                        .color(egui::Color32::from_rgb(150, 200, 220))
                        .size(11.0))
                        .clicked() {
                        self.visible = true;
                    }
                });
            return;
        }

        egui::Window::new("Agent Status")
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
            .default_width(320.0)
            .resizable(false)
            .collapsible(false)
            .title_bar(false)
            .frame(egui::Frame::window(&ctx.style())
                .fill(egui::Color32::from_rgba_unmultiplied(25, 30, 35, 230))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(60, 80, 100)))
                .corner_radius(6.0))
            .show(ctx, |ui| {
                ui.set_width(304.0);

                // Header with collapse and close buttons
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("◈ STATUS")
                        .color(egui::Color32::from_rgb(100, 180, 220))
                        .size(12.0)
                        .strong());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(egui::RichText::new("✕")
                            .size(12.0)
                            .color(egui::Color32::from_rgb(200, 100, 100)))
                            .on_hover_text("Hide status pane")
                            .clicked() {
                            self.visible = false;
                        }

                        ui.add_space(4.0);

                        let collapse_icon = if self.collapsed { "▼" } else { "▲" };
                        if ui.button(egui::RichText::new(collapse_icon).size(10.0))
                            .on_hover_text(if self.collapsed { "Expand" } else { "Collapse" })
                            .clicked() {
                            self.collapsed = !self.collapsed;
                        }
                    });
                });

                if self.collapsed {
                    return;
                }

                ui.separator();

                egui::ScrollArea::vertical()
                    .max_height(420.0)
                    .show(ui, |ui| {
                        Self::render_endpoints_section(ui, status);
                        ui.add_space(6.0);
                        Self::render_cycle_section(ui, status);
                        ui.add_space(6.0);
                        Self::render_diagnostics_section(ui, status);
                    });
            });
    }

    fn render_endpoints_section(ui: &mut egui::Ui, status: &SystemStatus) {
        ui.label(egui::RichText::new(format!("ENDPOINTS  {}/{}",
            status.answering_count(), status.endpoints.len()))
            .color(egui::Color32::from_rgb(150, 150, 150))
            .size(10.0)
            .strong());

        ui.add_space(3.0);

        for endpoint in &status.endpoints {
            ui.horizontal(|ui| {
                let (icon, color) = match endpoint.health {
                    EndpointHealth::Answering => ("●", egui::Color32::from_rgb(100, 255, 100)),
                    EndpointHealth::Skipped => ("✕", egui::Color32::from_rgb(255, 100, 100)),
                    EndpointHealth::Unknown => ("○", egui::Color32::from_rgb(150, 150, 150)),
                };

                ui.label(egui::RichText::new(icon)
                    .color(color)
                    .size(10.0));

                let response = ui.label(egui::RichText::new(format!("#{} {}", endpoint.ordinal, endpoint.endpoint))
                    .color(egui::Color32::from_rgb(180, 180, 180))
                    .size(8.5)
                    .monospace());
                if let Some(error) = &endpoint.last_error {
                    response.on_hover_text(error);
                } else if let Some(at) = endpoint.last_success_at {
                    response.on_hover_text(format!("Last answer at {}", at.format("%H:%M:%S")));
                }

                ui.label(egui::RichText::new(format!("{}✓ {}✕", endpoint.success_count, endpoint.failure_count))
                    .color(egui::Color32::from_rgb(130, 130, 130))
                    .size(8.0)
                    .monospace());
            });
        }
    }

    fn render_cycle_section(ui: &mut egui::Ui, status: &SystemStatus) {
        ui.label(egui::RichText::new("POLLING")
            .color(egui::Color32::from_rgb(150, 150, 150))
            .size(10.0)
            .strong());

        ui.add_space(3.0);

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Cycle:")
                .color(egui::Color32::from_rgb(130, 130, 130))
                .size(9.0));
            let text = if status.last_sequence == 0 {
                "waiting".to_string()
            } else {
                format!("#{} ({} seen)", status.last_sequence, status.cycles_observed)
            };
            ui.label(egui::RichText::new(text)
                .color(egui::Color32::from_rgb(200, 200, 200))
                .size(9.0)
                .monospace());
        });

        if let Some(last) = status.last_cycle_at {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Age:")
                    .color(egui::Color32::from_rgb(130, 130, 130))
                    .size(9.0));
                let age = (Utc::now() - last).num_seconds().max(0).unsigned_abs();
                ui.label(egui::RichText::new(format_duration(age))
                    .color(egui::Color32::from_rgb(200, 200, 200))
                    .size(9.0)
                    .monospace());
            });
        }

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Duration:")
                .color(egui::Color32::from_rgb(130, 130, 130))
                .size(9.0));

            let color = if status.average_cycle_duration_ms < 250.0 {
                egui::Color32::from_rgb(100, 255, 100)
            } else if status.average_cycle_duration_ms < 1000.0 {
                egui::Color32::from_rgb(255, 200, 100)
            } else {
                egui::Color32::from_rgb(255, 100, 100)
            };

            ui.label(egui::RichText::new(format!("{:.0}ms (avg {:.0}ms)",
                status.last_cycle_duration_ms, status.average_cycle_duration_ms))
                .color(color)
                .size(9.0)
                .monospace());
        });
    }

    fn render_diagnostics_section(ui: &mut egui::Ui, status: &SystemStatus) {
        ui.label(egui::RichText::new("DIAGNOSTICS")
            .color(egui::Color32::from_rgb(150, 150, 150))
            .size(10.0)
            .strong());

        ui.add_space(3.0);

        if status.diagnostics.is_empty() {
            ui.label(egui::RichText::new("No messages")
                .color(egui::Color32::from_rgb(100, 100, 100))
                .size(8.0)
                .italics());
            return;
        }

        // Each line is approximately 14 pixels tall (icon + text + spacing)
        let line_height = 14.0;
        let max_visible_lines = 6.0;

        egui::ScrollArea::vertical()
            .id_salt("diagnostics")
            .max_height(line_height * max_visible_lines)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                // Newest first
                for diagnostic in status.diagnostics.iter().rev() {
                    ui.horizontal(|ui| {
                        let (icon, color) = match diagnostic.level {
                            DiagnosticLevel::Info => ("ℹ", egui::Color32::from_rgb(100, 180, 255)),
                            DiagnosticLevel::Warning => ("⚠", egui::Color32::from_rgb(255, 200, 100)),
                            DiagnosticLevel::Error => ("✕", egui::Color32::from_rgb(255, 100, 100)),
                        };

                        ui.label(egui::RichText::new(icon)
                            .color(color)
                            .size(9.0));

                        let time_str = diagnostic.timestamp.format("%H:%M:%S").to_string();
                        ui.label(egui::RichText::new(time_str)
                            .color(egui::Color32::from_rgb(100, 100, 100))
                            .size(8.0)
                            .monospace());

                        ui.label(egui::RichText::new(truncate_message(&diagnostic.message, 40))
                            .color(egui::Color32::from_rgb(180, 180, 180))
                            .size(8.0))
                            .on_hover_text(&diagnostic.message);
                    });
                }
            });
    }
}

fn truncate_message(message: &str, max_chars: usize) -> String {
    if message.chars().count() > max_chars {
        let head: String = message.chars().take(max_chars).collect();
        format!("{head}...")
    } else {
        message.to_string()
    }
}

fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(5), "5s");
        assert_eq!(format_duration(65), "1m 5s");
        assert_eq!(format_duration(3725), "1h 2m 5s");
    }

    #[test]
    fn test_truncate_message_is_char_safe() {
        assert_eq!(truncate_message("short", 40), "short");
        assert_eq!(truncate_message("ééééé", 3), "ééé...");
    }
}

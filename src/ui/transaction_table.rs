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

//! Static transaction table with health factor bars.

use egui_extras::{Column, TableBuilder};

use crate::transactions::{max_rows, TransactionGroup, TransactionRecord, TRANSACTION_GROUPS};

const ROW_HEIGHT: f32 = 96.0;

#[derive(Debug, Default)]
pub struct TransactionTable {
    /// Hash of the clicked row, shown in a dialog.
    selected: Option<&'static str>,
}

impl TransactionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ui: &mut egui::Ui) {
        self.render_groups(ui, &TRANSACTION_GROUPS);
        self.render_details(ui.ctx());
    }

    fn render_groups(&mut self, ui: &mut egui::Ui, groups: &[TransactionGroup]) {
        ui.label(egui::RichText::new("TRANSACTIONS")
            .color(egui::Color32::from_rgb(150, 150, 150))
            .size(11.0)
            .strong());
        ui.add_space(6.0);

        let rows = max_rows(groups);

        TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .vscroll(false)
            .cell_layout(egui::Layout::top_down(egui::Align::Min))
            .columns(Column::remainder().at_least(180.0), groups.len())
            .header(28.0, |mut header| {
                for group in groups {
                    header.col(|ui| {
                        ui.label(egui::RichText::new(group.title).size(15.0).strong());
                    });
                }
            })
            .body(|mut body| {
                for row_index in 0..rows {
                    body.row(ROW_HEIGHT, |mut row| {
                        for group in groups {
                            row.col(|ui| {
                                if let Some(record) = group.records.get(row_index) {
                                    if render_record(ui, record) {
                                        self.selected = Some(record.address);
                                    }
                                }
                            });
                        }
                    });
                }
            });
    }

    fn render_details(&mut self, ctx: &egui::Context) {
        let Some(hash) = self.selected else {
            return;
        };

        let mut open = true;
        egui::Window::new("Transaction")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(format!("Transaction Hash: {hash}"));
            });

        if !open {
            self.selected = None;
        }
    }
}

/// Draw one cell. Returns whether the user clicked the hash.
fn render_record(ui: &mut egui::Ui, record: &TransactionRecord) -> bool {
    let clicked = ui
        .add(egui::Label::new(egui::RichText::new(format!("Transaction Hash: {}", record.address))
            .monospace()
            .size(11.0))
            .sense(egui::Sense::click()))
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .clicked();

    if let Some(asset) = record.asset {
        ui.label(format!("Assets: {asset}"));
    }

    if let (Some(health_factor), Some(progress)) = (record.health_factor, record.health_progress()) {
        ui.label(format!("Health Factor : {health_factor}"));
        ui.add(egui::ProgressBar::new(progress)
            .text(format!("{health_factor}"))
            .fill(egui::Color32::from_rgb(130, 90, 220)));
    }

    clicked
}

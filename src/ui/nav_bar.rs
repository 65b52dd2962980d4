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

//! Top navigation bar: title, page links and the wallet button.

use log::debug;

use crate::config::NavLink;
use crate::ui::wallet_widget::WalletWidget;
use crate::wallet::WalletConnector;

const TITLE: &str = "Liquidation Station";

/// Below this width the links collapse behind a burger toggle.
const COLLAPSE_WIDTH: f32 = 640.0;

#[derive(Debug)]
pub struct NavBar {
    links: Vec<NavLink>,
    active: String,
    menu_open: bool,
}

impl NavBar {
    /// The first link starts out active.
    pub fn new(links: Vec<NavLink>) -> Self {
        let active = links.first().map(|l| l.link.clone()).unwrap_or_default();
        Self {
            links,
            active,
            menu_open: false,
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    /// Mark `link` active. Returns whether the selection changed.
    pub fn select(&mut self, link: &str) -> bool {
        if self.active == link {
            return false;
        }
        debug!("Navigating from '{}' to '{}'", self.active, link);
        self.active = link.to_string();
        self.menu_open = false;
        true
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Render the bar. Returns the newly selected link, if the user changed it.
    pub fn render<W: WalletConnector>(
        &mut self,
        ui: &mut egui::Ui,
        wallet: &mut WalletWidget<W>,
    ) -> Option<String> {
        let collapsed = ui.available_width() < COLLAPSE_WIDTH;
        let mut clicked = None;

        ui.horizontal(|ui| {
            ui.set_min_height(56.0);

            if collapsed {
                let icon = if self.menu_open { "✕" } else { "☰" };
                if ui.button(egui::RichText::new(icon).size(16.0)).clicked() {
                    self.toggle_menu();
                }
            } else {
                clicked = self.render_links(ui);
            }

            ui.add_space(12.0);
            ui.label(egui::RichText::new(TITLE)
                .size(20.0)
                .monospace()
                .strong()
                .color(egui::Color32::from_rgb(220, 220, 220)));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                wallet.render(ui);
            });
        });

        if collapsed && self.menu_open {
            ui.vertical(|ui| {
                if let Some(link) = self.render_links(ui) {
                    clicked = Some(link);
                }
            });
        }

        let link = clicked?;
        self.select(&link).then_some(link)
    }

    fn render_links(&self, ui: &mut egui::Ui) -> Option<String> {
        let mut clicked = None;
        for link in &self.links {
            let selected = self.active == link.link;
            let text = egui::RichText::new(&link.label).size(15.0);
            let text = if selected {
                text.color(egui::Color32::BLACK)
            } else {
                text.color(egui::Color32::from_rgb(200, 200, 200))
            };
            if ui.selectable_label(selected, text).clicked() {
                clicked = Some(link.link.clone());
            }
        }
        clicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links() -> Vec<NavLink> {
        vec![NavLink::new("Home", "/"), NavLink::new("Positions", "/positions")]
    }

    #[test]
    fn test_first_link_is_active() {
        let nav = NavBar::new(links());
        assert_eq!(nav.active(), "/");
        assert_eq!(NavBar::new(Vec::new()).active(), "");
    }

    #[test]
    fn test_select_only_reports_changes() {
        let mut nav = NavBar::new(links());
        assert!(!nav.select("/"));
        assert!(nav.select("/positions"));
        assert_eq!(nav.active(), "/positions");
        assert!(!nav.select("/positions"));
    }

    #[test]
    fn test_selecting_closes_menu() {
        let mut nav = NavBar::new(links());
        nav.toggle_menu();
        assert!(nav.menu_open);
        nav.select("/positions");
        assert!(!nav.menu_open);
    }
}

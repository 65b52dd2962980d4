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

//! Top-level dashboard application.

use std::time::Duration;

use eframe::egui;
use log::{error, info};

use crate::config::AppConfig;
use crate::status::SystemStatus;
use crate::ui::{HeroView, NavBar, StatusPane, TransactionTable, WalletWidget};
use crate::wallet::ManualWallet;

/// Link of the page that shows the agent cards.
pub const HOME_LINK: &str = "/";

/// Upper bound on the idle repaint period so the status pane's age ticks.
const MAX_REPAINT_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug)]
pub struct DashboardApp {
    config: AppConfig,
    runtime: tokio::runtime::Handle,
    nav: NavBar,
    wallet: WalletWidget<ManualWallet>,
    /// Present only while the home page is displayed.
    hero: Option<HeroView>,
    hero_error: Option<String>,
    transactions: TransactionTable,
    status: SystemStatus,
    status_pane: StatusPane,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, runtime: tokio::runtime::Handle) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let wallet = ManualWallet::new(config.chain(), config.resolve_provider_url());
        let status = SystemStatus::new(&config.endpoint_table());

        Self {
            nav: NavBar::new(config.nav_links()),
            wallet: WalletWidget::new(wallet),
            hero: None,
            hero_error: None,
            transactions: TransactionTable::new(),
            status,
            status_pane: StatusPane::new(config.show_status_pane),
            runtime,
            config,
        }
    }

    /// Start or stop the agent view to match the active page.
    fn sync_hero(&mut self) {
        match hero_transition(self.nav.active(), self.hero.is_some(), self.hero_error.is_some()) {
            HeroTransition::Keep => {}
            HeroTransition::Stop => {
                // Dropping the view stops its poller.
                self.hero = None;
                self.hero_error = None;
            }
            HeroTransition::Start => match HeroView::start(&self.runtime, &self.config) {
                Ok(hero) => self.hero = Some(hero),
                Err(e) => {
                    error!("Failed to start status poller: {}", e);
                    self.hero_error = Some(e.to_string());
                }
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeroTransition {
    Start,
    Stop,
    Keep,
}

/// Decide what happens to the agent view for the active page. A failed
/// start counts as present so it is not retried every frame, and is cleared
/// once the user leaves the page.
fn hero_transition(active_link: &str, running: bool, failed: bool) -> HeroTransition {
    match (active_link == HOME_LINK, running || failed) {
        (true, false) => HeroTransition::Start,
        (false, true) => HeroTransition::Stop,
        _ => HeroTransition::Keep,
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(self.config.poll_interval().min(MAX_REPAINT_INTERVAL));

        let navigated = egui::TopBottomPanel::top("nav_bar")
            .frame(egui::Frame::NONE
                .fill(egui::Color32::from_rgb(23, 23, 23))
                .inner_margin(egui::Margin::symmetric(16, 0)))
            .show(ctx, |ui| self.nav.render(ui, &mut self.wallet))
            .inner;

        if let Some(link) = navigated {
            info!("Switched page to '{}'", link);
        }
        self.sync_hero();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE
                .fill(egui::Color32::from_rgb(23, 23, 23))
                .inner_margin(egui::Margin::same(24)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if let Some(hero) = self.hero.as_mut() {
                        hero.render(ui, &mut self.status);
                        ui.add_space(32.0);
                    } else if let Some(error) = &self.hero_error {
                        ui.label(egui::RichText::new(format!("Status polling unavailable: {error}"))
                            .color(egui::Color32::from_rgb(255, 100, 100)));
                        ui.add_space(32.0);
                    }

                    self.transactions.render(ui);
                });
            });

        self.status_pane.render(ctx, &self.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_page_starts_agent_view_once() {
        assert_eq!(hero_transition(HOME_LINK, false, false), HeroTransition::Start);
        assert_eq!(hero_transition(HOME_LINK, true, false), HeroTransition::Keep);
    }

    #[test]
    fn test_leaving_home_stops_agent_view() {
        assert_eq!(hero_transition("/positions", true, false), HeroTransition::Stop);
        assert_eq!(hero_transition("/positions", false, false), HeroTransition::Keep);
    }

    #[test]
    fn test_failed_start_is_retried_after_navigating_back() {
        // Stays failed on the home page instead of retrying every frame.
        assert_eq!(hero_transition(HOME_LINK, false, true), HeroTransition::Keep);
        // Leaving clears the failure, so coming back starts again.
        assert_eq!(hero_transition("/positions", false, true), HeroTransition::Stop);
        assert_eq!(hero_transition(HOME_LINK, false, false), HeroTransition::Start);
    }
}

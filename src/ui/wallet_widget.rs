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

//! Connect-wallet button and dialog.

use log::warn;

use crate::wallet::{shorten_account, WalletConnector, WalletState};

#[derive(Debug)]
pub struct WalletWidget<W: WalletConnector> {
    connector: W,
    dialog_open: bool,
    input: String,
    error: Option<String>,
}

impl<W: WalletConnector> WalletWidget<W> {
    pub fn new(connector: W) -> Self {
        Self {
            connector,
            dialog_open: false,
            input: String::new(),
            error: None,
        }
    }

    pub fn state(&self) -> &WalletState {
        self.connector.state()
    }

    /// Button label for the current state.
    pub fn button_label(&self) -> String {
        match self.connector.state() {
            WalletState::Disconnected => "Connect Wallet".to_string(),
            WalletState::Connected { account, chain } => {
                format!("{} · {}", shorten_account(account), chain.name())
            }
        }
    }

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
        self.error = None;
    }

    /// Try to connect with the typed account. Closes the dialog on success.
    pub fn submit(&mut self) {
        match self.connector.connect(&self.input) {
            Ok(()) => {
                self.dialog_open = false;
                self.input.clear();
                self.error = None;
            }
            Err(e) => {
                warn!("Wallet connection rejected: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn disconnect(&mut self) {
        self.connector.disconnect();
        self.dialog_open = false;
    }

    /// Render the button inline and, when open, the dialog as a window.
    pub fn render(&mut self, ui: &mut egui::Ui) {
        let connected = self.connector.state().is_connected();
        let button = egui::Button::new(egui::RichText::new(self.button_label())
            .size(13.0)
            .color(if connected {
                egui::Color32::from_rgb(100, 255, 100)
            } else {
                egui::Color32::WHITE
            }))
            .fill(egui::Color32::from_rgb(40, 45, 55))
            .corner_radius(6.0);

        if ui.add(button).clicked() {
            self.open_dialog();
        }

        if self.dialog_open {
            self.render_dialog(ui.ctx());
        }
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let mut open = self.dialog_open;
        let chain = self.connector.target_chain();

        egui::Window::new("Wallet")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 64.0))
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(format!("Network: {chain}"))
                    .color(egui::Color32::from_rgb(150, 200, 220))
                    .size(11.0));
                let provider = self.connector.provider_url().map_or("not configured", |_| "configured");
                ui.label(egui::RichText::new(format!("Provider: {provider}"))
                    .color(egui::Color32::from_rgb(130, 130, 130))
                    .size(10.0));
                ui.add_space(6.0);

                if let Some(account) = self.connector.state().account().map(ToString::to_string) {
                    ui.label(egui::RichText::new(account).monospace().size(11.0));
                    ui.add_space(6.0);
                    if ui.button("Disconnect").clicked() {
                        self.disconnect();
                    }
                    return;
                }

                let response = ui.add(egui::TextEdit::singleline(&mut self.input)
                    .hint_text("0x…")
                    .desired_width(320.0)
                    .font(egui::TextStyle::Monospace));
                let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                if ui.button("Connect").clicked() || submitted {
                    self.submit();
                }

                if let Some(error) = &self.error {
                    ui.label(egui::RichText::new(error)
                        .color(egui::Color32::from_rgb(255, 100, 100))
                        .size(10.0));
                }
            });

        // Closing via the title bar, or a connect/disconnect inside the window.
        self.dialog_open = open && self.dialog_open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::{ChainId, ManualWallet};

    const ACCOUNT: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn widget() -> WalletWidget<ManualWallet> {
        WalletWidget::new(ManualWallet::new(ChainId::POLYGON, None))
    }

    #[test]
    fn test_submit_valid_account_closes_dialog() {
        let mut widget = widget();
        widget.open_dialog();
        widget.input = ACCOUNT.to_string();
        widget.submit();

        assert!(!widget.dialog_open);
        assert!(widget.input.is_empty());
        assert_eq!(widget.state().account(), Some(ACCOUNT));
        assert_eq!(widget.button_label(), "0x5aAe…eAed · Polygon");
    }

    #[test]
    fn test_submit_invalid_account_keeps_dialog_open() {
        let mut widget = widget();
        widget.open_dialog();
        widget.input = "not-an-address".to_string();
        widget.submit();

        assert!(widget.dialog_open);
        assert!(widget.error.as_deref().unwrap().contains("not-an-address"));
        assert_eq!(widget.button_label(), "Connect Wallet");
    }

    #[test]
    fn test_disconnect_resets_label() {
        let mut widget = widget();
        widget.input = ACCOUNT.to_string();
        widget.submit();
        widget.disconnect();
        assert_eq!(widget.button_label(), "Connect Wallet");
    }
}

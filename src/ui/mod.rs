//! UI components for the Liquidation Station dashboard.

pub mod hero;
pub mod nav_bar;
pub mod status_pane;
pub mod transaction_table;
pub mod wallet_widget;

pub use hero::HeroView;
pub use nav_bar::NavBar;
pub use status_pane::StatusPane;
pub use transaction_table::TransactionTable;
pub use wallet_widget::WalletWidget;

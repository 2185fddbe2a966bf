mod activation;
mod panel;
mod panel_state;
mod setting_key;

pub use {
    activation::Activation, panel::SettingsPanel, panel_state::PanelState,
    setting_key::SettingKey,
};

mod command;
mod dispatcher;
mod host_request;
mod host_settings;

pub use {
    command::{Command, SET_VAR, decode_bool, encode_bool},
    dispatcher::{ChannelDispatcher, CommandDispatcher, DispatchOutcome},
    host_request::{HostRejection, HostReply, HostRequest},
    host_settings::{HostSettings, SettingChange},
};

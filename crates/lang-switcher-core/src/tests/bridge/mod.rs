mod command;
mod dispatcher;
mod host_settings;

mod bridge;
mod settings;

pub(crate) use recording_dispatcher::RecordingDispatcher;

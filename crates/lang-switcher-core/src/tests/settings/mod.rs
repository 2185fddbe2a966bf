mod activation;
mod panel;

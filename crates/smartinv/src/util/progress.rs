use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(message: &str, hidden: bool) -> ProgressBar {
    let spinner = if hidden {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner
}

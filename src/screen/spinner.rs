use std::time::Duration;
use indicatif::ProgressBar;
use crate::error::LookupError;
use crate::postal::LookupService;
use crate::postal::model::{Pincode, ServiceReply};

/// Busy indicator on stderr, cleared when dropped.
///
/// indicatif keeps it hidden when stderr is not a terminal.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn show(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_message(message.to_string());
        Self { bar }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Shows a [`Spinner`] for exactly as long as the wrapped lookup runs.
pub struct WithSpinner<S> {
    inner: S,
}

impl<S> WithSpinner<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: LookupService> LookupService for WithSpinner<S> {
    async fn lookup(&self, pincode: &Pincode) -> Result<ServiceReply, LookupError> {
        let _spinner = Spinner::show(&format!("Looking up {}…", pincode));
        self.inner.lookup(pincode).await
    }
}

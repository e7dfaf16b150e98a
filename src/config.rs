use log::Level;

/// Timings and thresholds shared by the page behaviors.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Header gets the `scrolled` class once `scrollY` is strictly above this.
    pub scroll_threshold: f64,
    /// Extra space left above a scroll target, on top of the header height.
    pub scroll_padding: f64,
    pub hash_settle_ms: u32,
    pub submit_delay_ms: u32,
    pub error_dismiss_ms: u32,
    pub reveal_threshold: f64,
    pub reveal_root_margin: &'static str,
    pub lazy_root_margin: &'static str,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 50.0,
            scroll_padding: 20.0,
            hash_settle_ms: 100,
            submit_delay_ms: 1_500,
            error_dismiss_ms: 5_000,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px",
            lazy_root_margin: "50px 0px",
        }
    }
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

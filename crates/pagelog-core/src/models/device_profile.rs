use serde::{Deserialize, Serialize};

/// Browser/device characteristics used to derive a fingerprint.
/// Any field the host cannot read is left `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    pub user_agent: Option<String>,
    pub language: Option<String>,
    pub screen_width: Option<u32>,
    pub screen_height: Option<u32>,
    pub color_depth: Option<u32>,
    pub timezone: Option<String>,
    pub hardware_concurrency: Option<u32>,
    /// Approximate device memory in GiB, as reported by the browser.
    pub device_memory: Option<String>,
}

impl DeviceProfile {
    /// `WIDTHxHEIGHT` when both dimensions are known.
    pub fn screen_resolution(&self) -> Option<String> {
        match (self.screen_width, self.screen_height) {
            (Some(w), Some(h)) => Some(format!("{w}x{h}")),
            _ => None,
        }
    }
}

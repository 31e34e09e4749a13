use crate::models::DeviceProfile;

/// Read-only view of the current document, queried on demand.
pub trait PageContext {
    fn url(&self) -> String;
    fn path(&self) -> String;
    fn title(&self) -> String;
    fn referrer(&self) -> String;
    fn device_profile(&self) -> DeviceProfile;
}

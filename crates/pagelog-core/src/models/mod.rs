mod descriptors;
mod device_profile;
mod host_event;

pub use descriptors::{FormDescriptor, TargetDescriptor};
pub use device_profile::DeviceProfile;
pub use host_event::{HostEvent, HostEventKind};

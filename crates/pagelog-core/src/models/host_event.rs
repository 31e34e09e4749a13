use super::{FormDescriptor, TargetDescriptor};

/// A page event forwarded by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Click(TargetDescriptor),
    FormSubmit(FormDescriptor),
    /// Back/forward history navigation.
    Navigation,
    /// The page is about to be torn down.
    Unload,
}

impl HostEvent {
    pub fn kind(&self) -> HostEventKind {
        match self {
            Self::Click(_) => HostEventKind::Click,
            Self::FormSubmit(_) => HostEventKind::FormSubmit,
            Self::Navigation => HostEventKind::Navigation,
            Self::Unload => HostEventKind::Unload,
        }
    }
}

/// Listener categories the collector subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    Click,
    FormSubmit,
    Navigation,
    Unload,
}

impl HostEventKind {
    pub const ALL: [HostEventKind; 4] = [
        HostEventKind::Click,
        HostEventKind::FormSubmit,
        HostEventKind::Navigation,
        HostEventKind::Unload,
    ];
}

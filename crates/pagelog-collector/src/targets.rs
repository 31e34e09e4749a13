//! Best-effort naming of interaction targets.

use pagelog_core::constants::UNKNOWN_TARGET;
use pagelog_core::models::{FormDescriptor, TargetDescriptor};

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Element id, else lowercased tag name, else the placeholder.
pub(crate) fn click_target(target: &TargetDescriptor) -> String {
    non_empty(target.id.as_deref())
        .map(str::to_string)
        .or_else(|| non_empty(target.tag_name.as_deref()).map(str::to_ascii_lowercase))
        .unwrap_or_else(|| UNKNOWN_TARGET.to_string())
}

/// Form id, else form name, else the placeholder.
pub(crate) fn form_target(form: &FormDescriptor) -> String {
    non_empty(form.id.as_deref())
        .or_else(|| non_empty(form.name.as_deref()))
        .unwrap_or(UNKNOWN_TARGET)
        .to_string()
}

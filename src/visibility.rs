//! Visibility classification from dotted names alone.
//!
//! A segment starting with [`PRIVATE_MARKER`] is private. Module paths are
//! path-inclusive (any private segment makes the whole path private); class,
//! function and attribute checks only look at the final segment. The
//! constructor ([`CONSTRUCTOR_NAME`]) is exempt at the attribute level only.
//!
//! Empty names are treated as public and logged: dropping an ambiguous name
//! would silently shrink the reported surface.

/// Leading character that marks a name segment as private.
pub const PRIVATE_MARKER: char = '_';

/// Special member that is public regardless of its leading marker.
pub const CONSTRUCTOR_NAME: &str = "__init__";

fn is_private_segment(segment: &str) -> bool {
    segment.starts_with(PRIVATE_MARKER)
}

fn final_segment(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or_default()
}

fn empty(name: &str, check: &str) -> bool {
    if name.is_empty() {
        tracing::warn!(check, "empty name passed to visibility check, treating as public");
        return true;
    }
    false
}

/// True if any dot-segment is private (`pkg._internal.mod`).
pub fn is_private_module_path(name: &str) -> bool {
    if empty(name, "module_path") {
        return false;
    }
    name.split('.').any(is_private_segment)
}

/// True if the final segment is private (`pkg._Class`).
pub fn is_private_class_name(name: &str) -> bool {
    if empty(name, "class_name") {
        return false;
    }
    is_private_segment(final_segment(name))
}

/// True if the final segment is private. The constructor is not exempt.
pub fn is_private_function_name(name: &str) -> bool {
    if empty(name, "function_name") {
        return false;
    }
    is_private_segment(final_segment(name))
}

/// True if the final segment is private and is not the constructor.
pub fn is_private_attribute_name(name: &str) -> bool {
    if empty(name, "attribute_name") {
        return false;
    }
    let attr = final_segment(name);
    is_private_segment(attr) && attr != CONSTRUCTOR_NAME
}

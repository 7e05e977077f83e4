//! Component instance linkage.

use distill_core::{InstanceContent, RawNode};

/// Main component name, variant properties, and component description.
///
/// A failed main-component lookup simply leaves `comp` out.
pub fn instance_content(node: &RawNode) -> InstanceContent {
    let component = node.main_component.as_ref();
    InstanceContent {
        comp: component.map(|c| c.name.clone()),
        props: (!node.variant_properties.is_empty()).then(|| node.variant_properties.clone()),
        comp_desc: component
            .and_then(|c| c.description.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from),
    }
}

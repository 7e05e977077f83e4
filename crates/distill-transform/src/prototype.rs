//! Prototype reactions as interaction hints.

use distill_core::{Action, Interaction, Num, RawNode};

/// Host enum name in output form: `ON_CLICK` → `click`, `SMART_ANIMATE` → `smart-animate`.
fn event_name(raw: &str) -> String {
    raw.trim_start_matches("ON_").to_ascii_lowercase().replace('_', "-")
}

fn action_name(action: &Action) -> String {
    match action.action_type.as_str() {
        "NODE" => "navigate".to_string(),
        "URL" => "open-url".to_string(),
        other => event_name(other),
    }
}

/// One interaction per reaction action, in declaration order.
///
/// Reactions without a trigger are skipped. Destinations whose name could
/// not be resolved keep the action but drop `to`.
pub fn interactions(node: &RawNode) -> Vec<Interaction> {
    node.reactions
        .iter()
        .filter_map(|reaction| reaction.trigger.as_ref().map(|t| (t, reaction)))
        .flat_map(|(trigger, reaction)| {
            reaction.actions().map(move |action| Interaction {
                on: event_name(&trigger.trigger_type),
                action: action_name(action),
                to: action.destination_name.clone(),
                url: action.url.clone(),
                transition: action
                    .transition
                    .as_ref()
                    .map(|t| event_name(&t.transition_type)),
                duration_ms: action
                    .transition
                    .as_ref()
                    .and_then(|t| t.duration)
                    .filter(|d| *d > 0.0)
                    .map(|d| Num::px(d * 1000.0)),
            })
        })
        .collect()
}

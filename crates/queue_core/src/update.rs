use crate::{Effect, Msg, QueueState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: QueueState, msg: Msg) -> (QueueState, Vec<Effect>) {
    let effects = match msg {
        Msg::ControlClicked { entry_id, control } => {
            if state.entry_status(entry_id).is_none() {
                return (state, Vec::new());
            }
            let routed = state.config().router.resolve(control.classes());
            match routed {
                // Handled clicks never navigate, even when the guard drops them.
                Some(action) => state
                    .begin_request(entry_id, action, control.href)
                    .map(Effect::SendRequest)
                    .into_iter()
                    .collect(),
                None => vec![Effect::FollowLink { href: control.href }],
            }
        }
        Msg::RequestCompleted {
            request_id,
            entry_id,
            outcome,
        } => state.complete_request(request_id, entry_id, outcome),
        Msg::MessageHideElapsed {
            entry_id,
            generation,
        } => {
            state.hide_message(entry_id, generation);
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}

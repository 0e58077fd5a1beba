//! Update function for the Elm-style architecture
//!
//! All caret state transformations flow through [`update`].

use crate::commands::Cmd;
use crate::messages::CaretMsg;
use crate::model::CaretModel;

#[cfg(debug_assertions)]
use crate::tracing::CaretSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

/// Main update function
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut CaretModel, msg: CaretMsg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut CaretModel, msg: CaretMsg) -> Option<Cmd> {
    match msg {
        CaretMsg::Show(rect) => Some(model.caret.show(rect)),
        CaretMsg::Hide => model.caret.hide(),
        CaretMsg::BlinkTick => model.caret.on_tick(),
        CaretMsg::Poll(now) => model.caret.poll(now),
        CaretMsg::SetBlinkConfig(config) => model.caret.set_timer_config(config),

        CaretMsg::ScrollTo(offset) => {
            if model.host.scroll == offset {
                return None;
            }
            model.host.scroll = offset;
            Some(Cmd::Redraw)
        }

        CaretMsg::SetPreedit(text) => {
            if model.host.preedit_text == text {
                return None;
            }
            model.host.preedit_text = text;
            Some(Cmd::Redraw)
        }

        CaretMsg::SetOverstrike(enabled) => {
            if model.host.overstrike == enabled {
                return None;
            }
            model.host.overstrike = enabled;
            Some(Cmd::Redraw)
        }

        CaretMsg::ToggleOverstrike => {
            model.host.overstrike = !model.host.overstrike;
            Some(Cmd::Redraw)
        }

        CaretMsg::SetCaretBrush(brush) => {
            if !model.caret.set_caret_brush(brush) {
                return None;
            }
            Some(Cmd::Redraw)
        }

        CaretMsg::SetScaleFactor(scale) => {
            if model.host.scale_factor == scale {
                return None;
            }
            model.host.scale_factor = scale;
            Some(Cmd::Redraw)
        }

        CaretMsg::SetFlowDirection(flow) => {
            model.host.text_style.flow = flow;
            model.host.has_preedit().then_some(Cmd::Redraw)
        }

        CaretMsg::ApplyTheme(theme) => {
            model.host.apply_theme(&theme);
            model.caret.set_theme_brush(theme.caret_brush());
            Some(Cmd::Redraw)
        }
    }
}

#[cfg(debug_assertions)]
fn update_traced(model: &mut CaretModel, msg: CaretMsg) -> Option<Cmd> {
    let is_noisy = msg.is_noisy();

    let msg_name = format!("{:?}", msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let before = CaretSnapshot::from_state(model.caret.state());
    let result = update_inner(model, msg);
    let after = CaretSnapshot::from_state(model.caret.state());

    if let Some(diff) = before.diff(&after) {
        if is_noisy {
            tracing::trace!(target: "caret", %diff, "state changed");
        } else {
            debug!(target: "caret", %diff, "state changed");
        }
    }

    result
}

//! The key-action resolution policy.
//!
//! [`resolve_key_action`] is the single decision point of the whole engine:
//! everything else (adapters, registry, dispatch glue) exists to feed it an
//! accurate [`KeyPress`] snapshot and to carry out the action it returns.
//!
//! The function is pure and deterministic.  It may be called from any number
//! of documents (main page plus iframes) without coordination.

use super::key_event::{KeyPress, Phase};

/// The key binding a site natively uses for "send".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeSendKey {
    /// Plain Enter submits the message (Discord, Slack, most chat apps).
    Enter,
    /// Ctrl+Enter (Cmd+Enter on macOS) submits; plain Enter does nothing
    /// special.  This is the catch-all convention for unknown sites.
    CtrlEnter,
}

/// What the dispatch layer should do with the current native event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Suppress the native event and trigger the site's send action.
    Send,
    /// Suppress the native event and insert a soft break.
    Newline,
    /// Do not intercept; let the page's native handling run.
    Pass,
}

/// Resolves one keystroke to a [`KeyAction`].
///
/// Gates are checked in order and short-circuit:
///
/// 1. Untrusted (synthetic) events pass — the engine's own dispatched key
///    sequences must never be re-intercepted.
/// 2. Events inside an IME composition session pass — composition must not
///    be interrupted.
/// 3. Non-Enter keys pass.
/// 4. Shift+Enter and Alt+Enter pass — those chords stay reserved for the
///    page's own shortcuts.
///
/// After the gates, [`NativeSendKey::Enter`] sites are handled entirely in
/// the capture phase (the site's own Enter handler must never see the key),
/// while [`NativeSendKey::CtrlEnter`] sites split across phases: capture
/// rewrites plain Enter into a soft break, and bubble issues the send for
/// the Ctrl/Cmd+Enter combo — but only if nothing earlier in the bubble
/// chain already consumed it, so a message is never submitted twice for one
/// keystroke.
pub fn resolve_key_action(
    event: &KeyPress,
    native_send_key: NativeSendKey,
    is_mac: bool,
    phase: Phase,
    default_prevented: bool,
) -> KeyAction {
    if !event.is_trusted {
        return KeyAction::Pass;
    }
    if event.is_composing {
        return KeyAction::Pass;
    }
    if !event.is_enter() {
        return KeyAction::Pass;
    }
    if event.shift || event.alt {
        return KeyAction::Pass;
    }

    // The platform-native send chord: Cmd+Enter on macOS, Ctrl+Enter elsewhere.
    let is_send_combo = if is_mac { event.meta } else { event.ctrl };
    let is_plain_enter = event.has_no_modifiers();

    match native_send_key {
        NativeSendKey::Enter => {
            // Enter-to-send sites handle the key during capture; by bubble
            // time the site has already acted, so there is nothing to do.
            if phase != Phase::Capture {
                return KeyAction::Pass;
            }
            if is_send_combo {
                return KeyAction::Send;
            }
            if is_plain_enter {
                return KeyAction::Newline;
            }
            KeyAction::Pass
        }
        NativeSendKey::CtrlEnter => match phase {
            Phase::Capture => {
                if is_plain_enter {
                    KeyAction::Newline
                } else {
                    // Any combo flows on to the bubble phase untouched.
                    KeyAction::Pass
                }
            }
            Phase::Bubble => {
                if is_send_combo && !default_prevented {
                    KeyAction::Send
                } else {
                    KeyAction::Pass
                }
            }
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Universal gates ───────────────────────────────────────────────────────

    #[test]
    fn test_untrusted_event_passes_regardless_of_convention_and_phase() {
        let press = KeyPress::enter().untrusted();
        for convention in [NativeSendKey::Enter, NativeSendKey::CtrlEnter] {
            for phase in [Phase::Capture, Phase::Bubble] {
                assert_eq!(
                    resolve_key_action(&press, convention, true, phase, false),
                    KeyAction::Pass,
                );
            }
        }
    }

    #[test]
    fn test_ime_composition_passes() {
        let press = KeyPress::enter().composing();
        assert_eq!(
            resolve_key_action(&press, NativeSendKey::Enter, true, Phase::Capture, false),
            KeyAction::Pass,
        );
    }

    #[test]
    fn test_non_enter_keys_pass() {
        for key in ["Backspace", "Delete", "a", " "] {
            let press = KeyPress::new(key);
            assert_eq!(
                resolve_key_action(&press, NativeSendKey::Enter, true, Phase::Capture, false),
                KeyAction::Pass,
            );
        }
    }

    #[test]
    fn test_shift_enter_passes_for_both_conventions() {
        let press = KeyPress::enter().with_shift();
        for convention in [NativeSendKey::Enter, NativeSendKey::CtrlEnter] {
            for phase in [Phase::Capture, Phase::Bubble] {
                assert_eq!(
                    resolve_key_action(&press, convention, true, phase, false),
                    KeyAction::Pass,
                );
            }
        }
    }

    #[test]
    fn test_alt_enter_passes() {
        let press = KeyPress::enter().with_alt();
        assert_eq!(
            resolve_key_action(&press, NativeSendKey::Enter, true, Phase::Capture, false),
            KeyAction::Pass,
        );
    }

    // ── Enter-to-send sites ───────────────────────────────────────────────────

    #[test]
    fn test_enter_sends_plain_enter_in_capture_becomes_newline() {
        let press = KeyPress::enter();
        assert_eq!(
            resolve_key_action(&press, NativeSendKey::Enter, true, Phase::Capture, false),
            KeyAction::Newline,
        );
    }

    #[test]
    fn test_enter_sends_cmd_enter_on_mac_sends() {
        let press = KeyPress::enter().with_meta();
        assert_eq!(
            resolve_key_action(&press, NativeSendKey::Enter, true, Phase::Capture, false),
            KeyAction::Send,
        );
    }

    #[test]
    fn test_enter_sends_ctrl_enter_on_windows_sends() {
        let press = KeyPress::enter().with_ctrl();
        assert_eq!(
            resolve_key_action(&press, NativeSendKey::Enter, false, Phase::Capture, false),
            KeyAction::Send,
        );
    }

    #[test]
    fn test_enter_sends_ctrl_enter_on_mac_is_not_the_send_combo() {
        // On macOS the send chord is Cmd+Enter; bare Ctrl+Enter is neither
        // the combo nor plain Enter, so it flows through untouched.
        let press = KeyPress::enter().with_ctrl();
        assert_eq!(
            resolve_key_action(&press, NativeSendKey::Enter, true, Phase::Capture, false),
            KeyAction::Pass,
        );
    }

    #[test]
    fn test_enter_sends_bubble_phase_always_passes() {
        for press in [
            KeyPress::enter(),
            KeyPress::enter().with_ctrl(),
            KeyPress::enter().with_meta(),
        ] {
            assert_eq!(
                resolve_key_action(&press, NativeSendKey::Enter, false, Phase::Bubble, false),
                KeyAction::Pass,
            );
        }
    }

    // ── Ctrl+Enter sites ──────────────────────────────────────────────────────

    #[test]
    fn test_ctrl_enter_site_plain_enter_in_capture_becomes_newline() {
        let press = KeyPress::enter();
        assert_eq!(
            resolve_key_action(&press, NativeSendKey::CtrlEnter, true, Phase::Capture, false),
            KeyAction::Newline,
        );
    }

    #[test]
    fn test_ctrl_enter_site_combo_in_capture_passes_to_bubble() {
        let press = KeyPress::enter().with_ctrl();
        assert_eq!(
            resolve_key_action(&press, NativeSendKey::CtrlEnter, false, Phase::Capture, false),
            KeyAction::Pass,
        );
    }

    #[test]
    fn test_ctrl_enter_site_combo_in_bubble_sends() {
        let press = KeyPress::enter().with_ctrl();
        assert_eq!(
            resolve_key_action(&press, NativeSendKey::CtrlEnter, false, Phase::Bubble, false),
            KeyAction::Send,
        );
    }

    #[test]
    fn test_ctrl_enter_site_cmd_enter_in_bubble_sends_on_mac() {
        let press = KeyPress::enter().with_meta();
        assert_eq!(
            resolve_key_action(&press, NativeSendKey::CtrlEnter, true, Phase::Bubble, false),
            KeyAction::Send,
        );
    }

    #[test]
    fn test_ctrl_enter_site_default_prevented_blocks_double_send() {
        // Another bubble handler (typically the page itself) already consumed
        // the combo; issuing our own send would submit the message twice.
        let press = KeyPress::enter().with_ctrl();
        assert_eq!(
            resolve_key_action(&press, NativeSendKey::CtrlEnter, false, Phase::Bubble, true),
            KeyAction::Pass,
        );
    }

    #[test]
    fn test_ctrl_enter_site_plain_enter_in_bubble_passes() {
        let press = KeyPress::enter();
        assert_eq!(
            resolve_key_action(&press, NativeSendKey::CtrlEnter, false, Phase::Bubble, false),
            KeyAction::Pass,
        );
    }
}

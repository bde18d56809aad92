//! Native event types
//!
//! Several event names are prefixes of others (`play`/`playing`,
//! `drag`/`dragend`, `load`/`loadend`), so handler names are matched
//! against the longest candidate first.

/// Event types a handler member may bind to, longest name first
pub const EVENT_TYPES: &[&str] = &[
    "securitypolicyviolation",
    "animationiteration",
    "lostpointercapture",
    "gotpointercapture",
    "selectionchange",
    "animationstart",
    "canplaythrough",
    "durationchange",
    "languagechange",
    "loadedmetadata",
    "pointercancel",
    "transitionend",
    "animationend",
    "beforeunload",
    "messageerror",
    "pointerenter",
    "pointerleave",
    "volumechange",
    "beforeinput",
    "beforeprint",
    "contextmenu",
    "pointerdown",
    "pointermove",
    "pointerover",
    "selectstart",
    "touchcancel",
    "afterprint",
    "hashchange",
    "loadeddata",
    "mouseenter",
    "mouseleave",
    "pointerout",
    "ratechange",
    "slotchange",
    "timeupdate",
    "touchstart",
    "dragenter",
    "dragleave",
    "dragstart",
    "loadstart",
    "mousedown",
    "mousemove",
    "mouseover",
    "pointerup",
    "touchmove",
    "auxclick",
    "dblclick",
    "dragover",
    "focusout",
    "formdata",
    "keypress",
    "mouseout",
    "pagehide",
    "pageshow",
    "popstate",
    "progress",
    "touchend",
    "canplay",
    "dragend",
    "emptied",
    "focusin",
    "invalid",
    "keydown",
    "loadend",
    "message",
    "mouseup",
    "offline",
    "playing",
    "seeking",
    "stalled",
    "storage",
    "suspend",
    "waiting",
    "cancel",
    "change",
    "online",
    "resize",
    "scroll",
    "seeked",
    "select",
    "submit",
    "toggle",
    "unload",
    "abort",
    "click",
    "close",
    "ended",
    "error",
    "focus",
    "input",
    "keyup",
    "paste",
    "pause",
    "reset",
    "wheel",
    "blur",
    "copy",
    "drag",
    "drop",
    "load",
    "play",
    "cut",
];

/// Event type named by the start of `rest`, case-insensitively
///
/// `rest` is a handler name with its `on` prefix removed, e.g.
/// `ClickSomething` -> `click`.
pub fn match_event_type(rest: &str) -> Option<&'static str> {
    EVENT_TYPES.iter().copied().find(|event| {
        rest.len() >= event.len()
            && rest.is_char_boundary(event.len())
            && rest[..event.len()].eq_ignore_ascii_case(event)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_longest_first() {
        for pair in EVENT_TYPES.windows(2) {
            assert!(pair[0].len() >= pair[1].len(), "{} before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_no_duplicates() {
        let mut names = EVENT_TYPES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), EVENT_TYPES.len());
    }

    #[test]
    fn test_longest_prefix_wins() {
        assert_eq!(match_event_type("ClickSomething"), Some("click"));
        assert_eq!(match_event_type("PlayingNow"), Some("playing"));
        assert_eq!(match_event_type("Play"), Some("play"));
        assert_eq!(match_event_type("dragEndItem"), Some("dragend"));
        assert_eq!(match_event_type("MouseDownOutside"), Some("mousedown"));
    }

    #[test]
    fn test_no_event() {
        assert_eq!(match_event_type("Boarding"), None);
        assert_eq!(match_event_type(""), None);
    }
}

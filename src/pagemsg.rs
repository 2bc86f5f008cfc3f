//! JSON web messages pushed to the hosted page after it loads.
//!
//! The page contract is limited to two messages: `set-theme` with the
//! current theme name, and `loadUserData` with the stored blob.

use crate::prefs::Theme;
use serde_json::{json, Value};

pub fn set_theme(theme: Theme) -> String {
    json!({ "type": "set-theme", "theme": theme.as_str() }).to_string()
}

pub fn load_user_data(data: &Value) -> String {
    json!({ "type": "loadUserData", "userData": data }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_message_names_the_theme() {
        let msg: Value = serde_json::from_str(&set_theme(Theme::Dark)).unwrap();
        assert_eq!(msg["type"], "set-theme");
        assert_eq!(msg["theme"], "dark");
    }

    #[test]
    fn absent_stored_theme_is_pushed_as_light() {
        // A store with no theme key falls back to the default.
        let msg: Value = serde_json::from_str(&set_theme(Theme::default())).unwrap();
        assert_eq!(msg["theme"], "light");
    }

    #[test]
    fn user_data_is_forwarded_verbatim() {
        let blob = json!({ "history": ["a", "b"], "count": 2 });
        let msg: Value = serde_json::from_str(&load_user_data(&blob)).unwrap();
        assert_eq!(msg["type"], "loadUserData");
        assert_eq!(msg["userData"], blob);
    }
}

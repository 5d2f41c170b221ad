// Centralized keyboard mapping for gallery thumbnails

/// Keys that activate a focused thumbnail, matching native button behaviour.
#[must_use]
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// Map legacy `KeyboardEvent.key` names reported by older engines onto the
/// standard ones.
#[must_use]
pub fn normalize_key(key: &str) -> &str {
    match key {
        "Spacebar" => " ",
        "Esc" => "Escape",
        "Right" => "ArrowRight",
        "Left" => "ArrowLeft",
        other => other,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use folio_core::LightboxAction;

    #[test]
    fn activation_keys() {
        assert!(is_activation_key("Enter"));
        assert!(is_activation_key(" "));
        assert!(!is_activation_key("Tab"));
        assert!(!is_activation_key("ArrowRight"));
    }

    #[test]
    fn legacy_names_map_to_standard_keys() {
        assert!(is_activation_key(normalize_key("Spacebar")));
        assert_eq!(
            LightboxAction::from_key(normalize_key("Esc")),
            Some(LightboxAction::Close)
        );
        assert_eq!(
            LightboxAction::from_key(normalize_key("Left")),
            Some(LightboxAction::Previous)
        );
        assert_eq!(normalize_key("a"), "a");
    }
}

//! The background style catalog.
//!
//! An immutable mapping from style key to the natural-language transformation
//! instruction sent to the model. Populated once at first use and never
//! mutated; validation rejects any key outside this set before a remote call
//! is made.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static BACKGROUNDS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "alpine",
            "Transform this into a festive photo in an Alpine winter wonderland. \
             Keep the people exactly as they are but place them in front of \
             snow-covered pine trees, glowing warm string lights, and mountains. \
             The lighting should be soft and magical.",
        ),
        (
            "workshop",
            "Transform this into a festive photo outside Santa's workshop. \
             Keep the people exactly as they are but place them in a rustic \
             wooden setting with snow on the roof, colorful lights, and blurred \
             elves in the background.",
        ),
        (
            "village",
            "Transform this into a festive photo in a Gingerbread Christmas \
             Village. Keep the people exactly as they are but place them on a \
             street with gingerbread storefronts, candy canes, and gentle \
             falling snow.",
        ),
    ])
});

/// Look up the transformation instruction for a style key.
pub fn instruction_for(key: &str) -> Option<&'static str> {
    BACKGROUNDS.get(key).copied()
}

/// All valid style keys, for diagnostics and tests.
pub fn style_keys() -> Vec<&'static str> {
    let mut keys: Vec<_> = BACKGROUNDS.keys().copied().collect();
    keys.sort_unstable();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_expected_keys() {
        assert_eq!(style_keys(), vec!["alpine", "village", "workshop"]);
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(instruction_for("beach").is_none());
        assert!(instruction_for("").is_none());
    }

    #[test]
    fn instructions_preserve_subjects() {
        for key in style_keys() {
            let instruction = instruction_for(key).unwrap();
            assert!(instruction.contains("Keep the people exactly as they are"));
        }
    }
}

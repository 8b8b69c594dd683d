//! Multilingual support
//!
//! Fixed English/Bengali lookup table for user-facing response messages.
//! Unknown languages fall back to English; unknown keys echo the key.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static TRANSLATIONS: Lazy<HashMap<&'static str, HashMap<&'static str, &'static str>>> =
    Lazy::new(|| {
        let en = HashMap::from([
            ("welcome", "Welcome to SafeTrack"),
            ("emergency_alert", "Emergency Alert"),
            ("profile_updated", "Profile updated successfully"),
            ("alert_created", "Emergency alert created successfully"),
            ("invalid_credentials", "Invalid credentials"),
            ("user_exists", "User already exists"),
            ("user_registered", "User registered successfully"),
        ]);
        let bn = HashMap::from([
            ("welcome", "SafeTrack এ স্বাগতম"),
            ("emergency_alert", "জরুরি সতর্কতা"),
            ("profile_updated", "প্রোফাইল সফলভাবে আপডেট হয়েছে"),
            ("alert_created", "জরুরি সতর্কতা সফলভাবে তৈরি হয়েছে"),
            ("invalid_credentials", "অবৈধ পরিচয়পত্র"),
            ("user_exists", "ব্যবহারকারী ইতিমধ্যে বিদ্যমান"),
            ("user_registered", "ব্যবহারকারী সফলভাবে নিবন্ধিত হয়েছে"),
        ]);
        HashMap::from([("en", en), ("bn", bn)])
    });

/// Look up a message by key in the requested language.
pub fn get_translation(key: &str, lang: &str) -> String {
    let table = TRANSLATIONS
        .get(lang)
        .unwrap_or_else(|| &TRANSLATIONS["en"]);
    table.get(key).copied().unwrap_or(key).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_lookup() {
        assert_eq!(
            get_translation("user_registered", "en"),
            "User registered successfully"
        );
    }

    #[test]
    fn test_bengali_lookup() {
        assert_eq!(get_translation("invalid_credentials", "bn"), "অবৈধ পরিচয়পত্র");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert_eq!(
            get_translation("user_exists", "fr"),
            "User already exists"
        );
    }

    #[test]
    fn test_unknown_key_echoes_key() {
        assert_eq!(get_translation("no_such_key", "en"), "no_such_key");
    }
}

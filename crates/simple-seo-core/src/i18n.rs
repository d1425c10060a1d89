//! Locale-variant field detection
//!
//! Sites that translate metadata declare extra fields such as `title_es` or
//! `description_pt_br`. Those are filled by translation tooling and are never
//! printed by the automatic renderer.

/// Whether `field_name` carries a `_<code>` suffix token for one of `languages`.
///
/// Codes are compared lowercased with `-` normalized to `_`, and the token
/// must end the name or be followed by another `_`.
///
/// # Examples
///
/// ```
/// use simple_seo_core::i18n::is_locale_variant;
///
/// let languages = ["en".to_string(), "pt-br".to_string()];
/// assert!(is_locale_variant("title_en", &languages));
/// assert!(is_locale_variant("description_pt_br", &languages));
/// assert!(!is_locale_variant("og:description", &languages));
/// assert!(!is_locale_variant("title_entity", &languages));
/// ```
pub fn is_locale_variant(field_name: &str, languages: &[String]) -> bool {
	let name = field_name.to_lowercase();
	languages.iter().any(|code| {
		let code = code.trim();
		if code.is_empty() {
			return false;
		}
		let token = format!("_{}", code.to_lowercase().replace('-', "_"));
		name.match_indices(&token).any(|(start, _)| {
			let rest = &name[start + token.len()..];
			rest.is_empty() || rest.starts_with('_')
		})
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn languages() -> Vec<String> {
		vec!["en".to_string(), "es".to_string(), "pt-BR".to_string()]
	}

	#[rstest]
	#[case("title_en", true)]
	#[case("title_es", true)]
	#[case("og:title_es", true)]
	#[case("title_pt_br", true)]
	#[case("title_es_extra", true)]
	#[case("title", false)]
	#[case("og:description", false)]
	#[case("twitter:description", false)]
	#[case("title_de", false)]
	#[case("title_pt", false)]
	#[case("keywords_english", false)]
	fn test_is_locale_variant(#[case] name: &str, #[case] expected: bool) {
		assert_eq!(is_locale_variant(name, &languages()), expected);
	}

	#[rstest]
	fn test_no_languages_means_no_variants() {
		assert!(!is_locale_variant("title_en", &[]));
		assert!(!is_locale_variant("title_", &[String::new()]));
	}
}

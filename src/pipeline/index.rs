//! Language index routes.

use super::route::Route;
use crate::config::SupportedLanguages;

/// Path of a language's index page: `/` for the canonical language,
/// `/<code>/` for every other one.
pub fn index_path(languages: &SupportedLanguages, code: &str) -> String {
    format!("{}/", languages.prefix(code))
}

/// One index route per supported language, in code order.
pub fn emit(languages: &SupportedLanguages) -> Vec<Route> {
    languages
        .codes()
        .map(|code| Route::index(index_path(languages, code), code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LanguageMeta;
    use crate::pipeline::route::ComponentKind;

    #[test]
    fn test_default_languages() {
        let routes = emit(&SupportedLanguages::default());
        let summary: Vec<_> = routes
            .iter()
            .map(|r| (r.path.as_str(), r.index_lang().unwrap()))
            .collect();

        assert_eq!(summary, [("/en/", "en"), ("/", "zh-hans")]);
        assert!(routes.iter().all(|r| r.component == ComponentKind::Index));
    }

    #[test]
    fn test_one_route_per_language() {
        let mut langs = SupportedLanguages::default();
        for code in ["ja", "ru", "es"] {
            langs.languages.insert(
                code.into(),
                LanguageMeta {
                    name: code.into(),
                    locale: String::new(),
                },
            );
        }
        langs.default = "en".into();
        let routes = emit(&langs);

        assert_eq!(routes.len(), 5);
        for code in langs.codes() {
            let matching: Vec<_> = routes.iter().filter(|r| r.index_lang() == Some(code)).collect();
            assert_eq!(matching.len(), 1);
            let expected = if code == "en" { "/".to_owned() } else { format!("/{code}/") };
            assert_eq!(matching[0].path, expected);
        }
    }
}

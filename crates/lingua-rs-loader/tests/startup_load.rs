//! End-to-end startup test: definition files on disk → loaded service →
//! resolved, negotiated, exported strings.

use std::io::Write;

use serde_json::json;

use lingua_rs_core::locale::Locale;
use lingua_rs_core::settings::Settings;
use lingua_rs_l10n::{LocalizationService, ResolveOptions};
use lingua_rs_loader::load_from_settings;

fn write_file(dir: &std::path::Path, name: &str, content: &str) {
    let mut file = std::fs::File::create(dir.join(name)).unwrap();
    file.write_all(content.as_bytes()).unwrap();
}

fn locale(tag: &str) -> Locale {
    Locale::parse(tag).unwrap()
}

#[tokio::test]
async fn test_startup_load_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let locale_dir = dir.path().join("locale");
    std::fs::create_dir(&locale_dir).unwrap();

    write_file(
        &locale_dir,
        "en-US.json",
        r#"{"site": {"title": "My Site", "tagline": "Made with {tool}"}}"#,
    );
    write_file(&locale_dir, "fr-FR.json", r#"{"site": {"title": "Mon Site"}}"#);
    write_file(&locale_dir, "broken.json", "{ this is not json");
    write_file(&locale_dir, "README.md", "not a definition");

    let mut settings = Settings::default();
    settings.document_root = dir.path().to_path_buf();

    let service = LocalizationService::from_settings(&settings).unwrap();
    let report = load_from_settings(&service, &settings).await.unwrap();

    assert_eq!(report.loaded.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].0, "broken.json");
    assert!(service.is_ready());

    // Negotiation over the loaded set.
    let best = service.best_locale(Some("fr-CA,fr;q=0.9,en;q=0.8"), None);
    assert_eq!(best, locale("fr-FR"));

    // Resolution with interpolation.
    let ctx = service.context(locale("en-US"), None);
    let options = ResolveOptions::new().with_param("tool", "lingua");
    assert_eq!(ctx.resolve(&service, "site.tagline", &options), "Made with lingua");

    // French falls back to the default locale for the missing tagline.
    let package = service.export_package(&locale("fr-FR"), &options);
    assert_eq!(
        package,
        json!({
            "site": { "title": "Mon Site", "tagline": "Made with lingua" }
        })
    );
}

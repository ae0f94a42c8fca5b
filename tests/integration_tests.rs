//! Integration tests for doi-cite
//!
//! These tests drive the whole form through scripted input, with an in-memory
//! resolver (or a mock HTTP server) and a browser launcher that only records URLs.

use doi_cite::app::CitationForm;
use doi_cite::config::{Config, ResolverConfig};
use doi_cite::models::ArticleMetadata;
use doi_cite::resolver::{DoiResolver, MockResolver, CSL_JSON};
use doi_cite::ui::FormView;
use doi_cite::utils::RecordingBrowser;
use std::io::Cursor;
use std::sync::Arc;
use tempfile::tempdir;

const APA_EXAMPLE: &str =
    "Smith (2020). Example Paper. Recuperado de https://doi.org/10.1000/xyz123";

fn example_resolver() -> MockResolver {
    MockResolver::new()
        .with_article(
            "10.1000/xyz123",
            ArticleMetadata::new(
                "Example Paper",
                "Smith",
                2020,
                "https://doi.org/10.1000/xyz123",
            ),
        )
        .with_article(
            "10.1000/abc",
            ArticleMetadata::new("Other Paper", "Doe, Roe", 2021, "https://doi.org/10.1000/abc"),
        )
}

fn run_script(
    resolver: MockResolver,
    script: &str,
) -> (CitationForm, String, Arc<RecordingBrowser>) {
    let browser = Arc::new(RecordingBrowser::new());
    let form = CitationForm::new(Arc::new(resolver), browser.clone(), &Config::default());
    let mut view = FormView::new(form, Cursor::new(script.to_string()), Vec::new());

    tokio_test::block_on(view.run()).unwrap();

    let (form, output) = view.into_parts();
    (form, String::from_utf8(output).unwrap(), browser)
}

#[test]
fn test_generate_shows_citation() {
    let (form, output, _) = run_script(example_resolver(), "1\n10.1000/xyz123\n0\ns\n");

    assert_eq!(form.citations(), &[APA_EXAMPLE.to_string()]);
    assert!(output.contains("Tareas U. MX"));
    assert!(output.contains("── Citas (1) ──"));
    assert!(output.contains("Smith (2020). Example Paper. Recuperado de"));
}

#[test]
fn test_generations_keep_chronological_order() {
    let script = "4\nVancouver\n1\n10.1000/abc\n4\nAPA\n1\n10.1000/xyz123\n";
    let (form, _, _) = run_script(example_resolver(), script);

    assert_eq!(
        form.citations(),
        &[
            "Doe, Roe. Other Paper. 2021; Disponible en: https://doi.org/10.1000/abc".to_string(),
            APA_EXAMPLE.to_string(),
        ]
    );
}

#[test]
fn test_empty_doi_reports_error() {
    let (form, output, _) = run_script(example_resolver(), "1\n\n");

    assert!(form.citations().is_empty());
    assert!(output.contains("✗ Error: Por favor, ingrese un DOI válido."));
}

#[test]
fn test_failed_lookup_appends_nothing() {
    let (form, output, _) = run_script(
        example_resolver(),
        "1\n10.1000/xyz123\n1\n10.9999/missing\n",
    );

    assert_eq!(form.store().len(), 1);
    assert!(output.contains("✗ Error: No se pudo obtener información del DOI."));
}

#[test]
fn test_export_empty_store_is_rejected() {
    let (_, output, _) = run_script(example_resolver(), "2\n");

    assert!(output.contains("✗ Error: No hay citas para exportar."));
    // The path prompt is never shown
    assert!(!output.contains("Guardar como"));
}

#[test]
fn test_export_writes_paragraphs() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("citas");
    let script = format!(
        "1\n10.1000/xyz123\n1\n10.1000/abc\n2\n{}\n",
        target.display()
    );
    let (_, output, _) = run_script(example_resolver(), &script);

    let written = dir.path().join("citas.txt");
    assert!(output.contains(&format!(
        "Las citas se han guardado en {}",
        written.display()
    )));
    assert_eq!(
        std::fs::read_to_string(&written).unwrap(),
        format!(
            "{}\n\nDoe, Roe (2021). Other Paper. Recuperado de https://doi.org/10.1000/abc\n\n",
            APA_EXAMPLE
        )
    );
}

#[test]
fn test_export_cancelled_is_silent() {
    let (form, output, _) = run_script(example_resolver(), "1\n10.1000/xyz123\n2\n\n");

    assert_eq!(form.store().len(), 1);
    assert!(!output.contains("Exportación Exitosa"));
    assert!(!output.contains("✗"));
}

#[test]
fn test_mirror_search_opens_browser() {
    let (_, output, browser) = run_script(example_resolver(), "3\n10.1000/xyz123\n3\n \n");

    assert_eq!(browser.opened(), vec!["https://sci-hub.red/10.1000/xyz123"]);
    assert!(output.contains("Por favor, ingrese un DOI para buscar en Sci-Hub."));
}

#[test]
fn test_theme_toggle_and_close_confirmation() {
    let (form, output, _) = run_script(example_resolver(), "5\n0\nn\n5\n0\ns\n1\n");

    assert!(output.contains("Tema: oscuro (#333333)"));
    assert!(output.contains("Tema: claro (#D3D3D3)"));
    // Declined once, then closed: the trailing "1" is never read as an action
    assert_eq!(
        output.matches("¿Seguro que quieres cerrar el programa?").count(),
        2
    );
    assert!(!output.contains("Ingrese el DOI"));
    assert!(!form.theme().is_dark());
}

#[test]
fn test_unknown_option_is_reported() {
    let (_, output, _) = run_script(example_resolver(), "7\n");
    assert!(output.contains("Opción no reconocida: 7"));
}

#[tokio::test]
async fn test_generate_against_http_resolver() {
    let mut server = mockito::Server::new_async().await;
    let _found = server
        .mock("GET", "/10.1000/xyz123")
        .match_header("accept", CSL_JSON)
        .with_status(200)
        .with_body(
            r#"{"title": "Example Paper", "author": [{"family": "Smith", "given": "Jane"}], "issued": {"date-parts": [[2020, 1, 15]]}}"#,
        )
        .create_async()
        .await;
    let _missing = server
        .mock("GET", "/10.1000/missing")
        .with_status(404)
        .create_async()
        .await;

    let config = Config {
        resolver: ResolverConfig {
            base_url: server.url(),
            ..ResolverConfig::default()
        },
        ..Config::default()
    };
    let resolver = DoiResolver::new(&config.resolver).unwrap();
    let mut form = CitationForm::new(
        Arc::new(resolver),
        Arc::new(RecordingBrowser::new()),
        &config,
    );

    assert_eq!(form.generate("10.1000/xyz123").await.unwrap(), APA_EXAMPLE);
    assert!(form.generate("10.1000/missing").await.is_err());
    assert_eq!(form.citations(), &[APA_EXAMPLE.to_string()]);
}

use httpmock::prelude::*;
use icd10_export::{CliConfig, ExportPipeline, HttpFetcher, LocalStorage};
use std::io::Write;
use tempfile::TempDir;
use zip::write::{FileOptions, ZipWriter};

fn order_line(seq: &str, code: &str, flag: char, short: &str, long: &str) -> String {
    format!("{seq:<5} {code:<7} {flag} {short:<60} {long}\n")
}

fn order_zip_bytes() -> Vec<u8> {
    let text = order_line("00001", "A123", '1', "Test", "Test desc")
        + &order_line("00002", "B999", '0', "Chapter heading", "Not covered")
        + &order_line("00003", "A00", '1', "Cholera", "Cholera, unspecified");

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file::<_, ()>(
        "2026 Code Descriptions/icd10cm_order_2026.txt",
        FileOptions::default(),
    )
    .unwrap();
    zip.write_all(text.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

fn mock_site(server: &MockServer) {
    let menu_page = "<html><ul class=\"menu\">\
                     <li id=\"a\"><a href=\"/home\">Home</a></li>\
                     <li id=\"b\"><a href=\"/icd10-cm-2026\">2026 ICD-10-CM</a></li>\
                     </ul></html>";
    let year_page = "<html><a href=\"/files/zip/2026-cdto.zip\">\
                     2026 Code Descriptions in Tabular Order</a></html>";

    server.mock(|when, then| {
        when.method(GET).path("/medicare/coding/icd10");
        then.status(200).body(menu_page);
    });
    server.mock(|when, then| {
        when.method(GET).path("/icd10-cm-2026");
        then.status(200).body(year_page);
    });
    server.mock(|when, then| {
        when.method(GET).path("/files/zip/2026-cdto.zip");
        then.status(200).body(order_zip_bytes());
    });
}

fn config_for(server: &MockServer, output_path: &str, keep_intermediate: bool) -> CliConfig {
    CliConfig {
        base_url: server.url(""),
        code_page_path: "/medicare/coding/icd10".to_string(),
        output_path: output_path.to_string(),
        file_name_base: "Base_".to_string(),
        record_file_prefix: "icd10cm_order_".to_string(),
        keep_intermediate,
        verbose: false,
    }
}

#[tokio::test]
async fn test_end_to_end_export_keeping_intermediates() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_site(&server);

    let config = config_for(&server, &output_path, true);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = ExportPipeline::new(HttpFetcher::new(), storage, config);

    let names = pipeline.run().await.unwrap();
    assert_eq!(
        names,
        vec![
            "Non-decimal Base_2026.go",
            "Decimal Base_2026.go",
            "Combined Base_2026.go"
        ]
    );

    // The downloaded archive stays behind for manual verification; the
    // extracted order file and its directory do not.
    assert!(temp_dir
        .path()
        .join("2026-code-descriptions-tabular-order.zip")
        .exists());
    assert!(!temp_dir.path().join("2026 Code Descriptions").exists());

    let non_decimal =
        std::fs::read_to_string(temp_dir.path().join("Non-decimal Base_2026.go")).unwrap();
    let decimal = std::fs::read_to_string(temp_dir.path().join("Decimal Base_2026.go")).unwrap();
    let combined = std::fs::read_to_string(temp_dir.path().join("Combined Base_2026.go")).unwrap();

    // Records sorted by code, only covered ones kept.
    assert!(non_decimal.contains(
        "^NONDECGBL(\"Subscript 1\",\"A00\")\nCholera, unspecified\n\
         ^NONDECGBL(\"Subscript 1\",\"A123\")\nTest desc\n"
    ));
    assert!(!non_decimal.contains("B999"));
    assert!(decimal.contains("^DECGBL(\"Subscript 1\",\"A12.3\")\nTest desc\n"));
    assert!(decimal.contains("^DECGBL(\"Subscript 1\",\"A00\")\n"));

    // All three files share one header timestamp and day counter.
    let header_lines = |text: &str| -> Vec<String> {
        text.lines().take(2).map(str::to_string).collect()
    };
    assert_eq!(header_lines(&non_decimal), header_lines(&decimal));
    assert_eq!(header_lines(&non_decimal), header_lines(&combined));
    let day_line = |text: &str| text.lines().nth(3).unwrap().to_string();
    assert_eq!(day_line(&non_decimal), day_line(&combined));

    // Combined body is the non-decimal body followed by the decimal body.
    let body_of = |text: &str| -> String {
        let at = text.find("PLACEHOLDER FOR YEAR").unwrap();
        let header_end = at + text[at..].find('\n').unwrap() + 1;
        text[header_end..].strip_suffix("\n\n").unwrap().to_string()
    };
    let non_decimal_body = body_of(&non_decimal);
    let decimal_body = body_of(&decimal);
    let combined_body = body_of(&combined);
    assert_eq!(combined_body, format!("{non_decimal_body}{decimal_body}"));

    // Each export file is also packaged as a single-entry zip.
    for name in &names {
        let base = name.strip_suffix(".go").unwrap();
        let zip_path = temp_dir.path().join(format!("{base}.zip"));
        assert!(zip_path.exists());

        let bytes = std::fs::read(zip_path).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 1);
        assert!(archive.by_name(name).is_ok());
    }
}

#[tokio::test]
async fn test_end_to_end_export_with_cleanup() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_site(&server);

    let config = config_for(&server, &output_path, false);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = ExportPipeline::new(HttpFetcher::new(), storage, config);

    let names = pipeline.run().await.unwrap();

    for name in &names {
        assert!(!temp_dir.path().join(name).exists());
        let base = name.strip_suffix(".go").unwrap();
        assert!(temp_dir.path().join(format!("{base}.zip")).exists());
    }
    assert!(temp_dir
        .path()
        .join("2026-code-descriptions-tabular-order.zip")
        .exists());
}

#[tokio::test]
async fn test_server_error_aborts_run() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/medicare/coding/icd10");
        then.status(500);
    });

    let config = config_for(&server, &output_path, true);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = ExportPipeline::new(HttpFetcher::new(), storage, config);

    assert!(pipeline.run().await.is_err());
    assert!(std::fs::read_dir(temp_dir.path()).unwrap().next().is_none());
}

//! Integration tests for the scan pipeline
//!
//! Tests the complete workflow: config -> gather -> extract -> classify -> report

use docscan_core::extract::PDF_UNAVAILABLE;
use docscan_core::{Backends, FileProcessor, Result, ScanConfig, ScanDriver, ScanError, ScanReport};
use std::fs::{self, File};
use std::io::Write;
use tempfile::TempDir;

/// Helper to create a share with the given files under a `Cliente` root
fn create_test_share(files: &[(&str, &str)]) -> Result<TempDir> {
    let temp_dir = TempDir::new()?;

    for (path, content) in files {
        let file_path = temp_dir.path().join("Cliente").join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&file_path)?;
        file.write_all(content.as_bytes())?;
    }

    Ok(temp_dir)
}

fn share_root(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("Cliente")
}

fn filenames(report: &ScanReport) -> Vec<String> {
    let mut names: Vec<String> = report.files.iter().map(|f| f.filename.clone()).collect();
    names.sort();
    names
}

#[test]
fn test_reports_folder_with_extension_filter() -> Result<()> {
    let share = create_test_share(&[("reports/a.txt", "hello world"), ("reports/b.tmp", "scratch")])?;

    let config = ScanConfig::new(share_root(&share))
        .with_includes(vec!["reports"])
        .with_extensions(vec!["txt"]);
    let report = ScanDriver::default().scan(&config)?;

    assert_eq!(report.count, 1);
    assert_eq!(report.files.len(), 1);
    let record = &report.files[0];
    assert_eq!(record.filename, "a.txt");
    assert_eq!(record.word_count, 2);
    assert_eq!(record.complexity, 1);
    assert_eq!(record.page_count, 1);

    Ok(())
}

#[test]
fn test_temp_files_skipped_without_extension_filter() -> Result<()> {
    let share = create_test_share(&[
        ("docs/keep.md", "# notes"),
        ("docs/b.tmp", "scratch"),
        ("docs/~$lock.docx", "owner"),
        ("docs/Thumbs.db", "cache"),
    ])?;

    let config = ScanConfig::new(share_root(&share)).with_includes(vec!["docs"]);
    let report = ScanDriver::default().scan(&config)?;

    assert_eq!(filenames(&report), vec!["keep.md"]);
    Ok(())
}

#[test]
fn test_pdf_without_backend_is_a_record_not_an_error() -> Result<()> {
    let share = create_test_share(&[("scan.pdf", "%PDF-1.7 not parsed")])?;

    let driver = ScanDriver::new(FileProcessor::new(Backends::none()));
    let report = driver.scan(&ScanConfig::new(share_root(&share)))?;

    assert_eq!(report.count, 1);
    let record = &report.files[0];
    assert_eq!(record.page_count, 0);
    assert_eq!(record.summary, PDF_UNAVAILABLE);
    assert_eq!(record.language, "unknown");
    assert_eq!(record.complexity, 1);
    Ok(())
}

#[test]
fn test_excluded_component_anywhere_in_path() -> Result<()> {
    let share = create_test_share(&[
        ("projects/secret/plan.txt", "hidden"),
        ("projects/notsecret/plan.txt", "visible"),
        ("projects/overview.txt", "top level"),
    ])?;

    let config = ScanConfig::new(share_root(&share))
        .with_includes(vec!["projects", "projects/secret", "projects/notsecret"])
        .with_excludes(vec!["secret"]);
    let report = ScanDriver::default().scan(&config)?;

    let paths: Vec<&str> = report.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(report.count, 2);
    assert!(paths.iter().any(|p| p.ends_with("overview.txt")));
    assert!(paths.iter().any(|p| p.contains("notsecret")));
    assert!(!paths.iter().any(|p| p.contains("/secret/") || p.contains("\\secret\\")));
    Ok(())
}

#[test]
fn test_missing_include_is_skipped() -> Result<()> {
    let share = create_test_share(&[("present/a.txt", "one")])?;

    let config = ScanConfig::new(share_root(&share)).with_includes(vec!["absent", "present"]);
    let report = ScanDriver::default().scan(&config)?;

    assert_eq!(filenames(&report), vec!["a.txt"]);
    Ok(())
}

#[test]
fn test_empty_include_scans_root_direct_files() -> Result<()> {
    let share = create_test_share(&[("top.txt", "root file"), ("nested/deep.txt", "not scanned")])?;

    let report = ScanDriver::default().scan(&ScanConfig::new(share_root(&share)))?;

    assert_eq!(filenames(&report), vec!["top.txt"]);
    assert_eq!(report.cliente, "Cliente");
    Ok(())
}

#[test]
fn test_missing_root_aborts() {
    let dir = TempDir::new().unwrap();
    let config = ScanConfig::new(dir.path().join("nowhere"));

    let err = ScanDriver::default().scan(&config).unwrap_err();
    assert!(matches!(err, ScanError::RootNotFound(_)));
}

#[test]
fn test_count_equals_files() -> Result<()> {
    let share = create_test_share(&[
        ("a.txt", "one"),
        ("b.md", "two"),
        ("c.log", "three"),
        ("d.xlsx", "unsupported"),
    ])?;

    let report = ScanDriver::default().scan(&ScanConfig::new(share_root(&share)))?;

    assert_eq!(report.count, 4);
    assert_eq!(report.count, report.files.len());
    let unsupported = report.files.iter().find(|f| f.extension == "xlsx").unwrap();
    assert_eq!(unsupported.page_count, 0);
    assert_eq!(unsupported.summary, "Unsupported file extension.");
    Ok(())
}

#[test]
fn test_classification_end_to_end() -> Result<()> {
    let share = create_test_share(&[(
        "specifica.txt",
        "Specifica funzionale R21 per la contabilità generale e il payroll. \
         This project is Confidential. Analisi dei requisiti.",
    )])?;

    let config = ScanConfig::new(share_root(&share))
        .with_tag("audit")
        .with_domain("finance");
    let report = ScanDriver::default().scan(&config)?;
    let record = &report.files[0];

    assert_eq!(record.tag, "audit");
    assert_eq!(record.domain, "finance");
    assert_eq!(record.extension, "txt");
    assert_eq!(record.content_type, "functional_spec");
    assert_eq!(record.process_step, "analysis");
    assert_eq!(record.modules_mentioned, vec!["FI", "HR"]);
    assert_eq!(record.version, "R21");
    assert!(record.is_confidential);
    assert!(!record.contains_images);
    assert_eq!(record.tables_count, 0);
    Ok(())
}

#[test]
fn test_json_report_keeps_non_ascii_and_field_order() -> Result<()> {
    let share = create_test_share(&[("città.txt", "Verbale riservato: qualità e attività")])?;

    let report = ScanDriver::default().scan(&ScanConfig::new(share_root(&share)))?;
    let json = report.to_json()?;

    assert!(json.contains("città.txt"));
    assert!(json.contains("qualità e attività"));

    let path_at = json.find("\"path\"").unwrap();
    let summary_at = json.find("\"summary\"").unwrap();
    let confidential_at = json.find("\"is_confidential\"").unwrap();
    assert!(path_at < summary_at && summary_at < confidential_at);
    Ok(())
}

#[test]
fn test_yaml_config_round_trip_to_file() -> Result<()> {
    let share = create_test_share(&[("docs/manuale.md", "Manuale utente del sistema")])?;

    let config_path = share.path().join("docs_config.yaml");
    let yaml = format!(
        "input_root_path: {:?}\ninclude_folders:\n  - docs\nallowed_extensions: [\".MD\"]\ntag: \"  training  \"\n",
        share_root(&share)
    );
    fs::write(&config_path, yaml)?;

    let config = ScanConfig::load(&config_path)?;
    assert_eq!(config.tag, "training");

    let report = ScanDriver::default().scan(&config)?;
    let output = share.path().join("out/report.json");
    report.write_to(&output)?;

    let back: ScanReport = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(back, report);
    assert_eq!(back.files[0].content_type, "user_manual");
    Ok(())
}

#[cfg(feature = "docx")]
mod docx {
    use super::*;
    use std::path::Path;
    use zip::write::SimpleFileOptions;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="png" ContentType="image/png"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

    const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Specifica tecnica del modulo ABAP</w:t></w:r></w:p>
    <w:p><w:r><w:t>Documento riservato</w:t></w:r></w:p>
    <w:tbl>
      <w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr>
    </w:tbl>
  </w:body>
</w:document>"#;

    fn document_rels(with_image: bool) -> String {
        let image = if with_image {
            r#"<Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>"#
        } else {
            ""
        };
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            image
        )
    }

    fn write_docx(path: &Path, with_image: bool) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut zip = zip::ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        let mut parts: Vec<(&str, Vec<u8>)> = vec![
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
            ("_rels/.rels", PACKAGE_RELS.as_bytes().to_vec()),
            ("word/document.xml", DOCUMENT.as_bytes().to_vec()),
            ("word/_rels/document.xml.rels", document_rels(with_image).into_bytes()),
        ];
        if with_image {
            parts.push(("word/media/image1.png", vec![0x89, b'P', b'N', b'G']));
        }

        for (name, bytes) in parts {
            zip.start_file(name, options)?;
            zip.write_all(&bytes)?;
        }
        zip.finish()?;
        Ok(())
    }

    #[test]
    fn test_docx_paragraphs_tables_and_images() -> Result<()> {
        let share = create_test_share(&[])?;
        fs::create_dir_all(share_root(&share))?;
        write_docx(&share_root(&share).join("design.docx"), true)?;

        let report = ScanDriver::default().scan(&ScanConfig::new(share_root(&share)))?;
        let record = &report.files[0];

        assert_eq!(record.extension, "docx");
        assert!(record.summary.contains("Specifica tecnica del modulo ABAP"));
        assert_eq!(record.page_count, 1);
        assert_eq!(record.tables_count, 1);
        assert!(record.contains_images);
        assert_eq!(record.content_type, "technical_spec");
        assert_eq!(record.modules_mentioned, vec!["ABAP"]);
        assert!(record.is_confidential);
        Ok(())
    }

    #[test]
    fn test_docx_without_images() -> Result<()> {
        let share = create_test_share(&[])?;
        fs::create_dir_all(share_root(&share))?;
        write_docx(&share_root(&share).join("plain.docx"), false)?;

        let report = ScanDriver::default().scan(&ScanConfig::new(share_root(&share)))?;
        assert!(!report.files[0].contains_images);
        Ok(())
    }

    #[test]
    fn test_corrupt_docx_degrades() -> Result<()> {
        let share = create_test_share(&[("broken.docx", "PK but not really a package")])?;

        let report = ScanDriver::default().scan(&ScanConfig::new(share_root(&share)))?;
        let record = &report.files[0];
        assert_eq!(record.page_count, 0);
        assert!(record.summary.starts_with("Error reading DOCX:"));
        Ok(())
    }
}

#[cfg(any(feature = "pdf", feature = "pdf-text"))]
mod pdf {
    use super::*;
    use docscan_core::Extractor;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Two pages, each with a four-cell ruled grid before its text. The image
    /// XObject lives in the resources of the parent `Pages` node only.
    fn build_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => 1,
                "Height" => 1,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            vec![0],
        ));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
            "XObject" => dictionary! { "Im1" => image_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for _ in 0..2 {
            let mut operations: Vec<Operation> = (0..4)
                .map(|i| {
                    Operation::new(
                        "re",
                        vec![(50 + i * 100).into(), 700.into(), 100.into(), 20.into()],
                    )
                })
                .collect();
            operations.extend([
                Operation::new("S", vec![]),
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal("Hello confidential world")]),
                Operation::new("ET", vec![]),
            ]);
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().expect("encode")));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => 2,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("save pdf");
        bytes
    }

    fn write_pdf(dir: &TempDir) -> Result<std::path::PathBuf> {
        let path = dir.path().join("report.pdf");
        fs::write(&path, build_pdf())?;
        Ok(path)
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_pdf_introspection() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_pdf(&dir)?;

        let result = Extractor::new(Backends::detect()).extract(&path);

        assert_eq!(result.page_count, 2);
        assert!(result.contains_images);
        assert_eq!(result.tables_count, 2);
        assert_eq!(result.text.matches("Hello confidential world").count(), 2);
        Ok(())
    }

    #[cfg(feature = "pdf-text")]
    #[test]
    fn test_pdf_text_only_backend() -> Result<()> {
        let dir = TempDir::new()?;
        let path = write_pdf(&dir)?;

        let result = Extractor::new(Backends::detect().without_pdf_introspect()).extract(&path);

        assert_eq!(result.page_count, 2);
        assert!(!result.contains_images);
        assert_eq!(result.tables_count, 0);
        Ok(())
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_pdf_record_end_to_end() -> Result<()> {
        let dir = TempDir::new()?;
        write_pdf(&dir)?;

        let report = ScanDriver::default().scan(&ScanConfig::new(dir.path()))?;
        let record = &report.files[0];

        assert_eq!(record.extension, "pdf");
        assert_eq!(record.page_count, 2);
        assert!(record.contains_images);
        assert_eq!(record.tables_count, 2);
        assert!(record.is_confidential);
        Ok(())
    }
}

//! End-to-end tests that go through real PDF bytes

use legaledge_analyzer::{AnalyzerConfig, AnalyzerError, CaseAnalyzer, PdfTextExtractor, Session};
use legaledge_domain::CaseType;
use legaledge_llm::MockProvider;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::Write;

/// Content stream drawing one line of text in font F1
fn text_stream(text: &str) -> Vec<u8> {
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    content.encode().expect("content encodes")
}

/// Build a PDF with one line of Courier text per page
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let streams: Vec<Vec<u8>> = pages.iter().map(|text| text_stream(text)).collect();
    build_pdf_from_streams(&streams)
}

/// Build a PDF whose pages carry the given raw content streams
fn build_pdf_from_streams(streams: &[Vec<u8>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for stream in streams {
        let content_id = doc.add_object(Stream::new(dictionary! {}, stream.clone()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("document saves");
    bytes
}

#[test]
fn test_pages_are_extracted_in_order() {
    let pdf = build_pdf(&["First page text", "Second page text", "Third page text"]);

    let pages = PdfTextExtractor::new().extract_pages(&pdf).unwrap();
    assert_eq!(pages.len(), 3);
    assert!(pages[0].contains("First page text"));
    assert!(pages[1].contains("Second page text"));
    assert!(pages[2].contains("Third page text"));

    let text = PdfTextExtractor::new().extract(&pdf).unwrap();
    let first = text.find("First").unwrap();
    let second = text.find("Second").unwrap();
    let third = text.find("Third").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn test_undecodable_page_contributes_empty_text() {
    let pdf = build_pdf_from_streams(&[
        text_stream("Opening page"),
        b"BT /F9 12 Tf ( unterminated".to_vec(),
        text_stream("Closing page"),
    ]);

    let pages = PdfTextExtractor::new().extract_pages(&pdf).unwrap();
    assert_eq!(pages.len(), 3);
    assert!(pages[0].contains("Opening page"));
    assert_eq!(pages[1], "");
    assert!(pages[2].contains("Closing page"));

    let text = PdfTextExtractor::new().extract(&pdf).unwrap();
    assert!(text.find("Opening page").unwrap() < text.find("Closing page").unwrap());
    assert_eq!(text, format!("{}\n\n{}\n", pages[0], pages[2]));
}

#[test]
fn test_extract_file_reads_from_disk() {
    let pdf = build_pdf(&["Petition under Article 32"]);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&pdf).unwrap();

    let text = PdfTextExtractor::new().extract_file(file.path()).unwrap();
    assert!(text.contains("Petition under Article 32"));
}

#[test]
fn test_analyze_pdf_end_to_end() {
    let mut llm = MockProvider::new("Strong case.");
    llm.add_response(
        "ONLY a JSON object",
        r#"{"case_title": "X vs. Y", "court": "Supreme Court", "case_type": "Civil"}"#,
    );
    let analyzer = CaseAnalyzer::new(llm.clone(), AnalyzerConfig::default()).unwrap();
    let mut session = Session::new();

    let pdf = build_pdf(&["Case: X vs. Y, Supreme Court", "breach of contract"]);
    let run = analyzer.analyze(&mut session, &pdf).unwrap();

    assert_eq!(run.metadata.page_count, 2);
    assert_eq!(run.case_details.title, "X vs. Y");
    assert_eq!(run.case_details.case_type, CaseType::Civil);
    assert_eq!(run.analysis.text, "Strong case.");
    assert!(session.is_analyzed());

    let extraction_prompt = &llm.prompts()[0];
    assert!(extraction_prompt.contains("breach of contract"));
}

#[test]
fn test_garbage_bytes_leave_session_untouched() {
    let llm = MockProvider::default();
    let analyzer = CaseAnalyzer::new(llm.clone(), AnalyzerConfig::default()).unwrap();
    let mut session = Session::new();

    let err = analyzer
        .analyze(&mut session, b"\x00\x01 this is not a document")
        .unwrap_err();

    assert!(matches!(err, AnalyzerError::Extraction(_)));
    assert!(err.is_extraction_failure());
    assert!(!session.is_analyzed());
    assert!(session.analysis().is_none());
    assert_eq!(llm.call_count(), 0);
}

#[test]
fn test_pdf_without_text_is_empty_document() {
    let pdf = build_pdf(&[""]);
    let analyzer = CaseAnalyzer::new(MockProvider::default(), AnalyzerConfig::default()).unwrap();
    let mut session = Session::new();

    let err = analyzer.analyze(&mut session, &pdf).unwrap_err();
    assert!(matches!(err, AnalyzerError::EmptyDocument));
    assert!(!session.is_analyzed());
}

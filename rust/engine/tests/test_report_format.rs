use serde_json::json;

use packguard_engine::report::{
    format_validation_result, Severity, ValidationResult, Violation, ViolationKind, Warning,
    WarningKind,
};

#[test]
fn clean_result_renders_header_only() {
    let rendered = format_validation_result(&ValidationResult::pass());
    assert!(rendered.contains("PASSED"));
    assert!(rendered.contains("(confidence 100.0%)"));
    assert!(!rendered.contains("Violations"), "empty section must be omitted");
    assert!(!rendered.contains("Warnings"), "empty section must be omitted");
}

#[test]
fn failed_result_lists_violations_with_severity_tags() {
    let result = ValidationResult::fail(vec![Violation::new(
        ViolationKind::DuplicatePackDetected,
        Severity::Critical,
        "pack content was already accepted".to_string(),
        json!({}),
    )]);
    let rendered = format_validation_result(&result);
    assert!(rendered.contains("REJECTED"));
    assert!(rendered.contains("(confidence 0.0%)"));
    assert!(rendered.contains("Violations (1):"));
    assert!(rendered.contains("[critical] pack content was already accepted"));
    assert!(!rendered.contains("Warnings"));
}

#[test]
fn warnings_render_with_their_own_block_and_glyph() {
    let result = ValidationResult {
        valid: true,
        violations: Vec::new(),
        warnings: vec![Warning::new(
            WarningKind::RarePull,
            "best pull legendary is an unusual outcome".to_string(),
            json!({}),
        )],
        confidence: 0.95,
    };
    let rendered = format_validation_result(&result);
    assert!(rendered.contains("PASSED"));
    assert!(rendered.contains("(confidence 95.0%)"));
    assert!(rendered.contains("Warnings (1):"));
    assert!(rendered.contains("⚠ best pull legendary is an unusual outcome"));
    assert!(!rendered.contains("Violations"));
}

#[test]
fn confidence_always_has_one_decimal_place() {
    let mut result = ValidationResult::pass();
    result.confidence = 0.875;
    assert!(format_validation_result(&result).contains("87.5%"));
    result.confidence = 0.5;
    assert!(format_validation_result(&result).contains("50.0%"));
}

#[test]
fn mixed_result_renders_both_blocks_in_order() {
    let result = ValidationResult {
        valid: false,
        violations: vec![Violation::new(
            ViolationKind::LowEntropy,
            Severity::High,
            "duplicate card identity a appears 2 times in one pack".to_string(),
            json!({}),
        )],
        warnings: vec![Warning::new(
            WarningKind::LowEntropy,
            "identity entropy below floor".to_string(),
            json!({}),
        )],
        confidence: 0.0,
    };
    let rendered = format_validation_result(&result);
    let violations_at = rendered.find("Violations (1):").expect("violations block");
    let warnings_at = rendered.find("Warnings (1):").expect("warnings block");
    assert!(violations_at < warnings_at);
    assert!(rendered.contains("[high]"));
}

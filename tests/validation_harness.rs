#![allow(unused)]
//! Validator integration harness.
//!
//! # What this covers
//!
//! - **Field rules**: address, port, filename, keyword and stream checks over
//!   tables of accepted and rejected inputs (rstest).
//! - **Check order**: a form with several bad fields reports the first one in
//!   host, port, filename, keyword, stream, line-count order.
//! - **Line-count clamping**: over-ceiling counts (including ones that do
//!   not fit in 64 bits) are clamped with a warning, never rejected.
//! - **Property: octets**: every dotted quad of bytes is a valid address,
//!   and any octet above 255 makes it invalid.
//! - **Property: ports**: every `1..=65535` is accepted, `0` and anything
//!   above is rejected.
//! - **Property: query-string safety**: a keyword containing `&`, `=`, `?`,
//!   `#` or `/` is always rejected.
//!
//! # What this does NOT cover
//!
//! - What the server does with the accepted values (see retrieval_harness)
//! - How rejections are displayed (see the logview-tui unit tests)
//!
//! # Running
//!
//! ```sh
//! cargo test --test validation_harness
//! ```

mod common;
use common::*;
use logview::core::validate::{
    check_line_count, is_valid_filename, is_valid_ip, is_valid_keyword, is_valid_port,
    is_valid_stream, DEFAULT_HOST,
};
use logview::core::{LineLimits, QueryForm, ValidationError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn limits() -> LineLimits {
    LineLimits::default()
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

#[rstest]
#[case("127.0.0.1", true)]
#[case("0.0.0.0", true)]
#[case("255.255.255.255", true)]
#[case("10.0.0.254", true)]
#[case("256.0.0.1", false)]
#[case("1.2.3", false)]
#[case("1.2.3.4.5", false)]
#[case("1..3.4", false)]
#[case("a.b.c.d", false)]
#[case("-1.2.3.4", false)]
#[case("example.com", false)]
#[case("", false)]
fn address_rule(#[case] input: &str, #[case] valid: bool) {
    assert_eq!(is_valid_ip(input), valid, "address {input:?}");
}

#[rstest]
#[case("1", true)]
#[case("80", true)]
#[case("5000", true)]
#[case("65535", true)]
#[case("0", false)]
#[case("65536", false)]
#[case("-80", false)]
#[case("http", false)]
#[case("80.5", false)]
#[case("", false)]
fn port_rule(#[case] input: &str, #[case] valid: bool) {
    assert_eq!(is_valid_port(input), valid, "port {input:?}");
}

#[rstest]
#[case("app.log", true)]
#[case("server_2024-01-15.txt", true)]
#[case("nightly, batch 3.out", true)]
#[case("APP.LOG", true)]
#[case("app", false)]
#[case("app.logs", false)]
#[case("app.lg", false)]
#[case("app.log.gz", false)]
#[case("../secret.log", false)]
#[case("logs/app.log", false)]
#[case("app.log?n=1", false)]
#[case("app.log#top", false)]
#[case("", false)]
fn filename_rule(#[case] input: &str, #[case] valid: bool) {
    assert_eq!(is_valid_filename(input), valid, "filename {input:?}");
}

#[rstest]
#[case("", true)]
#[case("timeout", true)]
#[case("Line 1", true)]
#[case("req-42_retry", true)]
#[case("a&n=1", false)]
#[case("a=b", false)]
#[case("what?", false)]
#[case("#tag", false)]
#[case("a/b", false)]
#[case("50%", false)]
fn keyword_and_stream_rule(#[case] input: &str, #[case] valid: bool) {
    assert_eq!(is_valid_keyword(input), valid, "keyword {input:?}");
    assert_eq!(is_valid_stream(input), valid, "stream {input:?}");
}

// ---------------------------------------------------------------------------
// Whole-form validation
// ---------------------------------------------------------------------------

#[test]
fn empty_host_means_localhost() {
    let form = QueryFormBuilder::new().host("").build();
    let valid = form.validate(&limits()).unwrap();
    assert_eq!(valid.query.host, DEFAULT_HOST);

    let form = QueryFormBuilder::new().host("localhost").build();
    assert_eq!(form.validate(&limits()).unwrap().query.host, DEFAULT_HOST);
}

#[test]
fn accepted_form_carries_fields_through() {
    let form = QueryFormBuilder::new()
        .host("192.168.1.20")
        .port("8080")
        .file("worker.log")
        .keyword("timeout")
        .lines("250")
        .stream("stderr")
        .build();
    let valid = form.validate(&limits()).unwrap();
    assert_eq!(valid.query.host, "192.168.1.20");
    assert_eq!(valid.query.port, 8080);
    assert_eq!(valid.query.filename, "worker.log");
    assert_eq!(valid.query.keyword, "timeout");
    assert_eq!(valid.query.max_lines, 250);
    assert_eq!(valid.query.stream, "stderr");
    assert!(valid.clamp.is_none());
}

#[rstest]
#[case(QueryFormBuilder::new().host("300.1.1.1").port("0").file("x"), ValidationError::Address)]
#[case(QueryFormBuilder::new().port("0").file("x"), ValidationError::Port)]
#[case(QueryFormBuilder::new().file("x").keyword("a&b"), ValidationError::Filename)]
#[case(QueryFormBuilder::new().keyword("a&b").stream("s?"), ValidationError::Keyword)]
#[case(QueryFormBuilder::new().stream("s?").lines("zero"), ValidationError::Stream)]
#[case(QueryFormBuilder::new().lines("zero"), ValidationError::LineCount)]
fn first_bad_field_wins(#[case] form: QueryFormBuilder, #[case] expected: ValidationError) {
    assert_eq!(form.build().validate(&limits()), Err(expected));
}

#[test]
fn empty_line_count_uses_default() {
    let valid = QueryFormBuilder::new().lines("").build().validate(&limits()).unwrap();
    assert_eq!(valid.query.max_lines, 100);
    assert!(valid.clamp.is_none());
}

#[test]
fn default_line_count_never_exceeds_ceiling() {
    let tight = LineLimits {
        default_lines: 500,
        ceiling: 50,
    };
    let valid = QueryFormBuilder::new().build().validate(&tight).unwrap();
    assert_eq!(valid.query.max_lines, 50);
}

// ---------------------------------------------------------------------------
// Line-count clamping
// ---------------------------------------------------------------------------

#[rstest]
#[case("0")]
#[case("-5")]
#[case("abc")]
#[case("1.5")]
#[case("1e3")]
fn bad_line_counts_are_rejected(#[case] input: &str) {
    assert_eq!(
        check_line_count(input, 100_000_000),
        Err(ValidationError::LineCount),
        "line count {input:?}"
    );
}

#[test]
fn count_at_ceiling_is_not_clamped() {
    let count = check_line_count("100000000", 100_000_000).unwrap();
    assert_eq!(count.value, 100_000_000);
    assert!(count.clamp.is_none());
}

#[test]
fn count_above_ceiling_is_clamped_with_warning() {
    let valid = QueryFormBuilder::new()
        .lines("100000001")
        .build()
        .validate(&limits())
        .unwrap();
    assert_eq!(valid.query.max_lines, 100_000_000);
    let clamp = valid.clamp.expect("clamp warning");
    assert_eq!(clamp.requested, "100000001");
    assert_eq!(clamp.ceiling, 100_000_000);
}

#[test]
fn count_beyond_u64_is_clamped_not_rejected() {
    let huge = "99999999999999999999999999";
    let count = check_line_count(huge, 100_000_000).unwrap();
    assert_eq!(count.value, 100_000_000);
    assert_eq!(count.clamp.unwrap().requested, huge);
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn any_dotted_quad_of_bytes_is_valid(a: u8, b: u8, c: u8, d: u8) {
        let addr = format!("{a}.{b}.{c}.{d}");
        prop_assert!(is_valid_ip(&addr));
    }

    #[test]
    fn octet_above_255_is_invalid(big in 256u32..100_000, pos in 0usize..4) {
        let mut octets = vec!["10".to_string(); 4];
        octets[pos] = big.to_string();
        prop_assert!(!is_valid_ip(&octets.join(".")));
    }

    #[test]
    fn every_port_in_range_is_valid(port in 1u32..=65535) {
        prop_assert!(is_valid_port(&port.to_string()));
    }

    #[test]
    fn ports_above_range_are_invalid(port in 65536u64..10_000_000) {
        prop_assert!(!is_valid_port(&port.to_string()));
    }

    #[test]
    fn safe_keywords_are_accepted(keyword in "[A-Za-z0-9_ -]{0,32}") {
        prop_assert!(is_valid_keyword(&keyword));
    }

    #[test]
    fn query_metacharacters_are_rejected(
        prefix in "[a-z]{0,8}",
        meta in prop::sample::select(vec!['&', '=', '?', '#', '/']),
        suffix in "[a-z]{0,8}",
    ) {
        let keyword = format!("{prefix}{meta}{suffix}");
        prop_assert!(!is_valid_keyword(&keyword));
        prop_assert!(!is_valid_stream(&keyword));
    }

    #[test]
    fn in_range_counts_pass_through(n in 1u64..=100_000_000) {
        let count = check_line_count(&n.to_string(), 100_000_000).unwrap();
        prop_assert_eq!(count.value, n);
        prop_assert!(count.clamp.is_none());
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use cachet_http::{
    DeserialiseError, JsonTranslator, Options, RawResponse, Response, TextTranslator, Translator,
    TranslatorError, TranslatorRegistry,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn response(content_type: Option<&'static str>, body: &'static str) -> Response {
    let mut builder = http::Response::builder().status(200);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    Response::classify(builder.body(Bytes::from_static(body.as_bytes())).unwrap())
}

/// Records how it was called and echoes the options back.
#[derive(Default)]
struct Recording {
    calls: AtomicUsize,
}

impl Translator for Recording {
    fn deserialise(
        &self,
        response: &dyn RawResponse,
        options: &Options,
    ) -> Result<Value, TranslatorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({
            "status": response.status().as_u16(),
            "options": Value::Object(options.clone()),
        }))
    }
}

#[test]
fn test_json_body() {
    let response = response(
        Some("application/json"),
        r#"{ "menu": "File",
      "commands": [ { "title": "New", "action":"CreateDoc" }, {
      "title": "Open", "action": "OpenDoc" }, { "title": "Close",
      "action": "CloseDoc" } ] }"#,
    );

    let value = response
        .deserialise(&TranslatorRegistry::with_defaults(), &Options::new())
        .unwrap();

    assert_eq!(
        value,
        json!({
            "commands": [
                {"title": "New", "action": "CreateDoc"},
                {"title": "Open", "action": "OpenDoc"},
                {"title": "Close", "action": "CloseDoc"}
            ],
            "menu": "File"
        })
    );
}

#[test]
fn test_lookup_ignores_parameters() {
    let response = response(Some("application/json; charset=utf-8"), "[1, 2, 3]");

    let value = response
        .deserialise(&TranslatorRegistry::with_defaults(), &Options::new())
        .unwrap();

    assert_eq!(value, json!([1, 2, 3]));
}

#[test]
fn test_registry_selects_translator_by_content_type() {
    let recording = Arc::new(Recording::default());
    let mut registry = TranslatorRegistry::new();
    registry.register_shared("application/xml", recording.clone());

    let mut options = Options::new();
    options.insert("root".to_owned(), json!("bottles"));

    let value = response(Some("application/xml"), "<bottles/>")
        .deserialise(&registry, &options)
        .unwrap();

    assert_eq!(recording.calls.load(Ordering::SeqCst), 1);
    assert_eq!(value, json!({"status": 200, "options": {"root": "bottles"}}));
}

#[test]
fn test_deserialise_using_bypasses_content_type() {
    let recording = Recording::default();

    let value = response(Some("application/json"), "not json")
        .deserialise_using(&recording, &Options::new())
        .unwrap();

    assert_eq!(recording.calls.load(Ordering::SeqCst), 1);
    assert_eq!(value, json!({"status": 200, "options": {}}));
}

#[test]
fn test_deserialise_using_without_content_type() {
    let value = response(None, "plain words")
        .deserialise_using(&TextTranslator, &Options::new())
        .unwrap();

    assert_eq!(value, json!("plain words"));
}

#[test]
fn test_unregistered_content_type() {
    let error = response(Some("application/xml"), "<a/>")
        .deserialise(&TranslatorRegistry::with_defaults(), &Options::new())
        .unwrap_err();

    assert!(matches!(
        error,
        DeserialiseError::UnsupportedContentType(ref content_type) if content_type == "application/xml"
    ));
}

#[test]
fn test_missing_content_type() {
    let error = response(None, "{}")
        .deserialise(&TranslatorRegistry::with_defaults(), &Options::new())
        .unwrap_err();

    assert!(matches!(error, DeserialiseError::MissingContentType));
}

#[test]
fn test_translator_failure_is_propagated() {
    let error = response(Some("application/json"), "{ broken")
        .deserialise(&TranslatorRegistry::with_defaults(), &Options::new())
        .unwrap_err();

    assert!(matches!(
        error,
        DeserialiseError::Translator(TranslatorError::Json(_))
    ));
}

#[test]
fn test_form_body() {
    let value = response(
        Some("application/x-www-form-urlencoded"),
        "name=lead%20bottle&color[]=red&color[]=blue",
    )
    .deserialise(&TranslatorRegistry::with_defaults(), &Options::new())
    .unwrap();

    assert_eq!(
        value,
        json!({"name": "lead bottle", "color": ["red", "blue"]})
    );
}

#[test]
fn test_custom_registry_overrides_default() {
    let registry = TranslatorRegistry::with_defaults().with("application/json", TextTranslator);

    let value = response(Some("application/json"), r#"{"a": 1}"#)
        .deserialise(&registry, &Options::new())
        .unwrap();

    assert_eq!(value, json!(r#"{"a": 1}"#));
}

#[test]
fn test_json_translator_on_redirection() {
    let raw = http::Response::builder()
        .status(302)
        .header("location", "/elsewhere")
        .header("content-type", "application/json")
        .body(Bytes::from_static(br#"{"moved": true}"#))
        .unwrap();

    let response = Response::classify(raw);
    assert!(response.is_redirection());
    assert_eq!(
        response
            .deserialise_using(&JsonTranslator, &Options::new())
            .unwrap(),
        json!({"moved": true})
    );
}

/*!
 * End-to-end tests: TRS text in, WebVTT text out
 */

use trs2vtt::errors::ConversionError;
use trs2vtt::subtitle_processor::{convert_str, ConversionOptions};
use crate::common;

fn options(language: &str, add_speakers: bool, preserve_noise: bool) -> ConversionOptions {
    ConversionOptions {
        language: language.to_string(),
        add_speakers,
        preserve_noise,
    }
}

/// Test the single speaker, single turn document
#[test]
fn test_convert_withSingleTurn_shouldProduceOneCue() {
    let xml = common::trs_document(
        &[("spk1", "Alice")],
        "<Turn speaker=\"spk1\" startTime=\"0\" endTime=\"5\">\n<Sync time=\"0\"/>\nHello there\n</Turn>\n",
    );

    let output = convert_str(&xml, &options("", false, false)).unwrap();
    assert_eq!(output, "WEBVTT\n\n00:00:00.000 --> 00:00:05.000\nHello there\n");
}

/// Test the first cue starts at the sync point, not at the turn start
#[test]
fn test_convert_withLateFirstSync_shouldStartCueAtSync() {
    let xml = common::trs_document(
        &[("spk1", "Alice")],
        "<Turn speaker=\"spk1\" startTime=\"0\" endTime=\"5\">\n<Sync time=\"2\"/>\nHello there\n</Turn>\n",
    );

    let output = convert_str(&xml, &options("", false, false)).unwrap();
    assert_eq!(output, "WEBVTT\n\n00:00:02.000 --> 00:00:05.000\nHello there\n");
}

/// Test an XML comment in the middle of spoken text
#[test]
fn test_convert_withCommentInText_shouldKeepWholeSentence() {
    let xml = common::trs_document(
        &[("spk1", "Alice")],
        "<Turn speaker=\"spk1\" startTime=\"0\" endTime=\"5\">\n<Sync time=\"0\"/>\nHello <!-- unclear --> there\n</Turn>\n",
    );

    let output = convert_str(&xml, &options("", false, false)).unwrap();
    assert_eq!(output, "WEBVTT\n\n00:00:00.000 --> 00:00:05.000\nHello  there\n");
}

/// Test all switches on the sample transcript
#[test]
fn test_convert_withAllOptions_shouldAddHeaderVoicesAndNoise() {
    let output = convert_str(common::SAMPLE_TRS, &options("en", true, true)).unwrap();

    let expected = "WEBVTT
Language: en

00:00:00.000 --> 00:00:02.500
<v Alice>Hello and welcome

00:00:02.500 --> 00:00:04.000
<v Alice>to the show <i>(laughs)</i> really

00:00:06.250 --> 00:00:12.500
<v Bob>Thanks for having me <i>(coughs)</i>
";
    assert_eq!(output, expected);
}

/// Test the language header toggle
#[test]
fn test_convert_withLanguageToggle_shouldOnlyAddHeaderWhenGiven() {
    let without = convert_str(common::SAMPLE_TRS, &options("", false, false)).unwrap();
    assert!(!without.contains("Language:"));
    assert!(without.starts_with("WEBVTT\n\n"));

    let with = convert_str(common::SAMPLE_TRS, &options("en", false, false)).unwrap();
    assert_eq!(with.lines().nth(1), Some("Language: en"));
    assert!(with.starts_with("WEBVTT\nLanguage: en\n\n"));
}

/// Test the speaker toggle
#[test]
fn test_convert_withSpeakerToggle_shouldOnlyAddVoicesWhenEnabled() {
    let without = convert_str(common::SAMPLE_TRS, &options("", false, false)).unwrap();
    assert!(!without.contains("<v "));

    let with = convert_str(common::SAMPLE_TRS, &options("", true, false)).unwrap();
    let text_lines: Vec<&str> = with
        .split("\n\n")
        .skip(1)
        .filter_map(|block| block.lines().nth(1))
        .collect();
    assert_eq!(text_lines.len(), 3);
    assert!(text_lines[0].starts_with("<v Alice>"));
    assert!(text_lines[1].starts_with("<v Alice>"));
    assert!(text_lines[2].starts_with("<v Bob>"));
}

/// Test the noise toggle
#[test]
fn test_convert_withNoiseToggle_shouldOnlyAddMarkupWhenEnabled() {
    let without = convert_str(common::SAMPLE_TRS, &options("", false, false)).unwrap();
    assert!(!without.contains("<i>("));

    let with = convert_str(common::SAMPLE_TRS, &options("", false, true)).unwrap();
    assert_eq!(with.matches("<i>(laughs)</i>").count(), 1);
    assert_eq!(with.matches("<i>(coughs)</i>").count(), 1);
}

/// Test a transcript whose turns carry no text
#[test]
fn test_convert_withSilentTurns_shouldOnlyWriteHeader() {
    let xml = common::trs_document(
        &[],
        "<Turn startTime=\"0\" endTime=\"5\">\n<Sync time=\"0\"/>\n</Turn>\n<Turn startTime=\"5\" endTime=\"9\"/>\n",
    );

    assert_eq!(convert_str(&xml, &options("", true, false)).unwrap(), "WEBVTT\n");
    assert_eq!(convert_str(&xml, &options("nl", true, false)).unwrap(), "WEBVTT\nLanguage: nl\n");
}

/// Test cues follow document order even when times go backwards
#[test]
fn test_convert_withOutOfOrderTurns_shouldKeepDocumentOrder() {
    let xml = common::trs_document(
        &[],
        "<Turn startTime=\"10\" endTime=\"12\"><Sync time=\"10\"/>later</Turn>\n<Turn startTime=\"0\" endTime=\"2\"><Sync time=\"0\"/>earlier</Turn>\n",
    );

    let output = convert_str(&xml, &options("", false, false)).unwrap();
    let later = output.find("later").unwrap();
    let earlier = output.find("earlier").unwrap();
    assert!(later < earlier);
}

/// Test errors abort the whole conversion
#[test]
fn test_convert_withUnknownEventAndNoise_shouldFailWithoutOutput() {
    let xml = common::trs_document(
        &[],
        "<Turn startTime=\"0\" endTime=\"2\"><Sync time=\"0\"/>ok<Event desc=\"pron=err\" type=\"pronounce\"/></Turn>\n",
    );

    assert!(convert_str(&xml, &options("", false, false)).is_ok());
    assert!(matches!(
        convert_str(&xml, &options("", false, true)),
        Err(ConversionError::UnknownEventCode(code)) if code == "pron=err"
    ));
}

/// Test a non-TRS document
#[test]
fn test_convert_withNonTrsDocument_shouldReportMissingSection() {
    let result = convert_str("<html><body/></html>", &ConversionOptions::default());
    assert!(matches!(result, Err(ConversionError::MissingSection("Speakers"))));

    let result = convert_str("not xml at all", &ConversionOptions::default());
    assert!(matches!(result, Err(ConversionError::Parse(_))));
}

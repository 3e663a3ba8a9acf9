/*!
 * # trs2vtt - Transcriber to WebVTT converter
 *
 * A Rust library for turning Transcriber (TRS) transcriptions into WebVTT
 * caption tracks.
 *
 * ## Features
 *
 * - Parse TRS documents (speakers, sections, turns, sync points, events)
 * - Split each speaker turn into cues at its synchronization points
 * - Optional `<v Speaker>` voice spans
 * - Optional inline markup for non-speech events (laughter, coughs, ...)
 * - Optional `Language:` header
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: Seconds to `HH:MM:SS.mmm` conversion
 * - `transcript`: Typed TRS document model and XML reader
 * - `subtitle_processor`: Cue segmentation and WebVTT rendering
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod subtitle_processor;
pub mod timecode;
pub mod transcript;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, ConversionError};
pub use subtitle_processor::{convert, convert_str, ConversionOptions, Cue};
pub use timecode::{format_time, generate_timestamp, Timestamp};
pub use transcript::{Annotation, NoiseEvent, SpeakerTable, Transcript, Turn};

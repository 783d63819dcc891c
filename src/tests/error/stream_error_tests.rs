//! Tests for StreamError.

use std::error::Error;

use crate::error::StreamError;
use crate::stage::TransferStage;

#[test]
fn display_prefixes_stage() {
    let err = StreamError::new(TransferStage::Configuration, "webhook table missing");
    assert_eq!(err.to_string(), "[configuration] webhook table missing");
}

#[test]
fn source_is_underlying_error() {
    let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated row");
    let err = StreamError::new(TransferStage::Entities, io);

    assert_eq!(err.stage, TransferStage::Entities);
    let source = err.source().expect("source should be set");
    assert_eq!(source.to_string(), "truncated row");
}

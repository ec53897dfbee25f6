use unicode_normalization::UnicodeNormalization;

/// NFKC-normalize, then strip every whitespace character. OCR of scripts
/// without word spacing (Japanese in particular) inserts spurious spaces;
/// stripping them keeps the memo comparison stable between captures.
pub fn normalize(text: &str) -> String {
    text.nfkc().filter(|c| !c.is_whitespace()).collect()
}

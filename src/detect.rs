use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct DetectedInput {
    pub mime: Option<String>,
    pub ext_hint: Option<String>,
}

impl DetectedInput {
    /// False when the sniffed content disagrees with the file's extension.
    /// Unknown content or a missing extension is not a disagreement.
    pub fn matches_extension(&self, extension: Option<&str>) -> bool {
        match (self.ext_hint.as_deref(), extension) {
            (Some(hint), Some(ext)) => hint == normalize(ext),
            _ => true,
        }
    }
}

pub fn detect_input(path: &Path) -> DetectedInput {
    let kind = infer::get_from_path(path).ok().flatten();
    DetectedInput {
        mime: kind.map(|kind| kind.mime_type().to_string()),
        ext_hint: kind.map(|kind| kind.extension().to_string()),
    }
}

fn normalize(ext: &str) -> &str {
    match ext {
        "wave" => "wav",
        _ => ext,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_information_is_not_a_mismatch() {
        let detected = DetectedInput::default();
        assert!(detected.matches_extension(Some("wav")));
        assert!(detected.matches_extension(None));
    }

    #[test]
    fn hint_is_compared_against_the_normalized_extension() {
        let detected = DetectedInput {
            mime: Some("audio/x-wav".to_string()),
            ext_hint: Some("wav".to_string()),
        };
        assert!(detected.matches_extension(Some("wav")));
        assert!(detected.matches_extension(Some("wave")));
        assert!(!detected.matches_extension(Some("mp3")));
    }
}

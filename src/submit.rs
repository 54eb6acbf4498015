use crate::selection::{
    BIT_DEPTHS, BitRateMode, InputFile, MAX_BIT_RATE, MAX_QUALITY, MAX_VBR_QUALITY, MIN_BIT_RATE,
    OutputFormat, Selection,
};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// Name of the file part in the multipart body, matching the form field the
/// conversion endpoint expects.
pub const FORM_FILE_KEY: &str = "form-file";

#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    pub action: String,
    pub file: PathBuf,
    pub file_name: String,
    pub output_name: String,
    pub fields: Vec<(String, String)>,
}

/// The endpoint path is the input file's extension: `song.mp3` routes to
/// `mp3`, `episode.WAV` to `wav`.
pub fn compute_action(input: &InputFile) -> Result<String> {
    match input.extension.clone() {
        Some(ext) => Ok(ext),
        None => bail!("input file {} has no extension", input.name),
    }
}

pub fn build_request(selection: &Selection) -> Result<SubmitRequest> {
    let input = selection.input().context("input file is required")?;
    let action = compute_action(input)?;
    if !input.is_accepted() {
        bail!(
            "unsupported input extension: {} (expected one of wav, wave, mp3, flac)",
            action
        );
    }
    let format = selection
        .output_format()
        .context("output format is required")?;

    let mut fields = vec![("format".to_string(), format.id().to_string())];
    match format {
        OutputFormat::Wav => {
            let bit_depth = selection
                .options
                .bit_depth
                .context("bit depth is required for wav output")?;
            if !BIT_DEPTHS.contains(&bit_depth) {
                bail!("bit depth must be one of 8, 16, 24, 32");
            }
            fields.push(("wav-bit-depth".to_string(), bit_depth.to_string()));
        }
        OutputFormat::Mp3 => {
            let channel_mode = selection
                .options
                .channel_mode
                .context("channel mode is required for mp3 output")?;
            fields.push(("mp3-channel-mode".to_string(), channel_mode.id().to_string()));

            let mode = selection
                .bit_rate_mode()
                .context("bit rate mode is required for mp3 output")?;
            fields.push(("mp3-bit-rate-mode".to_string(), mode.id().to_string()));
            match mode {
                BitRateMode::Cbr | BitRateMode::Abr => {
                    let bit_rate = selection.options.bit_rate.context("bit rate is required")?;
                    if !(MIN_BIT_RATE..=MAX_BIT_RATE).contains(&bit_rate) {
                        bail!(
                            "bit rate must be between {} and {}",
                            MIN_BIT_RATE,
                            MAX_BIT_RATE
                        );
                    }
                    fields.push(("mp3-bit-rate".to_string(), bit_rate.to_string()));
                }
                BitRateMode::Vbr => {
                    let vbr_quality = selection
                        .options
                        .vbr_quality
                        .context("vbr quality is required")?;
                    if vbr_quality > MAX_VBR_QUALITY {
                        bail!("vbr quality must be between 0 and {}", MAX_VBR_QUALITY);
                    }
                    fields.push(("mp3-vbr-quality".to_string(), vbr_quality.to_string()));
                }
            }

            if selection.quality_toggle() {
                let quality = selection
                    .options
                    .quality
                    .context("quality value is required when the quality toggle is on")?;
                if quality > MAX_QUALITY {
                    bail!("quality must be between 0 and {}", MAX_QUALITY);
                }
                fields.push(("mp3-use-quality".to_string(), "true".to_string()));
                fields.push(("mp3-quality".to_string(), quality.to_string()));
            }
        }
    }

    let stem = input
        .name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(input.name.as_str());
    Ok(SubmitRequest {
        action,
        file: input.path.clone(),
        file_name: input.name.clone(),
        output_name: format!("{stem}.{}", format.default_extension()),
        fields,
    })
}

pub fn render_request(request: &SubmitRequest, server: &str) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Endpoint: {}/{}", server.trim_end_matches('/'), request.action));
    lines.push(format!("File: {}", request.file.display()));
    lines.push(format!("Output: {}", request.output_name));
    for (key, value) in &request.fields {
        lines.push(format!("Field: {key}={value}"));
    }
    lines.join("\n")
}

pub fn render_request_json(request: &SubmitRequest) -> Result<String> {
    serde_json::to_string_pretty(request).context("failed to serialize request")
}

/// One-shot dispatch: post the file and fields to the endpoint, stream the
/// encoded result to a temp file next to the destination, persist it.
pub fn dispatch(
    server: &str,
    request: &SubmitRequest,
    output: Option<&Path>,
    overwrite: bool,
) -> Result<PathBuf> {
    let destination = match output {
        Some(path) => path.to_path_buf(),
        None => default_destination(request),
    };
    if destination == request.file {
        bail!("output would overwrite the input file; pass --output to choose another path");
    }
    if destination.exists() && !overwrite {
        bail!("output exists; pass --overwrite to replace it");
    }
    let parent = non_empty_parent(&destination);
    std::fs::create_dir_all(parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;

    let url = format!("{}/{}", server.trim_end_matches('/'), request.action);
    let mut form = reqwest::blocking::multipart::Form::new();
    for (key, value) in &request.fields {
        form = form.text(key.clone(), value.clone());
    }
    let form = form
        .file(FORM_FILE_KEY, &request.file)
        .with_context(|| format!("failed to read {}", request.file.display()))?;

    // Encoding large files can outlive the default client timeout.
    let client = reqwest::blocking::Client::builder()
        .timeout(None::<std::time::Duration>)
        .build()
        .context("failed to build http client")?;
    let mut response = client
        .post(&url)
        .multipart(form)
        .send()
        .with_context(|| format!("failed to reach {url}"))?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().unwrap_or_default();
        bail!("server rejected request ({status}): {}", message.trim());
    }

    let mut temp = Builder::new()
        .prefix(".encx.tmp")
        .tempfile_in(parent)
        .context("failed to create temp file")?;
    let written = response
        .copy_to(&mut temp)
        .context("failed to download result")?;
    if written == 0 {
        bail!("server returned an empty file");
    }
    temp.persist(&destination)
        .context("failed to finalize output")?;
    Ok(destination)
}

fn default_destination(request: &SubmitRequest) -> PathBuf {
    match request.file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(&request.output_name),
        _ => PathBuf::from(&request.output_name),
    }
}

fn non_empty_parent(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::ChannelMode;

    fn base_selection(path: &str) -> Selection {
        let mut selection = Selection::default();
        selection.set_input_file(InputFile::new(path));
        selection
    }

    #[test]
    fn action_is_the_lowercased_last_extension() {
        assert_eq!(
            compute_action(&InputFile::new("episode.WAV")).unwrap(),
            "wav"
        );
        assert_eq!(compute_action(&InputFile::new("song.mp3")).unwrap(), "mp3");
        assert!(compute_action(&InputFile::new("noextension")).is_err());
    }

    #[test]
    fn builds_wav_request() {
        let mut selection = base_selection("/music/track.mp3");
        selection.select_output_format("wav");
        selection.options.bit_depth = Some(16);

        let request = build_request(&selection).unwrap();
        assert_eq!(request.action, "mp3");
        assert_eq!(request.output_name, "track.wav");
        assert_eq!(
            request.fields,
            vec![
                ("format".to_string(), "wav".to_string()),
                ("wav-bit-depth".to_string(), "16".to_string()),
            ]
        );
    }

    #[test]
    fn builds_mp3_vbr_request_with_quality() {
        let mut selection = base_selection("clip.wav");
        selection.select_output_format("mp3");
        selection.options.channel_mode = Some(ChannelMode::Stereo);
        selection.select_bit_rate_mode("vbr");
        selection.options.vbr_quality = Some(2);
        selection.set_quality_toggle(true);
        selection.options.quality = Some(7);

        let request = build_request(&selection).unwrap();
        assert_eq!(request.action, "wav");
        assert_eq!(request.output_name, "clip.mp3");
        assert_eq!(
            request.fields,
            vec![
                ("format".to_string(), "mp3".to_string()),
                ("mp3-channel-mode".to_string(), "stereo".to_string()),
                ("mp3-bit-rate-mode".to_string(), "vbr".to_string()),
                ("mp3-vbr-quality".to_string(), "2".to_string()),
                ("mp3-use-quality".to_string(), "true".to_string()),
                ("mp3-quality".to_string(), "7".to_string()),
            ]
        );
    }

    #[test]
    fn inactive_sub_options_stay_out_of_the_payload() {
        let mut selection = base_selection("clip.wav");
        selection.select_output_format("mp3");
        selection.options.channel_mode = Some(ChannelMode::Mono);
        selection.select_bit_rate_mode("cbr");
        selection.options.bit_rate = Some(192);
        // Stale values from earlier choices must not leak.
        selection.options.vbr_quality = Some(4);
        selection.options.quality = Some(9);

        let request = build_request(&selection).unwrap();
        assert!(
            request
                .fields
                .iter()
                .all(|(key, _)| key != "mp3-vbr-quality" && key != "mp3-quality")
        );
    }

    #[test]
    fn rejects_incomplete_selections() {
        let err = build_request(&Selection::default()).unwrap_err();
        assert!(err.to_string().contains("input file"));

        let selection = base_selection("clip.wav");
        let err = build_request(&selection).unwrap_err();
        assert!(err.to_string().contains("output format"));

        let mut selection = base_selection("clip.wav");
        selection.select_output_format("wav");
        let err = build_request(&selection).unwrap_err();
        assert!(err.to_string().contains("bit depth"));

        let mut selection = base_selection("clip.wav");
        selection.select_output_format("mp3");
        selection.options.channel_mode = Some(ChannelMode::Stereo);
        let err = build_request(&selection).unwrap_err();
        assert!(err.to_string().contains("bit rate mode"));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut selection = base_selection("clip.wav");
        selection.select_output_format("wav");
        selection.options.bit_depth = Some(12);
        assert!(build_request(&selection).is_err());

        let mut selection = base_selection("clip.wav");
        selection.select_output_format("mp3");
        selection.options.channel_mode = Some(ChannelMode::Stereo);
        selection.select_bit_rate_mode("cbr");
        selection.options.bit_rate = Some(400);
        assert!(build_request(&selection).is_err());

        selection.select_bit_rate_mode("vbr");
        selection.options.vbr_quality = Some(10);
        assert!(build_request(&selection).is_err());
    }

    #[test]
    fn rejects_quality_toggle_without_a_value() {
        let mut selection = base_selection("clip.wav");
        selection.select_output_format("mp3");
        selection.options.channel_mode = Some(ChannelMode::Stereo);
        selection.select_bit_rate_mode("vbr");
        selection.options.vbr_quality = Some(4);
        selection.set_quality_toggle(true);
        let err = build_request(&selection).unwrap_err();
        assert!(err.to_string().contains("quality value"));
    }

    #[test]
    fn rejects_unsupported_input_extensions() {
        let mut selection = base_selection("cover.jpeg");
        selection.select_output_format("mp3");
        let err = build_request(&selection).unwrap_err();
        assert!(err.to_string().contains("unsupported input extension"));
    }

    #[test]
    fn default_destination_sits_beside_the_input() {
        let mut selection = base_selection("/music/in/track.flac");
        selection.select_output_format("wav");
        selection.options.bit_depth = Some(24);
        let request = build_request(&selection).unwrap();
        assert_eq!(
            default_destination(&request),
            PathBuf::from("/music/in/track.wav")
        );
    }

    #[test]
    fn renders_the_request() {
        let mut selection = base_selection("clip.wav");
        selection.select_output_format("wav");
        selection.options.bit_depth = Some(8);
        let request = build_request(&selection).unwrap();
        let text = render_request(&request, "http://localhost:8080/");
        assert!(text.contains("Endpoint: http://localhost:8080/wav"));
        assert!(text.contains("Field: wav-bit-depth=8"));
    }
}

use std::fmt;
use std::path::{Path, PathBuf};

pub const BIT_DEPTHS: [u32; 4] = [8, 16, 24, 32];
pub const MIN_BIT_RATE: u32 = 8;
pub const MAX_BIT_RATE: u32 = 320;
pub const MAX_VBR_QUALITY: u8 = 9;
pub const MAX_QUALITY: u8 = 9;

pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["wav", "wave", "mp3", "flac"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub name: String,
    pub path: PathBuf,
    pub extension: Option<String>,
}

impl InputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.to_string())
            .unwrap_or_else(|| path.display().to_string());
        let extension = extension_of(&name);
        Self {
            name,
            path,
            extension,
        }
    }

    pub fn is_accepted(&self) -> bool {
        match self.extension.as_deref() {
            Some(ext) => ACCEPTED_EXTENSIONS.contains(&ext),
            None => false,
        }
    }
}

/// Lower-cased suffix after the last dot of the file name. Names without a
/// dot, leading-dot names, and trailing-dot names have no extension.
pub fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Wav,
    Mp3,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Wav, OutputFormat::Mp3];

    pub fn id(self) -> &'static str {
        match self {
            OutputFormat::Wav => "wav",
            OutputFormat::Mp3 => "mp3",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "wav" => Some(OutputFormat::Wav),
            "mp3" => Some(OutputFormat::Mp3),
            _ => None,
        }
    }

    pub fn default_extension(self) -> &'static str {
        self.id()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitRateMode {
    Cbr,
    Abr,
    Vbr,
}

impl BitRateMode {
    pub const ALL: [BitRateMode; 3] = [BitRateMode::Cbr, BitRateMode::Abr, BitRateMode::Vbr];

    pub fn id(self) -> &'static str {
        match self {
            BitRateMode::Cbr => "cbr",
            BitRateMode::Abr => "abr",
            BitRateMode::Vbr => "vbr",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "cbr" => Some(BitRateMode::Cbr),
            "abr" => Some(BitRateMode::Abr),
            "vbr" => Some(BitRateMode::Vbr),
            _ => None,
        }
    }
}

impl fmt::Display for BitRateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    JointStereo,
    Stereo,
    Mono,
}

impl ChannelMode {
    pub const ALL: [ChannelMode; 3] = [
        ChannelMode::JointStereo,
        ChannelMode::Stereo,
        ChannelMode::Mono,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ChannelMode::JointStereo => "joint-stereo",
            ChannelMode::Stereo => "stereo",
            ChannelMode::Mono => "mono",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "joint-stereo" => Some(ChannelMode::JointStereo),
            "stereo" => Some(ChannelMode::Stereo),
            "mono" => Some(ChannelMode::Mono),
            _ => None,
        }
    }
}

impl fmt::Display for ChannelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub bit_depth: Option<u32>,
    pub channel_mode: Option<ChannelMode>,
    pub bit_rate: Option<u32>,
    pub vbr_quality: Option<u8>,
    pub quality: Option<u8>,
}

/// The complete set of user choices driving visibility and submission.
/// Mutated only through the methods below; unknown identifiers are ignored
/// since the form only ever offers ids from the catalog.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    input: Option<InputFile>,
    format: Option<OutputFormat>,
    bit_rate_mode: Option<BitRateMode>,
    use_quality: bool,
    pub options: EncodeOptions,
}

impl Selection {
    pub fn input(&self) -> Option<&InputFile> {
        self.input.as_ref()
    }

    pub fn output_format(&self) -> Option<OutputFormat> {
        self.format
    }

    pub fn bit_rate_mode(&self) -> Option<BitRateMode> {
        self.bit_rate_mode
    }

    pub fn quality_toggle(&self) -> bool {
        self.use_quality
    }

    pub fn set_input_file(&mut self, file: InputFile) {
        self.input = Some(file);
    }

    pub fn select_output_format(&mut self, id: &str) {
        if let Some(format) = OutputFormat::from_id(id) {
            self.format = Some(format);
        }
    }

    pub fn select_bit_rate_mode(&mut self, id: &str) {
        if let Some(mode) = BitRateMode::from_id(id) {
            self.bit_rate_mode = Some(mode);
        }
    }

    pub fn set_quality_toggle(&mut self, on: bool) {
        self.use_quality = on;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased_suffix_after_last_dot() {
        assert_eq!(extension_of("episode.WAV").as_deref(), Some("wav"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("track.mp3").as_deref(), Some("mp3"));
        assert_eq!(extension_of("noextension"), None);
        assert_eq!(extension_of(".config"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn input_file_derives_name_and_extension() {
        let file = InputFile::new("/music/Song.FLAC");
        assert_eq!(file.name, "Song.FLAC");
        assert_eq!(file.extension.as_deref(), Some("flac"));
        assert!(file.is_accepted());

        let odd = InputFile::new("/music/cover.jpeg");
        assert!(!odd.is_accepted());
    }

    #[test]
    fn unknown_identifiers_are_ignored() {
        let mut selection = Selection::default();
        selection.select_output_format("ogg");
        assert_eq!(selection.output_format(), None);

        selection.select_output_format("mp3");
        selection.select_bit_rate_mode("fancy");
        assert_eq!(selection.output_format(), Some(OutputFormat::Mp3));
        assert_eq!(selection.bit_rate_mode(), None);
    }

    #[test]
    fn mutators_are_idempotent() {
        let mut selection = Selection::default();
        selection.select_output_format("wav");
        selection.select_output_format("wav");
        assert_eq!(selection.output_format(), Some(OutputFormat::Wav));

        selection.set_quality_toggle(true);
        selection.set_quality_toggle(true);
        assert!(selection.quality_toggle());
    }

    #[test]
    fn input_file_is_replaced_wholesale() {
        let mut selection = Selection::default();
        selection.set_input_file(InputFile::new("a.wav"));
        selection.set_input_file(InputFile::new("b"));
        let input = selection.input().unwrap();
        assert_eq!(input.name, "b");
        assert_eq!(input.extension, None);
    }

    #[test]
    fn mode_slot_survives_format_switches() {
        let mut selection = Selection::default();
        selection.select_output_format("mp3");
        selection.select_bit_rate_mode("vbr");
        selection.select_output_format("wav");
        selection.select_output_format("mp3");
        assert_eq!(selection.bit_rate_mode(), Some(BitRateMode::Vbr));
    }
}

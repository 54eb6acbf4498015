use crate::selection::{BitRateMode, OutputFormat, Selection};
use std::collections::BTreeSet;
use std::fmt;

/// A form region whose visibility is derived from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Panel {
    FileName,
    OutputFormats,
    WavOptions,
    Mp3Options,
    Mp3BitRate,
    Mp3VbrQuality,
    Mp3QualityValue,
    Submit,
}

impl Panel {
    pub fn id(self) -> &'static str {
        match self {
            Panel::FileName => "file-name",
            Panel::OutputFormats => "output-formats",
            Panel::WavOptions => "wav-options",
            Panel::Mp3Options => "mp3-options",
            Panel::Mp3BitRate => "mp3-bit-rate",
            Panel::Mp3VbrQuality => "mp3-vbr-quality",
            Panel::Mp3QualityValue => "mp3-quality-value",
            Panel::Submit => "submit",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet(BTreeSet<Panel>);

impl VisibleSet {
    pub fn contains(&self, panel: Panel) -> bool {
        self.0.contains(&panel)
    }

    pub fn iter(&self) -> impl Iterator<Item = Panel> + '_ {
        self.0.iter().copied()
    }
}

fn option_group(format: OutputFormat) -> Panel {
    match format {
        OutputFormat::Wav => Panel::WavOptions,
        OutputFormat::Mp3 => Panel::Mp3Options,
    }
}

fn mode_sub_panel(mode: BitRateMode) -> Panel {
    match mode {
        // cbr and abr share the bit-rate control, vbr has its own quality.
        BitRateMode::Cbr | BitRateMode::Abr => Panel::Mp3BitRate,
        BitRateMode::Vbr => Panel::Mp3VbrQuality,
    }
}

/// Maps the selection to the set of visible panels. Everything not in the
/// returned set is hidden. The rules run in a fixed order; a later rule may
/// add a panel back but never removes one added earlier.
pub fn project(selection: &Selection) -> VisibleSet {
    let mut visible = BTreeSet::new();

    if let Some(input) = selection.input() {
        visible.insert(Panel::FileName);

        // A file without an extension has no routing target; the form stays
        // collapsed as if no file were chosen.
        if input.extension.is_some() {
            visible.insert(Panel::OutputFormats);

            if let Some(format) = selection.output_format() {
                visible.insert(option_group(format));
                visible.insert(Panel::Submit);

                if format == OutputFormat::Mp3
                    && let Some(mode) = selection.bit_rate_mode()
                {
                    visible.insert(mode_sub_panel(mode));
                }
            }
        }
    }

    // Evaluated last: the quality value tracks the toggle alone and may
    // reappear even when its mp3 container is hidden.
    if selection.quality_toggle() {
        visible.insert(Panel::Mp3QualityValue);
    }

    VisibleSet(visible)
}

use crate::detect::{self, DetectedInput};
use crate::project::{self, Panel, VisibleSet};
use crate::selection::{
    ACCEPTED_EXTENSIONS, BIT_DEPTHS, BitRateMode, ChannelMode, InputFile, OutputFormat, Selection,
};
use crate::submit::{self, SubmitRequest};
use anyhow::Result;
use crossterm::event::{self, Event as CEvent, KeyCode};
use crossterm::execute as crossterm_execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use std::path::PathBuf;
use std::time::Duration;

pub struct InteractiveDefaults {
    pub selection: Selection,
    pub server: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FocusPanel {
    File,
    Options,
}

/// One selectable row of the options panel. The rendered row set is the
/// image of the visibility projection, recomputed every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OptionRow {
    Format,
    BitDepth,
    ChannelMode,
    BitRateMode,
    BitRate,
    VbrQuality,
    UseQuality,
    QualityValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EditTarget {
    FilePath,
    BitRate,
    VbrQuality,
    QualityValue,
}

struct EditState {
    target: EditTarget,
    buffer: String,
}

#[derive(Clone)]
struct BrowserEntry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

struct BrowserState {
    cwd: PathBuf,
    entries: Vec<BrowserEntry>,
    selected: usize,
    filter: String,
}

struct WizardState {
    focus: FocusPanel,
    option_index: usize,
    edit: Option<EditState>,
    browser: Option<BrowserState>,
    error: Option<String>,
    detected: Option<DetectedInput>,
    selection: Selection,
    server: String,
}

struct Theme {
    primary: Color,
    accent: Color,
    muted: Color,
    bad: Color,
}

impl Theme {
    fn new() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            bad: Color::Red,
        }
    }
}

impl WizardState {
    fn new(defaults: InteractiveDefaults) -> Self {
        let detected = defaults
            .selection
            .input()
            .map(|input| detect::detect_input(&input.path));
        Self {
            focus: FocusPanel::File,
            option_index: 0,
            edit: None,
            browser: None,
            error: None,
            detected,
            selection: defaults.selection,
            server: defaults.server,
        }
    }

    fn visible(&self) -> VisibleSet {
        project::project(&self.selection)
    }
}

/// Runs the form until the user quits or submits. Returns the request to
/// dispatch, if any; dispatch itself happens outside the terminal session.
pub fn run_interactive(defaults: InteractiveDefaults) -> Result<Option<SubmitRequest>> {
    let _guard = TerminalGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
    let mut state = WizardState::new(defaults);
    let tick_rate = Duration::from_millis(120);

    loop {
        terminal.draw(|frame| render_form(frame, &state))?;

        if event::poll(tick_rate)?
            && let CEvent::Key(key) = event::read()?
        {
            if state.edit.is_some() {
                handle_edit_key(&mut state, key.code);
                continue;
            }
            if state.browser.is_some() {
                handle_browser_key(&mut state, key.code);
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                KeyCode::Tab => {
                    state.focus = match state.focus {
                        FocusPanel::File if !option_rows(&state.visible()).is_empty() => {
                            FocusPanel::Options
                        }
                        FocusPanel::File => FocusPanel::File,
                        FocusPanel::Options => FocusPanel::File,
                    };
                }
                KeyCode::Up => move_selection(&mut state, -1),
                KeyCode::Down => move_selection(&mut state, 1),
                KeyCode::Left => cycle_row(&mut state, -1),
                KeyCode::Right => cycle_row(&mut state, 1),
                KeyCode::Char(' ') => toggle_row(&mut state),
                KeyCode::Char('b') => open_browser(&mut state),
                KeyCode::Enter => open_edit(&mut state),
                KeyCode::F(5) => {
                    if state.visible().contains(Panel::Submit) {
                        match submit::build_request(&state.selection) {
                            Ok(request) => return Ok(Some(request)),
                            Err(err) => state.error = Some(err.to_string()),
                        }
                    } else {
                        state.error =
                            Some("choose an input file and an output format first".to_string());
                    }
                }
                _ => {}
            }
        }
    }
}

fn option_rows(visible: &VisibleSet) -> Vec<OptionRow> {
    let mut rows = Vec::new();
    if visible.contains(Panel::OutputFormats) {
        rows.push(OptionRow::Format);
    }
    if visible.contains(Panel::WavOptions) {
        rows.push(OptionRow::BitDepth);
    }
    if visible.contains(Panel::Mp3Options) {
        rows.push(OptionRow::ChannelMode);
        rows.push(OptionRow::BitRateMode);
    }
    if visible.contains(Panel::Mp3BitRate) {
        rows.push(OptionRow::BitRate);
    }
    if visible.contains(Panel::Mp3VbrQuality) {
        rows.push(OptionRow::VbrQuality);
    }
    if visible.contains(Panel::Mp3Options) {
        rows.push(OptionRow::UseQuality);
    }
    if visible.contains(Panel::Mp3QualityValue) {
        rows.push(OptionRow::QualityValue);
    }
    rows
}

fn current_row(state: &WizardState) -> Option<OptionRow> {
    if state.focus != FocusPanel::Options {
        return None;
    }
    let rows = option_rows(&state.visible());
    if rows.is_empty() {
        return None;
    }
    rows.get(state.option_index.min(rows.len() - 1)).copied()
}

fn move_selection(state: &mut WizardState, delta: isize) {
    if state.focus != FocusPanel::Options {
        return;
    }
    let len = option_rows(&state.visible()).len();
    if len == 0 {
        return;
    }
    let index = state.option_index.min(len - 1) as isize + delta;
    state.option_index = index.clamp(0, len as isize - 1) as usize;
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>, delta: isize) -> T {
    let len = all.len() as isize;
    let index = current
        .and_then(|value| all.iter().position(|item| *item == value))
        .map(|index| index as isize);
    let next = match index {
        Some(index) => (index + delta).rem_euclid(len),
        None if delta < 0 => len - 1,
        None => 0,
    };
    all[next as usize]
}

fn cycle_row(state: &mut WizardState, delta: isize) {
    match current_row(state) {
        Some(OptionRow::Format) => {
            let next = cycle(&OutputFormat::ALL, state.selection.output_format(), delta);
            state.selection.select_output_format(next.id());
        }
        Some(OptionRow::BitDepth) => {
            let next = cycle(&BIT_DEPTHS, state.selection.options.bit_depth, delta);
            state.selection.options.bit_depth = Some(next);
        }
        Some(OptionRow::ChannelMode) => {
            let next = cycle(&ChannelMode::ALL, state.selection.options.channel_mode, delta);
            state.selection.options.channel_mode = Some(next);
        }
        Some(OptionRow::BitRateMode) => {
            let next = cycle(&BitRateMode::ALL, state.selection.bit_rate_mode(), delta);
            state.selection.select_bit_rate_mode(next.id());
        }
        _ => {}
    }
}

fn toggle_row(state: &mut WizardState) {
    if current_row(state) == Some(OptionRow::UseQuality) {
        let next = !state.selection.quality_toggle();
        state.selection.set_quality_toggle(next);
    }
}

fn open_edit(state: &mut WizardState) {
    let (target, buffer) = match state.focus {
        FocusPanel::File => (
            EditTarget::FilePath,
            state
                .selection
                .input()
                .map(|input| input.path.display().to_string())
                .unwrap_or_default(),
        ),
        FocusPanel::Options => match current_row(state) {
            Some(OptionRow::BitRate) => (
                EditTarget::BitRate,
                option_text(state.selection.options.bit_rate),
            ),
            Some(OptionRow::VbrQuality) => (
                EditTarget::VbrQuality,
                option_text(state.selection.options.vbr_quality),
            ),
            Some(OptionRow::QualityValue) => (
                EditTarget::QualityValue,
                option_text(state.selection.options.quality),
            ),
            _ => return,
        },
    };
    state.edit = Some(EditState { target, buffer });
}

fn option_text<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn handle_edit_key(state: &mut WizardState, key: KeyCode) {
    let Some(edit) = state.edit.as_mut() else {
        return;
    };
    match key {
        KeyCode::Esc => {
            state.edit = None;
        }
        KeyCode::Backspace => {
            edit.buffer.pop();
        }
        KeyCode::Char(ch) => {
            edit.buffer.push(ch);
        }
        KeyCode::Enter => {
            let target = edit.target;
            let value = edit.buffer.trim().to_string();
            state.edit = None;
            commit_edit(state, target, &value);
        }
        _ => {}
    }
}

fn commit_edit(state: &mut WizardState, target: EditTarget, value: &str) {
    state.error = None;
    if value.is_empty() {
        return;
    }
    match target {
        EditTarget::FilePath => set_file(state, PathBuf::from(value)),
        EditTarget::BitRate => match value.parse::<u32>() {
            Ok(parsed) => state.selection.options.bit_rate = Some(parsed),
            Err(_) => state.error = Some("bit rate must be a number".to_string()),
        },
        EditTarget::VbrQuality => match value.parse::<u8>() {
            Ok(parsed) => state.selection.options.vbr_quality = Some(parsed),
            Err(_) => state.error = Some("vbr quality must be a number".to_string()),
        },
        EditTarget::QualityValue => match value.parse::<u8>() {
            Ok(parsed) => state.selection.options.quality = Some(parsed),
            Err(_) => state.error = Some("quality must be a number".to_string()),
        },
    }
}

fn set_file(state: &mut WizardState, path: PathBuf) {
    let file = InputFile::new(path);
    state.detected = Some(detect::detect_input(&file.path));
    state.selection.set_input_file(file);
}

fn open_browser(state: &mut WizardState) {
    if state.focus != FocusPanel::File {
        return;
    }
    let cwd = state
        .selection
        .input()
        .and_then(|input| input.path.parent().map(|parent| parent.to_path_buf()))
        .filter(|parent| parent.is_dir())
        .unwrap_or_else(|| {
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        });
    let mut browser = BrowserState {
        cwd,
        entries: Vec::new(),
        selected: 0,
        filter: String::new(),
    };
    refresh_browser_entries(&mut browser);
    state.browser = Some(browser);
}

fn handle_browser_key(state: &mut WizardState, key: KeyCode) {
    let Some(mut browser) = state.browser.take() else {
        return;
    };
    match key {
        KeyCode::Esc => return,
        KeyCode::Up => {
            browser.selected = browser.selected.saturating_sub(1);
        }
        KeyCode::Down => {
            if browser.selected + 1 < browser.entries.len() {
                browser.selected += 1;
            }
        }
        KeyCode::Backspace => {
            if browser.filter.pop().is_none()
                && let Some(parent) = browser.cwd.parent()
            {
                browser.cwd = parent.to_path_buf();
            }
            refresh_browser_entries(&mut browser);
        }
        KeyCode::Enter => {
            if let Some(entry) = browser.entries.get(browser.selected).cloned() {
                if entry.is_dir {
                    browser.cwd = entry.path;
                    browser.filter.clear();
                    refresh_browser_entries(&mut browser);
                } else {
                    set_file(state, entry.path);
                    return;
                }
            }
        }
        KeyCode::Char(ch) => {
            browser.filter.push(ch);
            refresh_browser_entries(&mut browser);
        }
        _ => {}
    }
    state.browser = Some(browser);
}

fn refresh_browser_entries(browser: &mut BrowserState) {
    let mut entries = Vec::new();
    if let Some(parent) = browser.cwd.parent() {
        entries.push(BrowserEntry {
            name: "..".to_string(),
            path: parent.to_path_buf(),
            is_dir: true,
        });
    }
    let filter = browser.filter.to_lowercase();
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    if let Ok(read_dir) = std::fs::read_dir(&browser.cwd) {
        for entry in read_dir.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            if !filter.is_empty() && !name.to_lowercase().contains(&filter) {
                continue;
            }
            let is_dir = path.is_dir();
            let entry = BrowserEntry { name, path, is_dir };
            if is_dir {
                dirs.push(entry);
            } else {
                files.push(entry);
            }
        }
    }
    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));
    entries.extend(dirs);
    entries.extend(files);
    browser.entries = entries;
    if browser.selected >= browser.entries.len() {
        browser.selected = browser.entries.len().saturating_sub(1);
    }
}

fn render_form(frame: &mut Frame<'_>, state: &WizardState) {
    let theme = Theme::new();
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    let visible = state.visible();

    let file_label = if visible.contains(Panel::FileName) {
        state
            .selection
            .input()
            .map(|input| input.name.clone())
            .unwrap_or_default()
    } else {
        "select a file".to_string()
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "encx",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(file_label, Style::default().fg(theme.accent)),
        Span::raw("  -> "),
        Span::styled(state.server.clone(), Style::default().fg(theme.muted)),
    ]))
    .block(
        Block::default().borders(Borders::ALL).title(Span::styled(
            "Encode",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
    );
    frame.render_widget(header, layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(layout[1]);

    render_file_panel(frame, state, &theme, body[0]);
    render_options_panel(frame, state, &visible, &theme, body[1]);

    let footer_text = if let Some(edit) = &state.edit {
        format!(
            "Edit: {} (Enter save, Esc cancel)",
            edit_label(edit.target)
        )
    } else if let Some(error) = state.error.as_deref() {
        format!("Error: {error}")
    } else {
        let mut help =
            "Tab switch panel, Up/Down select, Left/Right cycle, Space toggle, Enter edit, b browse"
                .to_string();
        if visible.contains(Panel::Submit) {
            help.push_str(", F5 submit");
        }
        help.push_str(", q quit");
        help
    };
    let footer_style = if state.error.is_some() && state.edit.is_none() {
        Style::default().fg(theme.bad)
    } else {
        Style::default().fg(theme.muted)
    };
    let footer = Paragraph::new(Line::from(Span::styled(footer_text, footer_style))).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled("Help", Style::default().fg(theme.muted))),
    );
    frame.render_widget(footer, layout[2]);

    if let Some(edit) = &state.edit {
        render_edit_popup(frame, edit, &theme, area);
    }
    if let Some(browser) = &state.browser {
        render_browser_modal(frame, browser, &theme);
    }
}

fn render_file_panel(frame: &mut Frame<'_>, state: &WizardState, theme: &Theme, area: Rect) {
    let mut lines = Vec::new();
    match state.selection.input() {
        Some(input) => {
            lines.push(Line::from(format!("Path: {}", input.path.display())));
            match input.extension.as_deref() {
                Some(ext) => lines.push(Line::from(format!("Extension: {ext}"))),
                None => lines.push(Line::from(Span::styled(
                    "No extension - cannot derive a submission target",
                    Style::default().fg(theme.bad),
                ))),
            }
            if let Some(detected) = &state.detected {
                lines.push(Line::from(format!(
                    "Detected: {}",
                    detected.mime.as_deref().unwrap_or("unknown")
                )));
                if !detected.matches_extension(input.extension.as_deref()) {
                    lines.push(Line::from(Span::styled(
                        format!(
                            "Warning: content looks like {}",
                            detected.ext_hint.as_deref().unwrap_or("something else")
                        ),
                        Style::default().fg(theme.bad),
                    )));
                }
            }
            if input.extension.is_some() && !input.is_accepted() {
                lines.push(Line::from(Span::styled(
                    format!("Warning: accepted inputs are {}", ACCEPTED_EXTENSIONS.join(", ")),
                    Style::default().fg(theme.bad),
                )));
            }
        }
        None => {
            lines.push(Line::from("No file chosen"));
            lines.push(Line::from(Span::styled(
                "Enter to type a path, b to browse",
                Style::default().fg(theme.muted),
            )));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            "File",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(match state.focus {
            FocusPanel::File => Style::default().fg(theme.primary),
            FocusPanel::Options => Style::default().fg(theme.muted),
        });
    let panel = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

fn render_options_panel(
    frame: &mut Frame<'_>,
    state: &WizardState,
    visible: &VisibleSet,
    theme: &Theme,
    area: Rect,
) {
    let rows = option_rows(visible);
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let (label, value) = row_label_value(*row, &state.selection);
            ListItem::new(Line::from(format!("{label:<14} {value}")))
        })
        .collect();
    let mut list_state = ratatui::widgets::ListState::default();
    if !rows.is_empty() && state.focus == FocusPanel::Options {
        list_state.select(Some(state.option_index.min(rows.len() - 1)));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            "Options",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(match state.focus {
            FocusPanel::Options => Style::default().fg(theme.primary),
            FocusPanel::File => Style::default().fg(theme.muted),
        });
    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn row_label_value(row: OptionRow, selection: &Selection) -> (&'static str, String) {
    match row {
        OptionRow::Format => (
            "Format",
            selection
                .output_format()
                .map(|format| format.id().to_string())
                .unwrap_or_else(|| "<select>".to_string()),
        ),
        OptionRow::BitDepth => (
            "Bit depth",
            selection
                .options
                .bit_depth
                .map(|depth| format!("{depth} bit"))
                .unwrap_or_else(|| "<select>".to_string()),
        ),
        OptionRow::ChannelMode => (
            "Channel mode",
            selection
                .options
                .channel_mode
                .map(|mode| mode.id().to_string())
                .unwrap_or_else(|| "<select>".to_string()),
        ),
        OptionRow::BitRateMode => (
            "Bit rate mode",
            selection
                .bit_rate_mode()
                .map(|mode| mode.id().to_string())
                .unwrap_or_else(|| "<select>".to_string()),
        ),
        OptionRow::BitRate => (
            "Bit rate",
            selection
                .options
                .bit_rate
                .map(|rate| format!("{rate} kbps"))
                .unwrap_or_else(|| "<8-320>".to_string()),
        ),
        OptionRow::VbrQuality => (
            "Vbr quality",
            selection
                .options
                .vbr_quality
                .map(|quality| quality.to_string())
                .unwrap_or_else(|| "<0-9>".to_string()),
        ),
        OptionRow::UseQuality => ("Quality", yes_no(selection.quality_toggle())),
        OptionRow::QualityValue => (
            "Quality value",
            selection
                .options
                .quality
                .map(|quality| quality.to_string())
                .unwrap_or_else(|| "<0-9>".to_string()),
        ),
    }
}

fn edit_label(target: EditTarget) -> &'static str {
    match target {
        EditTarget::FilePath => "File path",
        EditTarget::BitRate => "Bit rate",
        EditTarget::VbrQuality => "Vbr quality",
        EditTarget::QualityValue => "Quality value",
    }
}

fn yes_no(value: bool) -> String {
    if value { "yes".to_string() } else { "no".to_string() }
}

fn render_edit_popup(frame: &mut Frame<'_>, edit: &EditState, theme: &Theme, area: Rect) {
    let popup = centered_rect(70, 20, area);
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        format!("Editing {}", edit_label(edit.target)),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ));
    let text = Paragraph::new(Line::from(Span::styled(
        edit.buffer.as_str(),
        Style::default().fg(theme.primary),
    )))
    .block(block)
    .wrap(Wrap { trim: true });
    frame.render_widget(text, popup);
}

fn render_browser_modal(frame: &mut Frame<'_>, browser: &BrowserState, theme: &Theme) {
    let area = centered_rect(80, 70, frame.area());
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(area);

    let filter_label = if browser.filter.is_empty() {
        "<type to filter>".to_string()
    } else {
        browser.filter.clone()
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            browser.cwd.display().to_string(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(filter_label, Style::default().fg(theme.muted)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled("Browse", Style::default().fg(theme.accent))),
    );
    frame.render_widget(header, layout[0]);

    let items: Vec<ListItem> = browser
        .entries
        .iter()
        .map(|entry| {
            let name = if entry.is_dir {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            };
            ListItem::new(Line::from(name))
        })
        .collect();
    let mut list_state = ratatui::widgets::ListState::default();
    if !browser.entries.is_empty() {
        list_state.select(Some(browser.selected.min(browser.entries.len() - 1)));
    }
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(list, layout[1], &mut list_state);

    let footer = Paragraph::new(Line::from(Span::styled(
        "Enter open/select, Backspace filter/up, Esc close",
        Style::default().fg(theme.muted),
    )))
    .block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(footer, layout[2]);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        crossterm_execute!(stdout, EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm_execute!(stdout, LeaveAlternateScreen);
    }
}

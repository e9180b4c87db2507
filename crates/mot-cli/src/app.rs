use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mot_core::{
    ChatService, Config, Conversation, Reply, Role, SessionHandle, SessionState, TranscriptStore,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Terminal,
};
use std::io;
use tokio::sync::mpsc;

use crate::commands::{self, CommandResult};
use crate::theme::Theme;

// ── Single-prompt mode ──────────────────────────────────────────────────

pub async fn run_single_prompt(service: &ChatService, prompt: &str) -> Result<()> {
    let (_, reply) = service.exchange(Conversation::new(), prompt).await;
    if let Some(failure) = reply.failure() {
        eprintln!("({failure})");
    }
    println!("{reply}");
    Ok(())
}

// ── Interactive TUI ─────────────────────────────────────────────────────

/// One message to send, with the history it should be answered against.
struct ChatRequest {
    history: Conversation,
    message: String,
}

/// Reported back by the worker once the model call finishes.
struct ChatReply {
    message: String,
    reply: Reply,
}

#[derive(Clone, Copy, PartialEq)]
enum MessageRole {
    User,
    Assistant,
    Failure,
    System,
}

#[derive(Clone)]
struct ChatMessage {
    role: MessageRole,
    content: String,
    timestamp: String,
}

struct AppState {
    // Input (cursor counts chars, not bytes)
    input: String,
    cursor_pos: usize,
    input_history: Vec<String>,
    history_pos: Option<usize>,

    // Chat
    session: SessionState,
    messages: Vec<ChatMessage>,
    scroll_offset: usize,

    // Processing state
    is_processing: bool,

    // Status
    status_text: String,
    model_name: String,

    // Display
    should_quit: bool,
    theme: Theme,
}

impl AppState {
    fn new(store: TranscriptStore, config: &Config, theme_name: &str) -> Self {
        let model_name = config
            .endpoint
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(config.endpoint.as_str())
            .to_string();
        let storage = store.base_dir().display().to_string();

        let mut state = Self {
            input: String::new(),
            cursor_pos: 0,
            input_history: Vec::new(),
            history_pos: None,

            session: SessionState::new(store, config.initial_handle.clone()),
            messages: Vec::new(),
            scroll_offset: 0,

            is_processing: false,

            status_text: "Ready".into(),
            model_name,

            should_quit: false,
            theme: Theme::by_name(theme_name),
        };
        state.add_message(
            MessageRole::System,
            format!(
                "Chats are saved to {storage}/\n\
                 Type a message and press Enter. Ctrl+N new chat, Ctrl+S save, /help for commands."
            ),
        );
        state
    }

    fn add_message(&mut self, role: MessageRole, content: String) {
        self.messages.push(ChatMessage {
            role,
            content,
            timestamp: now_str(),
        });
        self.scroll_to_bottom();
    }

    fn notice(&mut self, content: impl Into<String>) {
        self.add_message(MessageRole::System, content.into());
    }

    /// Rebuild the display from the session's conversation.
    fn show_conversation(&mut self) {
        let shown: Vec<ChatMessage> = self
            .session
            .conversation()
            .iter()
            .map(|turn| ChatMessage {
                role: match turn.role() {
                    Role::User => MessageRole::User,
                    Role::Assistant => MessageRole::Assistant,
                },
                content: turn.content().to_string(),
                timestamp: String::new(),
            })
            .collect();
        self.messages = shown;
        self.scroll_to_bottom();
    }

    fn scroll_to_bottom(&mut self) {
        // Will be resolved on next draw
        self.scroll_offset = usize::MAX;
    }

    fn push_history(&mut self, input: String) {
        if !input.is_empty() && self.input_history.last() != Some(&input) {
            self.input_history.push(input);
        }
        self.history_pos = None;
    }

    fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }
        let pos = match self.history_pos {
            None => self.input_history.len().saturating_sub(1),
            Some(0) => 0,
            Some(p) => p - 1,
        };
        self.history_pos = Some(pos);
        self.set_input(self.input_history[pos].clone());
    }

    fn history_next(&mut self) {
        match self.history_pos {
            None => {}
            Some(pos) => {
                if pos + 1 >= self.input_history.len() {
                    self.history_pos = None;
                    self.set_input(String::new());
                } else {
                    self.history_pos = Some(pos + 1);
                    self.set_input(self.input_history[pos + 1].clone());
                }
            }
        }
    }

    fn set_input(&mut self, input: String) {
        self.cursor_pos = input.chars().count();
        self.input = input;
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_pos(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn insert_str(&mut self, text: &str) {
        let at = self.byte_pos(self.cursor_pos);
        self.input.insert_str(at, text);
        self.cursor_pos += text.chars().count();
    }

    /// Refuse session actions while a reply is outstanding.
    fn busy(&mut self, action: &str) -> bool {
        if self.is_processing {
            self.notice(format!("Wait for the current reply before {action}."));
        }
        self.is_processing
    }

    fn new_chat(&mut self) {
        if self.busy("starting a new chat") {
            return;
        }
        let handle = self.session.reset().clone();
        self.messages.clear();
        self.notice(format!("New chat started. It will be saved as {handle}."));
        self.status_text = "Ready".into();
    }

    fn save_chat(&mut self) {
        if self.busy("saving") {
            return;
        }
        match self.session.save() {
            Ok(path) => {
                let turns = self.session.conversation().len();
                self.notice(format!("Saved {turns} turns to {}", path.display()));
                self.status_text = "Saved".into();
            }
            Err(e) => {
                tracing::warn!("Failed to save chat: {e}");
                self.notice(format!("Save failed: {e}"));
                self.status_text = "Save failed".into();
            }
        }
    }

    fn list_chats(&mut self) {
        match self.session.store().list() {
            Ok(chats) if chats.is_empty() => self.notice("No saved chats yet."),
            Ok(chats) => {
                let mut text = String::from("Saved chats (newest first):");
                for chat in chats.iter().take(20) {
                    let when = chat
                        .modified
                        .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "unknown".into());
                    let current = if &chat.handle == self.session.handle() {
                        "  (current)"
                    } else {
                        ""
                    };
                    text.push_str(&format!(
                        "\n  {}  {when}  {} bytes{current}",
                        chat.handle, chat.size_bytes
                    ));
                }
                if chats.len() > 20 {
                    text.push_str(&format!("\n  ... and {} more", chats.len() - 20));
                }
                self.notice(text);
            }
            Err(e) => self.notice(format!("Could not list chats: {e}")),
        }
    }

    fn load_chat(&mut self, name: String) {
        if self.busy("loading a chat") {
            return;
        }
        match self.session.load(SessionHandle::new(name)) {
            Ok(conversation) => {
                let turns = conversation.len();
                self.show_conversation();
                let handle = self.session.handle().clone();
                self.notice(format!("Loaded {turns} turns from {handle}."));
            }
            Err(e) => self.notice(format!("Load failed: {e}")),
        }
    }
}

pub async fn run_tui(
    service: ChatService,
    store: TranscriptStore,
    config: &Config,
    theme_name: &str,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = AppState::new(store, config, theme_name);

    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ChatRequest>();
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<ChatReply>();

    // One request at a time; the UI owns the conversation.
    let worker = tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            let reply = service.reply(&request.history, &request.message).await;
            let answered = ChatReply {
                message: request.message,
                reply,
            };
            if reply_tx.send(answered).is_err() {
                break;
            }
        }
    });

    let result = event_loop(&mut terminal, &mut state, &request_tx, &mut reply_rx);

    worker.abort();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    request_tx: &mpsc::UnboundedSender<ChatRequest>,
    reply_rx: &mut mpsc::UnboundedReceiver<ChatReply>,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw_ui(f, state))?;

        // Process finished replies (non-blocking)
        while let Ok(answered) = reply_rx.try_recv() {
            handle_reply(state, answered);
        }

        if event::poll(std::time::Duration::from_millis(33))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(state, key, request_tx);
                }
            }
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

fn handle_reply(state: &mut AppState, answered: ChatReply) {
    let role = if answered.reply.is_failure() {
        MessageRole::Failure
    } else {
        MessageRole::Assistant
    };
    state
        .session
        .append(answered.message, answered.reply.text());
    state.add_message(role, answered.reply.text().to_string());

    state.is_processing = false;
    state.status_text = match answered.reply.failure() {
        Some(failure) => format!("Model error: {failure}"),
        None => "Ready".into(),
    };
}

fn draw_ui(f: &mut ratatui::Frame, state: &mut AppState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // banner
            Constraint::Min(5),    // chat
            Constraint::Length(3), // input
            Constraint::Length(1), // status
        ])
        .split(f.area());

    draw_banner(f, main_chunks[0], &state.theme);

    let chat_area = main_chunks[1];
    let chat_lines = build_chat_lines(&state.messages, state.is_processing, &state.theme);
    let total_lines = chat_lines.len();

    // Calculate visible height (area height - 2 for borders)
    let visible_height = chat_area.height.saturating_sub(2) as usize;

    // Resolve scroll_to_bottom
    let max_scroll = total_lines.saturating_sub(visible_height);
    if state.scroll_offset > max_scroll {
        state.scroll_offset = max_scroll;
    }

    let chat = Paragraph::new(Text::from(chat_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" M.O.T  {} ", state.session.handle()))
                .border_style(Style::default().fg(state.theme.border)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll_row(state.scroll_offset), 0));
    f.render_widget(chat, chat_area);

    if total_lines > visible_height {
        let mut scrollbar_state = ScrollbarState::new(max_scroll).position(state.scroll_offset);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("^"))
                .end_symbol(Some("v")),
            chat_area,
            &mut scrollbar_state,
        );
    }

    draw_input(f, main_chunks[2], state);
    draw_status_bar(f, main_chunks[3], state);
}

fn draw_banner(f: &mut ratatui::Frame, area: Rect, theme: &Theme) {
    let banner = Line::from(vec![
        Span::styled(
            "Welcome to ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "M.O.T",
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " · Powered by Mixtral AI",
            Style::default().fg(theme.accent),
        ),
    ]);
    f.render_widget(Paragraph::new(banner).alignment(Alignment::Center), area);
}

fn render_message_lines<'a>(msg: &'a ChatMessage, theme: &Theme) -> Vec<Line<'a>> {
    let (prefix, color) = match msg.role {
        MessageRole::User => ("You > ", theme.user_color),
        MessageRole::Assistant => ("M.O.T > ", theme.assistant_color),
        MessageRole::Failure => ("M.O.T > ", theme.error),
        MessageRole::System => ("", theme.system_color),
    };
    let indent = " ".repeat(prefix.len());

    let mut lines: Vec<Line> = Vec::new();
    for (i, raw_line) in msg.content.lines().enumerate() {
        if i == 0 {
            let mut spans = vec![
                Span::styled(
                    prefix,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(raw_line, Style::default().fg(color)),
            ];
            if !msg.timestamp.is_empty() && msg.role != MessageRole::System {
                spans.push(Span::styled(
                    format!("  {}", msg.timestamp),
                    Style::default().fg(theme.muted).add_modifier(Modifier::DIM),
                ));
            }
            lines.push(Line::from(spans));
        } else {
            lines.push(Line::from(vec![
                Span::raw(indent.clone()),
                Span::styled(raw_line, Style::default().fg(color)),
            ]));
        }
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            prefix,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }
    lines
}

fn build_chat_lines<'a>(
    messages: &'a [ChatMessage],
    is_processing: bool,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let mut chat_lines: Vec<Line> = Vec::new();

    for msg in messages {
        chat_lines.extend(render_message_lines(msg, theme));
        chat_lines.push(Line::raw(""));
    }

    if is_processing {
        chat_lines.push(Line::from(Span::styled(
            "  Waiting for Mixtral...",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::DIM),
        )));
    }

    chat_lines
}

fn draw_input(f: &mut ratatui::Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let input_style = if state.is_processing {
        Style::default().fg(theme.muted)
    } else {
        Style::default().fg(theme.fg)
    };

    let title = if state.is_processing {
        " Sending... "
    } else if state.input.starts_with('/') {
        " Command "
    } else {
        " Type your message here...  Enter to send "
    };

    let input = Paragraph::new(state.input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(if state.input.starts_with('/') {
                    theme.accent
                } else {
                    theme.border
                })),
        )
        .style(input_style);
    f.render_widget(input, area);

    if !state.is_processing {
        let cursor_x = area.x + state.cursor_pos as u16 + 1;
        // Clamp cursor to area width
        let max_x = area.x + area.width.saturating_sub(2);
        f.set_cursor_position((cursor_x.min(max_x), area.y + 1));
    }
}

fn draw_status_bar(f: &mut ratatui::Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let conversation = state.session.conversation();

    let status_spans = vec![
        Span::styled(
            format!(" {} ", state.model_name),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("| {} ", state.session.handle()),
            Style::default().fg(theme.accent),
        ),
        Span::styled(
            format!("| {} turns ", conversation.len()),
            Style::default().fg(theme.muted),
        ),
        Span::styled("| ", Style::default().fg(theme.muted)),
        Span::styled(&state.status_text, Style::default().fg(theme.muted)),
        Span::styled(
            "  Ctrl+N new  Ctrl+S save  Ctrl+C quit",
            Style::default().fg(theme.muted),
        ),
    ];
    f.render_widget(Paragraph::new(Line::from(status_spans)), area);
}

/// Paragraph scroll is a u16 row; longer transcripts pin to the last one.
fn scroll_row(offset: usize) -> u16 {
    offset.min(u16::MAX as usize) as u16
}

fn handle_key(state: &mut AppState, key: KeyEvent, request_tx: &mpsc::UnboundedSender<ChatRequest>) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            state.should_quit = true;
        }

        (KeyModifiers::CONTROL, KeyCode::Char('n')) => state.new_chat(),
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => state.save_chat(),

        // Submit input
        (_, KeyCode::Enter) => {
            if state.input.trim().is_empty() || state.is_processing {
                return;
            }

            let input = std::mem::take(&mut state.input);
            state.cursor_pos = 0;
            state.push_history(input.clone());

            if input.starts_with('/') {
                handle_command_result(state, commands::handle_command(&input));
                return;
            }

            let request = ChatRequest {
                history: state.session.conversation().clone(),
                message: input.clone(),
            };
            if request_tx.send(request).is_err() {
                state.notice("The chat worker has stopped; restart M.O.T.");
                return;
            }
            state.add_message(MessageRole::User, input);
            state.is_processing = true;
            state.status_text = "Sending...".into();
        }

        // Input editing
        (_, KeyCode::Backspace) => {
            if state.cursor_pos > 0 && !state.is_processing {
                let at = state.byte_pos(state.cursor_pos - 1);
                state.input.remove(at);
                state.cursor_pos -= 1;
            }
        }
        (_, KeyCode::Delete) => {
            if state.cursor_pos < state.input_len() && !state.is_processing {
                let at = state.byte_pos(state.cursor_pos);
                state.input.remove(at);
            }
        }
        (_, KeyCode::Left) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                state.cursor_pos = word_boundary_left(&state.input, state.cursor_pos);
            } else {
                state.cursor_pos = state.cursor_pos.saturating_sub(1);
            }
        }
        (_, KeyCode::Right) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                state.cursor_pos = word_boundary_right(&state.input, state.cursor_pos);
            } else if state.cursor_pos < state.input_len() {
                state.cursor_pos += 1;
            }
        }
        (KeyModifiers::CONTROL, KeyCode::Char('a')) | (_, KeyCode::Home) => {
            state.cursor_pos = 0;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('e')) | (_, KeyCode::End) => {
            state.cursor_pos = state.input_len();
        }

        // Scroll (Shift+arrows, must come before bare arrows)
        (KeyModifiers::SHIFT, KeyCode::Up) => {
            state.scroll_offset = state.scroll_offset.saturating_sub(1);
        }
        (KeyModifiers::SHIFT, KeyCode::Down) => {
            state.scroll_offset = state.scroll_offset.saturating_add(1);
        }
        (_, KeyCode::PageUp) => {
            state.scroll_offset = state.scroll_offset.saturating_sub(20);
        }
        (_, KeyCode::PageDown) => {
            state.scroll_offset = state.scroll_offset.saturating_add(20);
        }

        // History navigation
        (_, KeyCode::Up) => {
            if !state.is_processing {
                state.history_prev();
            }
        }
        (_, KeyCode::Down) => {
            if !state.is_processing {
                state.history_next();
            }
        }

        // Kill line (Ctrl+U)
        (KeyModifiers::CONTROL, KeyCode::Char('u')) if !state.is_processing => {
            let at = state.byte_pos(state.cursor_pos);
            state.input.drain(..at);
            state.cursor_pos = 0;
        }

        // Kill to end of line (Ctrl+K)
        (KeyModifiers::CONTROL, KeyCode::Char('k')) if !state.is_processing => {
            let at = state.byte_pos(state.cursor_pos);
            state.input.truncate(at);
        }

        // Delete word backward (Ctrl+W)
        (KeyModifiers::CONTROL, KeyCode::Char('w')) if !state.is_processing => {
            let new_pos = word_boundary_left(&state.input, state.cursor_pos);
            let (from, to) = (state.byte_pos(new_pos), state.byte_pos(state.cursor_pos));
            state.input.drain(from..to);
            state.cursor_pos = new_pos;
        }

        // Clipboard paste (Ctrl+V); newlines would break the transcript format
        (KeyModifiers::CONTROL, KeyCode::Char('v')) => {
            if !state.is_processing {
                if let Ok(mut cb) = arboard::Clipboard::new() {
                    if let Ok(text) = cb.get_text() {
                        let text = text.replace('\r', "").replace('\n', " ");
                        state.insert_str(&text);
                    }
                }
            }
        }

        // Tab completion for commands
        (_, KeyCode::Tab) => {
            if state.input.starts_with('/') && !state.is_processing {
                if let Some(completion) = commands::complete_command(&state.input) {
                    state.set_input(completion);
                }
            }
        }

        // Regular character input
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            if !state.is_processing {
                state.insert_str(c.encode_utf8(&mut [0; 4]));
            }
        }

        _ => {}
    }
}

fn handle_command_result(state: &mut AppState, result: CommandResult) {
    match result {
        CommandResult::Message(msg) => state.notice(msg),
        CommandResult::Quit => {
            state.should_quit = true;
        }
        CommandResult::NewChat => state.new_chat(),
        CommandResult::SaveChat => state.save_chat(),
        CommandResult::ListChats => state.list_chats(),
        CommandResult::LoadChat(name) => state.load_chat(name),
        CommandResult::ThemeChanged(name) => {
            state.theme = Theme::by_name(&name);
            state.notice(format!("Theme changed to: {}", state.theme.name));
        }
        CommandResult::ShowStatus => {
            let conversation = state.session.conversation();
            let status = format!(
                "Model:     {}\nChat file: {}\nDirectory: {}\nTurns:     {} ({} exchanges)",
                state.model_name,
                state.session.handle(),
                state.session.store().base_dir().display(),
                conversation.len(),
                conversation.exchanges(),
            );
            state.notice(status);
        }
        CommandResult::NotACommand => {}
    }
}

// ── Helper functions ────────────────────────────────────────────────────

fn word_boundary_left(s: &str, pos: usize) -> usize {
    let chars: Vec<char> = s.chars().collect();
    let mut i = pos.min(chars.len());
    // Skip whitespace, then the word before it
    while i > 0 && chars[i - 1] == ' ' {
        i -= 1;
    }
    while i > 0 && chars[i - 1] != ' ' {
        i -= 1;
    }
    i
}

fn word_boundary_right(s: &str, pos: usize) -> usize {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    let mut i = pos.min(len);
    // Skip current word, then the whitespace after it
    while i < len && chars[i] != ' ' {
        i += 1;
    }
    while i < len && chars[i] == ' ' {
        i += 1;
    }
    i
}

fn now_str() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundaries() {
        let s = "hello big world";
        assert_eq!(word_boundary_left(s, 15), 10);
        assert_eq!(word_boundary_left(s, 10), 6);
        assert_eq!(word_boundary_left(s, 0), 0);
        assert_eq!(word_boundary_right(s, 0), 6);
        assert_eq!(word_boundary_right(s, 12), 15);
    }

    #[test]
    fn test_word_boundaries_multibyte() {
        let s = "héllo wörld";
        assert_eq!(word_boundary_left(s, 11), 6);
        assert_eq!(word_boundary_right(s, 0), 6);
    }

    fn idle_state(dir: &tempfile::TempDir) -> AppState {
        let store = TranscriptStore::with_dir(dir.path()).unwrap();
        let config = Config::new("hf_test_token", dir.path());
        AppState::new(store, &config, "soft")
    }

    fn press(state: &mut AppState, modifiers: KeyModifiers, code: KeyCode) {
        let (request_tx, _request_rx) = mpsc::unbounded_channel();
        handle_key(state, KeyEvent::new(code, modifiers), &request_tx);
    }

    #[test]
    fn test_input_locked_while_processing() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut state = idle_state(&dir);
        state.set_input("/ch".to_string());
        state.cursor_pos = 2;
        state.is_processing = true;

        for (modifiers, code) in [
            (KeyModifiers::CONTROL, KeyCode::Char('u')),
            (KeyModifiers::CONTROL, KeyCode::Char('k')),
            (KeyModifiers::CONTROL, KeyCode::Char('w')),
            (KeyModifiers::NONE, KeyCode::Tab),
            (KeyModifiers::NONE, KeyCode::Backspace),
            (KeyModifiers::NONE, KeyCode::Char('x')),
        ] {
            press(&mut state, modifiers, code);
            assert_eq!(state.input, "/ch", "{modifiers:?} {code:?}");
        }
    }

    #[test]
    fn test_kill_keys_edit_when_idle() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut state = idle_state(&dir);
        state.set_input("hello big world".to_string());
        state.cursor_pos = 9;

        press(&mut state, KeyModifiers::CONTROL, KeyCode::Char('k'));
        assert_eq!(state.input, "hello big");
        press(&mut state, KeyModifiers::CONTROL, KeyCode::Char('w'));
        assert_eq!(state.input, "hello ");
        press(&mut state, KeyModifiers::CONTROL, KeyCode::Char('u'));
        assert_eq!(state.input, "");
    }

    #[test]
    fn test_scroll_row_saturates() {
        assert_eq!(scroll_row(42), 42);
        assert_eq!(scroll_row(u16::MAX as usize), u16::MAX);
        assert_eq!(scroll_row(70_000), u16::MAX);
    }
}

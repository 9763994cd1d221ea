//! Main UI Application
//!
//! Coordinates rendering and input handling across all screens.

use anyhow::Result;
use chrono::Datelike;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

use crate::activity::HeatmapCell;
use crate::game::{Game, GameState, MessageCategory};
use crate::insight::{FireQuote, PerformanceInsight};
use crate::progression::{all_achievements, level_progress, Rank, StatName};
use crate::quests::{Quest, QuestKind};

/// Truncate a string to fit within max_len characters, adding "…" if truncated
fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else if max_len <= 1 {
        "…".to_string()
    } else {
        let truncated: String = name.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Heatmap cells laid out in week columns, Monday on top.
/// Slots before the first day of the window are `None`.
fn heatmap_columns(cells: &[HeatmapCell]) -> Vec<[Option<u64>; 7]> {
    let Some(first) = cells.first() else {
        return Vec::new();
    };
    let offset = first.date.weekday().num_days_from_monday() as usize;
    let mut columns = vec![[None; 7]; (cells.len() + offset + 6) / 7];
    for (i, cell) in cells.iter().enumerate() {
        let slot = i + offset;
        columns[slot / 7][slot % 7] = Some(cell.xp);
    }
    columns
}

fn heat_color(xp: u64) -> Color {
    match xp {
        0 => Color::Rgb(45, 45, 55),
        1..=19 => Color::Rgb(76, 29, 149),
        20..=49 => Color::Rgb(109, 40, 217),
        50..=99 => Color::Rgb(139, 92, 246),
        _ => Color::Rgb(196, 181, 253),
    }
}

/// Quests in board order: main, side, then emergency
fn board_order(game: &Game) -> Vec<&Quest> {
    [QuestKind::Main, QuestKind::Side, QuestKind::Emergency]
        .iter()
        .flat_map(|&kind| game.catalog().by_kind(kind))
        .collect()
}

/// Main UI application
pub struct App {
    /// Index into the board-ordered quest list
    quest_cursor: usize,
    /// Quote shown on the board, refreshed from the game each frame
    quote: FireQuote,
    /// Analysis shown on the insights screen
    insight: Option<PerformanceInsight>,
    /// Whether the reset confirmation popup is open
    confirm_reset: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            quest_cursor: 0,
            quote: FireQuote::default(),
            insight: None,
            confirm_reset: false,
        }
    }

    /// Pull anything the renderer needs that requires mutable game access
    pub fn sync(&mut self, game: &mut Game) {
        game.update();
        self.quote = game.fire_quote();
        let count = game.catalog().len();
        if count > 0 && self.quest_cursor >= count {
            self.quest_cursor = count - 1;
        }
    }

    pub fn handle_input(&mut self, key: KeyEvent, game: &mut Game) -> Result<bool> {
        // Global quit shortcut
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            game.quit();
            return Ok(true);
        }

        if self.confirm_reset {
            return self.handle_reset_input(key, game);
        }

        match game.state() {
            GameState::QuestBoard => self.handle_board_input(key, game),
            GameState::Achievements | GameState::Insights => self.handle_overlay_input(key, game),
            GameState::Quit => Ok(true),
        }
    }

    fn handle_board_input(&mut self, key: KeyEvent, game: &mut Game) -> Result<bool> {
        let count = game.catalog().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.quest_cursor = self.quest_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.quest_cursor + 1 < count {
                    self.quest_cursor += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let id = board_order(game).get(self.quest_cursor).map(|q| q.id.clone());
                if let Some(id) = id {
                    // Already-completed quests are ignored by the session
                    game.complete_quest(&id);
                }
            }
            KeyCode::Char('a') => game.set_state(GameState::Achievements),
            KeyCode::Char('i') => {
                self.insight = Some(game.performance_insight());
                game.set_state(GameState::Insights);
            }
            KeyCode::Char('R') => self.confirm_reset = true,
            KeyCode::Char('q') | KeyCode::Esc => {
                game.quit();
                return Ok(true);
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_overlay_input(&mut self, key: KeyEvent, game: &mut Game) -> Result<bool> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
                game.set_state(GameState::QuestBoard);
            }
            KeyCode::Char('a') => game.set_state(GameState::Achievements),
            KeyCode::Char('i') | KeyCode::Char('r') => {
                self.insight = Some(game.performance_insight());
                game.set_state(GameState::Insights);
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_reset_input(&mut self, key: KeyEvent, game: &mut Game) -> Result<bool> {
        if let KeyCode::Char('y') | KeyCode::Char('Y') = key.code {
            game.reset_progress();
            self.quest_cursor = 0;
        }
        self.confirm_reset = false;
        Ok(false)
    }

    pub fn render(&self, frame: &mut Frame, game: &Game) {
        // Clear the entire screen first to prevent artifacts
        frame.render_widget(Clear, frame.area());

        match game.state() {
            GameState::QuestBoard => self.render_board(frame, game),
            GameState::Achievements => self.render_achievements(frame, game),
            GameState::Insights => self.render_insights(frame, game),
            GameState::Quit => {}
        }

        if self.confirm_reset {
            self.render_reset_popup(frame);
        }
    }

    fn render_board(&self, frame: &mut Frame, game: &Game) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(9),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_header(frame, game, rows[0]);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);
        self.render_quests(frame, game, middle[0]);
        self.render_sidebar(frame, game, middle[1]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);
        self.render_weekly(frame, game, bottom[0]);
        self.render_messages(frame, game, bottom[1]);

        let help = Paragraph::new(
            "[j/k] Move  [Enter] Complete  [a] Achievements  [i] Insights  [R] Reset  [q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
        frame.render_widget(help, rows[3]);
    }

    fn render_header(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let player = game.player();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" QUESTLINE ")
            .border_style(Style::default().fg(rgb(player.rank.color())));

        let progress = level_progress(player.level, player.xp);
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(Color::Magenta).bg(Color::Black))
            .ratio(progress)
            .label(format!(
                "Level {}  ·  {}  ·  {}/{} XP",
                player.level,
                player.rank.label(),
                player.xp,
                player.xp_to_next()
            ));
        frame.render_widget(gauge, area);
    }

    fn render_quests(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Daily Quests · {} ", game.session().period()))
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let title_width = inner.width.saturating_sub(16) as usize;
        let mut lines = Vec::new();
        let mut current_kind = None;

        for (index, quest) in board_order(game).into_iter().enumerate() {
            if current_kind != Some(quest.kind) {
                if current_kind.is_some() {
                    lines.push(Line::from(""));
                }
                let color = if quest.kind == QuestKind::Emergency { Color::Red } else { Color::Yellow };
                lines.push(Line::from(Span::styled(
                    quest.kind.name(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )));
                current_kind = Some(quest.kind);
            }

            let done = game.session().is_completed(&quest.id);
            let selected = index == self.quest_cursor;
            let check = if done { "[x]" } else { "[ ]" };
            let mut style = if done {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(Color::White)
            };
            if selected {
                style = style.bg(Color::Rgb(40, 40, 60));
            }

            let reward = if quest.xp_reward > 0 {
                format!("+{} XP", quest.xp_reward)
            } else {
                String::new()
            };
            lines.push(Line::from(vec![
                Span::styled(if selected { "> " } else { "  " }, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{} ", check), style),
                Span::styled(
                    format!("{:<width$}", truncate_name(&quest.title, title_width), width = title_width),
                    style,
                ),
                Span::styled(format!(" {:>7} ", reward), Style::default().fg(Color::Magenta)),
                Span::raw(quest.stat.glyph().to_string()),
            ]));
        }

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "No quests configured.",
                Style::default().fg(Color::DarkGray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_sidebar(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Status ")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let player = game.player();
        let max_stat = player.stats.iter().map(|(_, v)| v).max().unwrap_or(0).max(1);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Streak: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{} days", game.live_streak()),
                    Style::default().fg(Color::Rgb(251, 146, 60)).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Today: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("+{} XP", game.activity().xp_on(game.today())),
                    Style::default().fg(Color::Magenta),
                ),
            ]),
            Line::from(""),
        ];

        // Stat bars scaled to the strongest stat
        let bar_width = inner.width.saturating_sub(20) as u32;
        for stat in StatName::ALL {
            let value = player.stats.get(stat);
            let filled = (value * bar_width / max_stat) as usize;
            lines.push(Line::from(vec![
                Span::styled(format!("{} {:<13}", stat.glyph(), stat.name()), Style::default().fg(Color::Gray)),
                Span::styled("█".repeat(filled), Style::default().fg(Color::Cyan)),
                Span::styled(format!(" {}", value), Style::default().fg(Color::White)),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("\"{}\"", self.quote.quote),
            Style::default().fg(Color::Rgb(250, 204, 21)).add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(Span::styled(
            format!("- {}", self.quote.author),
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    fn render_weekly(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let week = game.activity().weekly(game.today());
        let data: Vec<(&str, u64)> = week.iter().map(|d| (d.label(), d.xp)).collect();

        let chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Weekly XP ")
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .data(data.as_slice())
            .bar_width(4)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Magenta))
            .value_style(Style::default().fg(Color::Black).bg(Color::Magenta));
        frame.render_widget(chart, area);
    }

    fn render_messages(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Messages ")
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);

        let messages: Vec<Line> = game
            .messages()
            .iter()
            .rev()
            .take(inner.height as usize)
            .rev()
            .map(|msg| {
                let color = match msg.category {
                    MessageCategory::Quest => Color::Green,
                    MessageCategory::Progress => Color::Yellow,
                    MessageCategory::System => Color::Cyan,
                    MessageCategory::Warning => Color::LightRed,
                };
                Line::from(Span::styled(&msg.text, Style::default().fg(color)))
            })
            .collect();

        let para = Paragraph::new(messages).block(block);
        frame.render_widget(para, area);
    }

    fn render_achievements(&self, frame: &mut Frame, game: &Game) {
        let area = fullscreen_overlay(frame.area());

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" ACHIEVEMENTS & PERSONAL BESTS ")
            .border_style(Style::default().fg(Color::Yellow));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(9)])
            .split(inner);
        self.render_heatmap(frame, game, rows[1]);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[0]);

        // Personal bests
        let bests_block = Block::default()
            .borders(Borders::ALL)
            .title(" Personal Bests ")
            .border_style(Style::default().fg(Color::Cyan));
        let bests_inner = bests_block.inner(chunks[0]);
        frame.render_widget(bests_block, chunks[0]);

        let player = game.player();
        let mut bests_lines = vec![Line::from("")];
        for best in player.personal_bests.entries() {
            bests_lines.push(Line::from(vec![
                Span::styled(format!("{}: ", best.record.title()), Style::default().fg(Color::Gray)),
                Span::styled(best.display_value(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            ]));
        }
        bests_lines.push(Line::from(""));
        bests_lines.push(Line::from(vec![
            Span::styled("Current Rank: ", Style::default().fg(Color::Gray)),
            Span::styled(player.rank.label(), Style::default().fg(rgb(player.rank.color()))),
        ]));
        let ranks = game.session().engine().ranks();
        if let Some(next) = ranks.next_threshold(player.rank) {
            bests_lines.push(Line::from(vec![
                Span::styled("Next Rank: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{} at level {}", next.rank.label(), next.min_level),
                    Style::default().fg(rgb(next.rank.color())),
                ),
            ]));
        } else if player.rank == Rank::Monarch {
            bests_lines.push(Line::from(Span::styled(
                "You stand at the summit.",
                Style::default().fg(rgb(Rank::Monarch.color())),
            )));
        }
        frame.render_widget(Paragraph::new(bests_lines), bests_inner);

        // Achievements
        let ach_block = Block::default()
            .borders(Borders::ALL)
            .title(" Achievements ")
            .border_style(Style::default().fg(Color::Yellow));
        let ach_inner = ach_block.inner(chunks[1]);
        frame.render_widget(ach_block, chunks[1]);

        let mut ach_lines = vec![Line::from("")];
        for achievement in all_achievements() {
            let unlocked = achievement.is_unlocked(player);
            let (marker, style) = if unlocked {
                ("✓", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("🔒", Style::default().fg(Color::DarkGray))
            };
            ach_lines.push(Line::from(vec![
                Span::styled(format!(" {} {} ", marker, achievement.icon), style),
                Span::styled(achievement.name, style),
            ]));
            ach_lines.push(Line::from(Span::styled(
                format!("      {}", achievement.description),
                Style::default().fg(Color::Gray),
            )));
        }
        frame.render_widget(Paragraph::new(ach_lines), ach_inner);
    }

    fn render_heatmap(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Last 365 Days ")
            .border_style(Style::default().fg(Color::Magenta));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        const LABEL_WIDTH: u16 = 4;
        let columns = heatmap_columns(&game.activity().heatmap(game.today()));
        // Narrow terminals show only the most recent weeks
        let visible = (inner.width.saturating_sub(LABEL_WIDTH) as usize).min(columns.len());
        let shown = &columns[columns.len() - visible..];

        let labels = ["Mon", "", "Wed", "", "Fri", "", "Sun"];
        let lines: Vec<Line> = labels
            .iter()
            .enumerate()
            .map(|(row, label)| {
                let mut spans = vec![Span::styled(
                    format!("{:<width$}", label, width = LABEL_WIDTH as usize),
                    Style::default().fg(Color::DarkGray),
                )];
                spans.extend(shown.iter().map(|week| match week[row] {
                    Some(xp) => Span::styled("■", Style::default().fg(heat_color(xp))),
                    None => Span::raw(" "),
                }));
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_insights(&self, frame: &mut Frame, game: &Game) {
        let area = fullscreen_overlay(frame.area());

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" PERFORMANCE INSIGHTS ")
            .border_style(Style::default().fg(Color::Magenta));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(insight) = &self.insight else {
            frame.render_widget(Paragraph::new("Press [r] to analyze."), inner);
            return;
        };

        let heading = |text: &'static str| {
            Line::from(Span::styled(text, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        };
        let bullets = |items: &[String]| -> Vec<Line<'static>> {
            if items.is_empty() {
                vec![Line::from(Span::styled("  None", Style::default().fg(Color::DarkGray)))]
            } else {
                items.iter().map(|item| Line::from(format!("  • {}", item))).collect()
            }
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Readiness: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}/100", insight.readiness_score),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("   (last 7 days: {} XP)", game.activity().weekly_total(game.today())),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(""),
            Line::from(insight.analysis_summary.clone()),
            Line::from(""),
            heading("Weak Areas"),
        ];
        lines.extend(bullets(&insight.weak_areas));
        lines.push(Line::from(""));
        lines.push(heading("Recovery Missions"));
        lines.extend(bullets(&insight.suggested_recovery_missions));
        lines.push(Line::from(""));
        lines.push(heading("Focus Areas"));
        lines.extend(bullets(&insight.focus_areas));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[r] Refresh  [a] Achievements  [Esc] Back",
            Style::default().fg(Color::DarkGray),
        )));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    fn render_reset_popup(&self, frame: &mut Frame) {
        let area = centered_rect(50, 20, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Reset Progress ")
            .border_style(Style::default().fg(Color::Red));
        let text = vec![
            Line::from(""),
            Line::from("Erase all levels, ranks, streaks and records?"),
            Line::from(""),
            Line::from(Span::styled("[Y] Reset    [any key] Cancel", Style::default().fg(Color::Gray))),
        ];
        let para = Paragraph::new(text).block(block).alignment(Alignment::Center);
        frame.render_widget(para, area);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Near-fullscreen overlay with a small margin
fn fullscreen_overlay(r: Rect) -> Rect {
    let margin = if r.width > 100 && r.height > 40 { 2 } else { 1 };
    Rect {
        x: r.x + margin,
        y: r.y + margin,
        width: r.width.saturating_sub(margin * 2),
        height: r.height.saturating_sub(margin * 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataManager;
    use crate::game::{FixedClock, StoragePaths};
    use chrono::NaiveDate;
    use crossterm::event::KeyEventKind;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn game() -> Game {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        Game::open(DataManager::default(), Box::new(clock), StoragePaths::in_memory())
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Workout", 10), "Workout");
        assert_eq!(truncate_name("Solve 3 DSA problems", 8), "Solve 3…");
        assert_eq!(truncate_name("abc", 1), "…");
    }

    #[test]
    fn test_enter_completes_selected_quest() {
        let mut game = game();
        let mut app = App::new();
        app.handle_input(key(KeyCode::Down), &mut game).unwrap();
        app.handle_input(key(KeyCode::Enter), &mut game).unwrap();
        assert!(game.session().is_completed("mq2"));
        // Second press is ignored
        app.handle_input(key(KeyCode::Enter), &mut game).unwrap();
        assert_eq!(game.player().xp, 25);
    }

    #[test]
    fn test_screen_navigation() {
        let mut game = game();
        let mut app = App::new();
        app.handle_input(key(KeyCode::Char('a')), &mut game).unwrap();
        assert_eq!(game.state(), GameState::Achievements);
        app.handle_input(key(KeyCode::Char('i')), &mut game).unwrap();
        assert_eq!(game.state(), GameState::Insights);
        assert!(app.insight.is_some());
        app.handle_input(key(KeyCode::Esc), &mut game).unwrap();
        assert_eq!(game.state(), GameState::QuestBoard);
        assert!(app.handle_input(key(KeyCode::Char('q')), &mut game).unwrap());
    }

    #[test]
    fn test_reset_needs_confirmation() {
        let mut game = game();
        let mut app = App::new();
        app.handle_input(key(KeyCode::Enter), &mut game).unwrap();
        app.handle_input(key(KeyCode::Char('R')), &mut game).unwrap();
        app.handle_input(key(KeyCode::Char('n')), &mut game).unwrap();
        assert_eq!(game.player().xp, 50);

        app.handle_input(key(KeyCode::Char('R')), &mut game).unwrap();
        app.handle_input(key(KeyCode::Char('y')), &mut game).unwrap();
        assert_eq!(game.player().xp, 0);
    }

    #[test]
    fn test_render_all_screens() {
        let mut game = game();
        let mut app = App::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        game.complete_quest("mq1");

        for state in [GameState::QuestBoard, GameState::Achievements, GameState::Insights] {
            game.set_state(state);
            app.sync(&mut game);
            terminal.draw(|frame| app.render(frame, &game)).unwrap();

            let screen: String = terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect();
            let has_heatmap = screen.contains("Last 365 Days");
            assert_eq!(has_heatmap, state == GameState::Achievements);
            if has_heatmap {
                assert!(screen.contains('■'));
            }
        }
    }

    #[test]
    fn test_heatmap_columns_align_to_weekdays() {
        let mut game = game();
        game.complete_quest("mq1");
        // 2024-01-10 is a Wednesday, and so is the first day of its window
        let cells = game.activity().heatmap(game.today());
        let columns = heatmap_columns(&cells);

        assert_eq!(columns.len(), 53);
        assert_eq!(columns[0][0], None);
        assert_eq!(columns[0][1], None);
        assert_eq!(columns[0][2], Some(0));
        assert_eq!(columns[52][2], Some(50));
        assert_eq!(columns[52][3], None);
        assert!(heatmap_columns(&[]).is_empty());
    }

    #[test]
    fn test_heat_color_levels() {
        assert_ne!(heat_color(0), heat_color(1));
        assert_eq!(heat_color(20), heat_color(49));
        assert_ne!(heat_color(99), heat_color(100));
    }
}

use ratatui::prelude::*;
use ratatui::widgets::*;

const BANNER: &str = r#"
 ╔═════════════════════════════════════════════════════════╗
 ║   █████╗  ██████╗   ██████╗  █████╗  ██████╗  ███████╗  ║
 ║  ██╔══██╗ ██╔══██╗ ██╔════╝ ██╔══██╗ ██╔══██╗ ██╔════╝  ║
 ║  ███████║ ██████╔╝ ██║      ███████║ ██║  ██║ █████╗    ║
 ║  ██╔══██║ ██╔══██╗ ██║      ██╔══██║ ██║  ██║ ██╔══╝    ║
 ║  ██║  ██║ ██║  ██║ ╚██████╗ ██║  ██║ ██████╔╝ ███████╗  ║
 ║  ╚═╝  ╚═╝ ╚═╝  ╚═╝  ╚═════╝ ╚═╝  ╚═╝ ╚═════╝  ╚══════╝  ║
 ╚═════════════════════════════════════════════════════════╝"#;

struct GameTile {
    key: &'static str,
    icon: &'static str,
    name: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
    controls: &'static [(&'static str, &'static str)],
}

const GAME_TILES: [GameTile; 3] = [
    GameTile {
        key: "1",
        icon: "▦",
        name: "Tetris",
        desc: "Stack blocks,\nclear lines!",
        color: Color::Rgb(200, 120, 255),
        border_color: Color::Rgb(100, 60, 140),
        controls: &[
            ("← / →", "Move piece"),
            ("↑ / X", "Rotate clockwise"),
            ("Z", "Rotate counter-clockwise"),
            ("↓", "Soft drop"),
            ("Space", "Hard drop"),
        ],
    },
    GameTile {
        key: "2",
        icon: "ᗧ",
        name: "PacMan",
        desc: "Eat the pellets,\ndodge the ghosts!",
        color: Color::Rgb(255, 230, 0),
        border_color: Color::Rgb(130, 115, 20),
        controls: &[("↑ ↓ ← →", "Steer (turns are buffered)")],
    },
    GameTile {
        key: "3",
        icon: "🧱",
        name: "Breakout",
        desc: "Smash bricks\nwith the ball!",
        color: Color::Rgb(220, 80, 80),
        border_color: Color::Rgb(120, 40, 40),
        controls: &[("← / →", "Move paddle"), ("Mouse", "Drag paddle")],
    },
];

fn render_game_tile(frame: &mut Frame, area: Rect, tile: &GameTile, selected: bool, last_score: Option<u32>) {
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let mut lines: Vec<Line> = Vec::new();

    // Key + Icon + Name line
    let name_color = if selected { Color::Rgb(255, 255, 255) } else { tile.color };
    lines.push(Line::from(vec![
        Span::styled(format!("[{}] ", tile.key), Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(format!("{} ", tile.icon), Style::default().fg(tile.color)),
        Span::styled(tile.name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ]));

    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(Span::styled(
            desc_line,
            Style::default().fg(if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) }),
        )));
    }

    if let Some(score) = last_score {
        lines.push(Line::from(Span::styled(
            format!("Last: {}", score),
            Style::default().fg(Color::Rgb(255, 215, 0)),
        )));
    }

    if selected {
        lines.push(Line::from(Span::styled(
            "▶ Enter to play",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

fn control_line(key: &str, what: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<17}", key), Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(what.to_string(), Style::default().fg(Color::Rgb(140, 140, 140))),
    ])
}

fn game_controls(tile: &GameTile) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {} {}", tile.icon, tile.name),
            Style::default().fg(tile.color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(tile.controls.iter().map(|(key, what)| control_line(key, what)));
    lines.push(control_line("P", "Pause"));
    lines.push(control_line("R / Enter", "Restart"));
    lines
}

/// Home screen. `selected_game` indexes the tiles; `status` is the last
/// launch error, if any.
pub fn render_home(
    frame: &mut Frame,
    area: Rect,
    selected_game: usize,
    last_scores: &[Option<u32>; 3],
    status: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Banner
            Constraint::Length(2), // Subtitle / status
            Constraint::Length(8), // Game tiles
            Constraint::Min(8),    // Controls area
            Constraint::Length(1), // Footer
        ])
        .split(area);

    // Banner
    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    // Subtitle, replaced by the launch error when there is one
    let subtitle = match status {
        Some(msg) => Line::from(vec![
            Span::styled("  ⚠ ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(msg.to_string(), Style::default().fg(Color::Rgb(255, 120, 120))),
        ]),
        None => Line::from(Span::styled(
            "  ⚡ Your Terminal Arcade ⚡  ",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        )),
    };
    frame.render_widget(Paragraph::new(subtitle).alignment(Alignment::Center), chunks[1]);

    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🎮 Games: ←→ Select, Enter to Play ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(games_inner);
    for (i, tile) in GAME_TILES.iter().enumerate() {
        render_game_tile(frame, cols[i], tile, selected_game == i, last_scores[i]);
    }

    // Controls area: navigation left, game controls right
    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[3]);

    let mut nav = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  🔧 Navigation",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )),
    ];
    for (key, what) in [
        ("Tab / Shift+Tab", "Switch tabs"),
        ("1-3", "Launch game"),
        ("← →", "Select game"),
        ("Enter", "Play selected"),
        ("Esc", "Return to Home"),
        ("q / Ctrl+C", "Quit"),
    ] {
        nav.push(control_line(key, what));
    }
    let controls = Paragraph::new(nav).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ⌨ Navigation Control ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(controls, ctrl_cols[0]);

    let tile = &GAME_TILES[selected_game.min(GAME_TILES.len() - 1)];
    let game_ctrl = Paragraph::new(game_controls(tile)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
            .title(format!(" 🎮 {} Control ", tile.name))
            .title_style(Style::default().fg(tile.color).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(game_ctrl, ctrl_cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled(concat!("v", env!("CARGO_PKG_VERSION")), Style::default().fg(Color::Rgb(80, 80, 100))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);
}
